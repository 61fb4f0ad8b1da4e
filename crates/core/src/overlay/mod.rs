pub mod coordinate_mapper;
pub mod image_annotator;
pub mod overlay_layout;
