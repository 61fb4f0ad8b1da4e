pub mod dashed_container;
pub mod detection_overlay;
pub mod drop_zone;
pub mod image_viewport;
pub mod primary_button;
