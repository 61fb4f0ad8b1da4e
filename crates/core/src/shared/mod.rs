pub mod bounding_box;
pub mod constants;
pub mod detection_error;
