pub mod decode_worker;
pub mod detect_worker;
