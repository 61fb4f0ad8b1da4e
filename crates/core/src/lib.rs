pub mod detection;
pub mod intake;
pub mod overlay;
pub mod session;
pub mod shared;
