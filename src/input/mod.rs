//! Input processing module
//! Handles record file detection and loading

pub mod file_detector;
pub mod manager;

pub use manager::{InputManager, LoadedRecord, STDIN_PATH};
