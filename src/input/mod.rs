//! CV file input: type detection, text extraction and the import entry point

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::InputManager;
