pub mod content;
pub mod learning_path;
pub mod video;
