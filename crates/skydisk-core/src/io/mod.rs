pub mod image_io;
pub mod pattern;
pub mod source;

pub use image_io::{load_rgb, save_rgb};
pub use pattern::FramePattern;
pub use source::{FrameSink, FrameSource, PatternSink, PatternSource};
