//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod audio;
pub mod chart;
pub mod document;
pub mod image;
pub mod video;

pub use audio::AudioTool;
pub use chart::ChartTool;
pub use document::DocumentTool;
pub use image::ImageTool;
pub use video::VideoTool;
