//! 具体渲染端实现

pub mod json_lines;
pub mod log;

pub use json_lines::JsonLinesRenderer;
pub use log::LogRenderer;
