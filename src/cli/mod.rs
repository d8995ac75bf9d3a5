//! CLI command handling

pub mod decode;
pub mod label;
pub mod output;
pub mod replay;

pub use decode::*;
pub use label::*;
pub use output::*;
pub use replay::*;
