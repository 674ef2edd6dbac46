mod format;
pub mod output;

pub use format::DocumentFormat;
pub use output::{OutputDestination, OutputOptions};
