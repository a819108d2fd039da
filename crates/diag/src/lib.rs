pub mod report;
mod snippet;
pub mod source;
mod style;

pub use report::{Level, Report};
pub use source::Source;
