//! 내장 전략.

pub mod cross_section;
pub mod reverse;

pub use cross_section::CrossSectionStrategy;
pub use reverse::ReverseStrategy;
