pub mod annotator;
pub mod processor;

pub use annotator::*;
pub use processor::*;
