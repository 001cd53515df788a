pub mod labels;
pub mod utterance;

pub use labels::*;
pub use utterance::*;
