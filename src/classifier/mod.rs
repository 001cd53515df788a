pub mod client;
pub mod port;

pub use client::*;
pub use port::*;
