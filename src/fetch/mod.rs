pub mod artifacts;
pub mod client;

pub use artifacts::*;
pub use client::*;
