pub mod cli;
pub mod fetch;
pub mod geometry;
pub mod labels;
pub mod normalize;
pub mod pipeline;
pub mod scrape;
pub mod store;

pub use cli::{Cli, Commands};
