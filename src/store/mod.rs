pub mod schema;
pub mod sqlite;

pub use schema::*;
pub use sqlite::*;
