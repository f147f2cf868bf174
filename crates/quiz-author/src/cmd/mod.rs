pub mod replay;
pub mod schema;
