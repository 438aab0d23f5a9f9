pub mod parser;
pub mod summary;
