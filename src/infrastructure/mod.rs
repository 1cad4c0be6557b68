// Infrastructure layer module
// Contains database adapters and query construction
// Follows Hexagonal Architecture

pub mod database;
pub mod query;
pub mod repositories;
