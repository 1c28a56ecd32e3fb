// Infrastructure layer module
// Contains database adapters and schema management
// Follows Hexagonal Architecture

pub mod repositories;
pub mod schema;
