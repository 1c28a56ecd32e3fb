// Repository implementations (data access layer)
// Adapters that implement the domain store interface

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryStore;
pub use postgres::PostgresStore;
