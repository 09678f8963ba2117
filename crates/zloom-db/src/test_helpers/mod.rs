//! In-memory stores for exercising the access and invite flows without Postgres

pub mod memory_store;

pub use memory_store::MemoryStore;
