#![deny(missing_docs)]
//! Durable and in-memory backings for the debate engine's persisted
//! document, plus debate id generation.

mod fs_store;
mod id;
mod memory_store;

pub use fs_store::FsDebateStore;
pub use id::generate_debate_id;
pub use memory_store::MemoryDebateStore;
