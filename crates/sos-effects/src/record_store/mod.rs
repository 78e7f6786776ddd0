//! Record store effect handlers

pub mod firebase;
pub mod memory;

pub use firebase::FirebaseRecordStore;
pub use memory::MemoryRecordStore;
