//! Document store for Clubfin.
//!
//! This crate provides:
//! - `MemoryStore`, the `ClubStore` implementation over JSON documents keyed
//!   by club, fiscal year and collection
//! - Snapshot import and export to JSON files

pub mod document;
pub mod memory;
pub mod snapshot;

pub use document::{Collection, DocumentKey};
pub use memory::MemoryStore;
pub use snapshot::{Snapshot, SnapshotError, YearSnapshot};
