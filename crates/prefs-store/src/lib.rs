//! Flat key-value preference storage.
//!
//! This crate implements the lowest layer of the preferences stack: a
//! persistent map from string keys to string values. Everything typed --
//! integers, ordered string sets, serialized objects -- is encoded on top of
//! it by `prefs-codec` and the `prefs` facade.
//!
//! # Storage Backends
//!
//! All backends implement the [`PreferenceStore`] trait:
//!
//! - [`InMemoryPreferenceStore`] -- map-based store for tests and embedding
//! - [`FilePreferenceStore`] -- one JSON object file per preferences name
//!
//! # Design Rules
//!
//! 1. Values are opaque text; the store never interprets them.
//! 2. Multi-key updates go through a [`Batch`] and land atomically.
//! 3. Edits inside a batch apply in staging order.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod batch;
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use batch::{Batch, Edit};
pub use error::{StoreError, StoreResult};
pub use file::{FilePreferenceStore, FileStoreOptions};
pub use memory::InMemoryPreferenceStore;
pub use traits::PreferenceStore;
