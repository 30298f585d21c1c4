//! Codecs layered over a flat preference store.
//!
//! The store underneath (`prefs-store`) only knows string keys and string
//! values. This crate adds the two encodings that need more than a
//! pass-through:
//!
//! - [`OrderedSetCodec`] -- spreads an ordered string sequence over a length
//!   marker and indexed entries so element order survives any backend.
//! - [`ObjectCodec`] -- stores `serde` values as JSON text through a
//!   pluggable [`PrefSerializer`], degrading to defaults on bad data.
//!
//! # Serialization Backends
//!
//! - [`JsonSerializer`] -- `serde_json`
//! - [`SimdJsonSerializer`] -- `simd-json`
//!
//! # Modules
//!
//! - [`keys`] -- persisted key naming for ordered sets
//! - [`ordered`] -- the ordered-set codec
//! - [`serializer`] -- the backend trait and typed helpers
//! - [`object`] -- the object codec
//! - [`error`] -- codec error types

pub mod error;
pub mod json;
pub mod keys;
pub mod object;
pub mod ordered;
pub mod serializer;
pub mod simd;

#[cfg(test)]
mod testing;

pub use error::{CodecError, CodecResult};
pub use json::JsonSerializer;
pub use keys::{index_key, length_key, LENGTH_SUFFIX};
pub use object::ObjectCodec;
pub use ordered::{OrderedSetCodec, GAP_PLACEHOLDER};
pub use serializer::{from_text, to_text, PrefSerializer, SerializerError};
pub use simd::SimdJsonSerializer;
