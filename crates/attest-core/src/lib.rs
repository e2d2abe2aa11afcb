//! # attest-core
//!
//! Wire models and shape handling shared across all attest crates.
//!
//! This crate provides:
//! - Typed shapes for the `/chat` and `/admin/instances` endpoints
//! - `ShapeError`, the field-level failure raised when JSON does not match
//! - The response normalizer that turns loosely-typed fields into strict ones
//! - Chat response parsing with core-field checks

pub mod errors;
pub mod models;
pub mod normalize;
pub mod parse;

pub use errors::{ShapeError, json_kind};
pub use models::{
    AdminInstance, AnswerLog, ChatRequestPayload, ChatResponse, ChunkEntity, Citation, DataItem,
    Retrieval, RetrievalChunk,
};
