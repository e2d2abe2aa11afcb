//! Typed shapes for the service's JSON endpoints.
//!
//! Field names follow the wire format (camelCase) exactly. Unknown fields are
//! ignored on deserialization.

mod chat;
mod instances;

pub use chat::{
    AnswerLog, ChatRequestPayload, ChatResponse, ChunkEntity, Citation, DataItem, Retrieval,
    RetrievalChunk,
};
pub use instances::AdminInstance;

use serde::{Deserialize, Deserializer};

/// Deserialize `null` the same way as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
