//! # attest-check
//!
//! Pure checks over already-fetched endpoint data:
//! - [`source_usage`]: does a chat answer show use of a data source, and of
//!   specific external items within it
//! - [`schema`]: does an `/admin/instances` body have the expected shape
//! - [`connectors`]: does a connector report the expected processed-item count
//!
//! None of these perform I/O or retry. Progress is reported through the
//! [`Reporter`] hook; the default [`TracingReporter`] emits `tracing` events.

pub mod connectors;
pub mod error;
pub mod reporter;
pub mod schema;
pub mod source_usage;

pub use connectors::{
    check_connector_counts, check_connector_counts_with, check_connector_items,
    check_connector_items_with,
};
pub use error::CheckError;
pub use reporter::{CheckEvent, NoopReporter, Reporter, TracingReporter};
pub use schema::{parse_instances, prepare_instances, prepare_instances_with, validate_instances};
pub use source_usage::{
    SearchScope, SourceQuery, SourceUsage, match_source_usage, match_source_usage_with,
};
