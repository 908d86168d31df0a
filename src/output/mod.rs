// src/output/mod.rs
//! Output handling with clear separation of planning and execution.
//!
//! Planning (which targets receive the digest) is plain data; execution
//! happens in `writer`, the only place that performs delivery I/O.

mod types;
mod webhook;
mod writer;

// Re-export the public interface
pub use types::{
    CompletedOperation, DeliveryTarget, ExecutionStats, FailedOperation, OutputPlan, OutputReport,
};
pub use webhook::{Embed, WebhookPayload, WebhookPublisher};
pub use writer::deliver;
