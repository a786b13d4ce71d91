//! Remote summary provider access

pub mod client;
pub mod payload;
pub mod prompt;
pub mod registry;

// Re-export main types for convenience
pub use client::{RemoteSummaryClient, SummaryBackend, SummaryCall};
pub use registry::{Candidate, EndpointRegistry};
