//! Ingestion readers that produce normalized [`docpart_core::Document`]
//! records.
//!
//! Currently ships a single integration: the `unstructured` module, which
//! delegates PDF partitioning to an unstructured.io style HTTP service.
pub mod unstructured;
