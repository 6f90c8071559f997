//! Shared vocabulary for document ingestion.
//!
//! Defines the [`Document`] record produced by every reader, the
//! [`DocumentStream`] used to hand records to downstream consumers, and the
//! [`Reader`] trait that ingestion sources implement.
mod document;
mod document_stream;
mod traits;

pub mod util;

pub use crate::document::{DEFAULT_DOCUMENT_KIND, Document, DocumentBuilder};
pub use crate::document_stream::DocumentStream;
pub use crate::traits::*;
