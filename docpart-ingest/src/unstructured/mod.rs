//! PDF ingestion via an unstructured.io style partitioning service
//!
//! The service owns partitioning, text extraction, and language detection;
//! this module only dispatches on input shape (paths, base64 bytes, or
//! pre-extracted text), stages byte uploads, and reshapes the response into
//! [`docpart_core::Document`] records.
//!
//! # Example
//!
//! ```no_run
//! # use docpart_ingest::unstructured::{LoadRequest, UnstructuredReader};
//! # async fn example() -> anyhow::Result<()> {
//! let reader = UnstructuredReader::default();
//! let request = LoadRequest::builder()
//!     .paths(vec!["docs/manual.pdf".into()])
//!     .build()?;
//! let documents = reader.load(request).await?;
//! # Ok(())
//! # }
//! ```
mod client;
mod config;
mod reader;

pub use client::{PartitionElement, PartitionedText, UnstructuredClient};
pub use config::UnstructuredConfig;
pub use reader::{LoadRequest, LoadRequestBuilder, UnstructuredLoader, UnstructuredReader};
