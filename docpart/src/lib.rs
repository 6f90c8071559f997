//! # docpart
//!
//! Document ingestion for remote partitioning services. Accepts PDF content
//! as file-system paths, base64-encoded bytes, or pre-extracted text,
//! delegates partitioning and text extraction to an unstructured.io style
//! HTTP API, and normalizes the result into uniform [`Document`] records for
//! downstream indexing.
//!
//! The endpoint is configured through `UNSTRUCTURED_API_URL` and
//! `UNSTRUCTURED_API_KEY`, or explicitly via
//! [`unstructured::UnstructuredConfig`].
//!
//! ## Example
//!
//! ```no_run
//! # use docpart::unstructured::{LoadRequest, UnstructuredReader};
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let reader = UnstructuredReader::default();
//!
//! let request = LoadRequest::builder()
//!     .paths(vec!["docs/".into()])
//!     .kind("Documentation")
//!     .build()?;
//!
//! for document in reader.load(request).await? {
//!     println!("{}: {} chars", document.name, document.text.len());
//! }
//! # Ok(())
//! # }
//! ```
pub use docpart_core::{Document, DocumentBuilder, DocumentStream, Reader};

pub mod unstructured {
    pub use docpart_ingest::unstructured::*;
}
