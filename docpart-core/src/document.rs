//! This module defines the `Document` record, the normalized output unit
//! produced by any ingestion reader and consumed by downstream indexing.
//!
//! A `Document` is constructed once per ingested file and handed to the
//! caller; this crate never mutates it afterwards.
use std::fmt::Debug;

use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::util::debug_long_utf8;

/// The default document-type label applied when a caller does not provide one.
pub const DEFAULT_DOCUMENT_KIND: &str = "Documentation";

/// A normalized document record.
///
/// The only invariant is that `text` is always present; an empty body is
/// valid, for instance for a scanned PDF with no extractable text.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "anyhow::Error"))]
pub struct Document {
    /// Display name, typically the file name or path the record came from.
    pub name: String,
    /// The extracted text body.
    pub text: String,
    /// Document-type label used by downstream indexing.
    #[builder(default = "DEFAULT_DOCUMENT_KIND.to_string()")]
    pub kind: String,
    /// Optional link back to the source.
    #[builder(default)]
    pub link: Option<String>,
    /// When this record was created.
    #[builder(default = "Utc::now()")]
    pub created_at: DateTime<Utc>,
    /// Name of the reader that produced the record.
    #[builder(default)]
    pub reader: String,
}

impl Document {
    /// Creates a builder for a `Document`.
    ///
    /// `name` and `text` are required; all other fields have defaults.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }
}

impl Debug for Document {
    /// Formats the document for debugging purposes, truncating the text body.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("link", &self.link)
            .field("created_at", &self.created_at)
            .field("reader", &self.reader)
            .field("text", &debug_long_utf8(&self.text, 100))
            .finish()
    }
}
