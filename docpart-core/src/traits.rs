//! Traits at the seams of the ingestion pipeline.
//!
//! A source of documents implements [`Reader`]; consumers only ever see the
//! resulting [`DocumentStream`].
use crate::document_stream::DocumentStream;

#[cfg(feature = "test-utils")]
#[doc(hidden)]
use mockall::automock;

/// Starting point of a stream of documents
#[cfg_attr(feature = "test-utils", automock, doc(hidden))]
pub trait Reader {
    fn into_stream(self) -> DocumentStream;

    /// Intended for use with trait objects
    fn into_stream_boxed(self: Box<Self>) -> DocumentStream;
}
