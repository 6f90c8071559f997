#![allow(clippy::from_over_into)]

//! This module defines the `DocumentStream` type, an asynchronous stream of
//! `Document` records handed from a reader to downstream consumers.

use crate::document::Document;
use anyhow::Result;
use futures_util::stream::{self, Stream};
use std::pin::Pin;
use tokio::sync::mpsc::Receiver;

pub use futures_util::StreamExt;

// We need to inform the compiler that `inner` is pinned as well
/// An asynchronous stream of `Document` records.
///
/// Wraps an internal stream of `Result<Document>` items.
///
/// Streams, iterators and vectors of `Result<Document>` can be converted into
/// a `DocumentStream`.
#[pin_project::pin_project]
pub struct DocumentStream {
    #[pin]
    pub(crate) inner: Pin<Box<dyn Stream<Item = Result<Document>> + Send>>,
}

impl Stream for DocumentStream {
    type Item = Result<Document>;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        let this = self.project();
        this.inner.poll_next(cx)
    }
}

impl Into<DocumentStream> for Vec<Result<Document>> {
    fn into(self) -> DocumentStream {
        DocumentStream::iter(self)
    }
}

impl Into<DocumentStream> for Vec<Document> {
    fn into(self) -> DocumentStream {
        DocumentStream::from_documents(self)
    }
}

impl Into<DocumentStream> for Result<Vec<Document>> {
    fn into(self) -> DocumentStream {
        match self {
            Ok(documents) => DocumentStream::iter(documents.into_iter().map(Ok)),
            Err(err) => DocumentStream::iter(vec![Err(err)]),
        }
    }
}

impl Into<DocumentStream> for Pin<Box<dyn Stream<Item = Result<Document>> + Send>> {
    fn into(self) -> DocumentStream {
        DocumentStream { inner: self }
    }
}

impl Into<DocumentStream> for Receiver<Result<Document>> {
    fn into(self) -> DocumentStream {
        DocumentStream {
            inner: tokio_stream::wrappers::ReceiverStream::new(self).boxed(),
        }
    }
}

impl From<anyhow::Error> for DocumentStream {
    fn from(err: anyhow::Error) -> Self {
        DocumentStream::iter(vec![Err(err)])
    }
}

impl DocumentStream {
    pub fn empty() -> Self {
        DocumentStream {
            inner: stream::empty().boxed(),
        }
    }

    /// Creates a `DocumentStream` from an iterator of `Result<Document>`.
    pub fn iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Result<Document>> + Send + 'static,
        <I as IntoIterator>::IntoIter: Send,
    {
        DocumentStream {
            inner: stream::iter(iter).boxed(),
        }
    }

    pub fn from_documents(documents: Vec<Document>) -> Self {
        DocumentStream::iter(documents.into_iter().map(Ok))
    }
}
