//! Reads .pdf files through the remote partitioning service
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use derive_builder::Builder;
use fs_err::tokio as fs;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use docpart_core::{DEFAULT_DOCUMENT_KIND, Document, DocumentStream, Reader};

use super::client::UnstructuredClient;
use super::config::UnstructuredConfig;

/// Recorded on every produced document as the `reader` field.
pub const READER_NAME: &str = "unstructured-api-pdf";

const SUPPORTED_EXTENSIONS: [&str; 1] = ["pdf"];

/// Reads PDF documents by delegating partitioning, text extraction, and
/// language detection to an unstructured.io style API.
///
/// All entry points funnel into a single remote partition call; only the
/// pre-extracted text branch of [`UnstructuredReader::load`] stays local.
#[derive(Clone, Debug, Default)]
pub struct UnstructuredReader {
    client: UnstructuredClient,
}

/// The batched input accepted by [`UnstructuredReader::load`].
///
/// `bytes` and `contents` pair up with `file_names` positionally; `paths`
/// stands on its own. All lists may be empty.
#[derive(Clone, Debug, Builder)]
#[builder(setter(into), default, build_fn(error = "anyhow::Error"))]
pub struct LoadRequest {
    /// Base64-encoded PDF payloads, typically coming from an upload.
    pub bytes: Vec<String>,
    /// Pre-extracted plain-text contents; ingested without a remote call.
    pub contents: Vec<String>,
    /// Files or directories to read from disk.
    pub paths: Vec<PathBuf>,
    /// Display names paired with `bytes` and `contents`.
    pub file_names: Vec<String>,
    /// Document-type label stamped on every produced record.
    pub kind: String,
}

impl Default for LoadRequest {
    fn default() -> Self {
        Self {
            bytes: Vec::new(),
            contents: Vec::new(),
            paths: Vec::new(),
            file_names: Vec::new(),
            kind: DEFAULT_DOCUMENT_KIND.to_string(),
        }
    }
}

impl LoadRequest {
    pub fn builder() -> LoadRequestBuilder {
        LoadRequestBuilder::default()
    }
}

impl UnstructuredReader {
    /// Creates a reader against the given endpoint configuration.
    ///
    /// `UnstructuredReader::default()` configures the endpoint from the
    /// `UNSTRUCTURED_API_URL` and `UNSTRUCTURED_API_KEY` environment
    /// variables.
    pub fn new(config: UnstructuredConfig) -> Self {
        Self {
            client: UnstructuredClient::new(config),
        }
    }

    pub fn name(&self) -> &'static str {
        READER_NAME
    }

    pub fn config(&self) -> &UnstructuredConfig {
        self.client.config()
    }

    /// Loads a batch of mixed inputs and returns the produced documents.
    ///
    /// Dispatches each input shape to its loader: paths to the file or
    /// directory loader, byte payloads to the byte loader, and pre-extracted
    /// contents directly into document records. Missing paths are logged and
    /// skipped; a length mismatch between a paired list and `file_names` is
    /// logged and that branch is skipped.
    ///
    /// # Errors
    /// Errors if any remote partition call, base64 decode, or file read
    /// fails.
    #[instrument(skip_all, fields(paths = request.paths.len(), bytes = request.bytes.len(), contents = request.contents.len()))]
    pub async fn load(&self, request: LoadRequest) -> Result<Vec<Document>> {
        let LoadRequest {
            bytes,
            contents,
            paths,
            file_names,
            kind,
        } = request;

        let mut documents = Vec::new();

        for path in paths.iter().filter(|path| !path.as_os_str().is_empty()) {
            if !path.exists() {
                warn!(path = %path.display(), "Path does not exist, skipping");
                continue;
            }

            if path.is_file() {
                documents.extend(self.load_file(path, &kind).await?);
            } else {
                documents.extend(self.load_directory(path, &kind).await?);
            }
        }

        if !bytes.is_empty() {
            if bytes.len() == file_names.len() {
                for (encoded, file_name) in bytes.iter().zip(&file_names) {
                    documents.push(self.load_bytes(encoded, file_name, &kind).await?);
                }
            } else {
                warn!(
                    bytes = bytes.len(),
                    file_names = file_names.len(),
                    "Byte payloads and file names differ in length, skipping"
                );
            }
        }

        if !contents.is_empty() {
            if contents.len() == file_names.len() {
                for (content, file_name) in contents.iter().zip(&file_names) {
                    documents.push(
                        Document::builder()
                            .name(file_name)
                            .text(content)
                            .kind(&kind)
                            .reader(READER_NAME)
                            .build()?,
                    );
                }
            } else {
                warn!(
                    contents = contents.len(),
                    file_names = file_names.len(),
                    "Contents and file names differ in length, skipping"
                );
            }
        }

        debug!(count = documents.len(), "Loaded documents");

        Ok(documents)
    }

    /// Loads a single base64-encoded PDF payload.
    ///
    /// The payload is decoded, staged in a uniquely named temporary file,
    /// read back, and sent to the partitioning service. The staging file is
    /// removed before the remote call; a failed removal is logged, not fatal.
    ///
    /// # Errors
    /// Errors if the payload is not valid base64, staging I/O fails, or the
    /// partition call fails.
    #[instrument(skip(self, encoded))]
    pub async fn load_bytes(&self, encoded: &str, file_name: &str, kind: &str) -> Result<Document> {
        let decoded = BASE64
            .decode(encoded.trim())
            .context("Failed to decode base64 payload")?;

        let staging = std::env::temp_dir().join(format!("{}.pdf", Uuid::new_v4()));
        fs::write(&staging, &decoded)
            .await
            .context("Failed to stage decoded bytes")?;
        let content = fs::read(&staging)
            .await
            .context("Failed to read staged file")?;
        if let Err(error) = fs::remove_file(&staging).await {
            warn!(path = %staging.display(), "Failed to remove staging file: {error}");
        }

        let partitioned = self.client.partition(file_name, content).await?;

        let document = Document::builder()
            .name(file_name)
            .text(partitioned.text())
            .kind(kind)
            .link(file_name.to_string())
            .reader(READER_NAME)
            .build()?;

        debug!(file_name, "Loaded byte payload");

        Ok(document)
    }

    /// Loads a single .pdf file from disk.
    ///
    /// Returns `Ok(None)` for files with an unsupported extension, which are
    /// logged and skipped.
    ///
    /// # Errors
    /// Errors if the file cannot be read or the partition call fails.
    #[instrument(skip(self))]
    pub async fn load_file(&self, path: &Path, kind: &str) -> Result<Option<Document>> {
        if !supports_extension(path) {
            warn!(path = %path.display(), "Unsupported file type, skipping");
            return Ok(None);
        }

        let content = fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());

        let partitioned = self.client.partition(&file_name, content).await?;

        let name = path.display().to_string();
        let document = Document::builder()
            .name(&name)
            .text(partitioned.text())
            .kind(kind)
            .link(name.clone())
            .reader(READER_NAME)
            .build()?;

        debug!(path = %path.display(), "Loaded file");

        Ok(Some(document))
    }

    /// Loads every supported file in a directory and its subdirectories.
    ///
    /// # Errors
    /// Errors if any of the matching files fails to load.
    #[instrument(skip(self))]
    pub async fn load_directory(&self, dir: &Path, kind: &str) -> Result<Vec<Document>> {
        let files = ignore::Walk::new(dir)
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .map(ignore::DirEntry::into_path)
            .filter(|path| supports_extension(path))
            .collect::<Vec<_>>();

        let mut documents = Vec::with_capacity(files.len());
        for path in files {
            debug!(path = %path.display(), "Reading file");
            documents.extend(self.load_file(&path, kind).await?);
        }

        debug!(count = documents.len(), "Loaded directory");

        Ok(documents)
    }

    /// Pairs the reader with a request so it can act as a stream source.
    pub fn into_loader(self, request: LoadRequest) -> UnstructuredLoader {
        UnstructuredLoader {
            reader: self,
            request,
        }
    }
}

// If the file has no extension, this returns false.
fn supports_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| {
        SUPPORTED_EXTENSIONS
            .iter()
            .any(|supported| ext.eq_ignore_ascii_case(supported))
    })
}

/// An [`UnstructuredReader`] paired with a [`LoadRequest`], ready to stream.
#[derive(Clone, Debug)]
pub struct UnstructuredLoader {
    reader: UnstructuredReader,
    request: LoadRequest,
}

impl Reader for UnstructuredLoader {
    /// Converts the loader into a stream of documents.
    ///
    /// The batch load runs on a spawned task; a failure surfaces as a single
    /// `Err` item on the stream.
    fn into_stream(self) -> DocumentStream {
        let (tx, rx) = tokio::sync::mpsc::channel(16);

        tokio::spawn(async move {
            match self.reader.load(self.request).await {
                Ok(documents) => {
                    for document in documents {
                        if tx.send(Ok(document)).await.is_err() {
                            break;
                        }
                    }
                }
                Err(error) => {
                    let _ = tx.send(Err(error)).await;
                }
            }
        });

        rx.into()
    }

    fn into_stream_boxed(self: Box<Self>) -> DocumentStream {
        self.into_stream()
    }
}
