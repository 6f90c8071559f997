//! Integration tests for the remote partition path, against a wiremock
//! server standing in for the partitioning service.
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use temp_dir::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use docpart_ingest::unstructured::{LoadRequest, UnstructuredConfig, UnstructuredReader};

const PARTITION_PATH: &str = "/general/v0/general";

fn elements_body() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        r#"[
            {"type":"Title","element_id":"a","text":"Hello","metadata":{"languages":["eng"]}},
            {"type":"PageBreak","element_id":"b"},
            {"type":"NarrativeText","element_id":"c","text":"World","metadata":{"languages":["eng"]}}
        ]"#,
        "application/json",
    )
}

fn reader_for(mock_server: &MockServer) -> UnstructuredReader {
    let config = UnstructuredConfig::builder()
        .server_url(mock_server.uri())
        .build()
        .unwrap();
    UnstructuredReader::new(config)
}

#[test_log::test(tokio::test)]
async fn test_load_file_joins_element_texts() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PARTITION_PATH))
        .respond_with(elements_body())
        .expect(1)
        .mount(&mock_server)
        .await;

    let tempdir = TempDir::new().unwrap();
    let pdf_path = tempdir.path().join("manual.pdf");
    std::fs::write(&pdf_path, b"%PDF-1.4 not a real pdf").unwrap();

    let reader = reader_for(&mock_server);
    let document = reader
        .load_file(&pdf_path, "Documentation")
        .await
        .unwrap()
        .expect("pdf extension should be supported");

    assert_eq!(document.text, "Hello World");
    assert_eq!(document.name, pdf_path.display().to_string());
    assert_eq!(document.link.as_deref(), Some(pdf_path.display().to_string().as_str()));
    assert_eq!(document.reader, "unstructured-api-pdf");

    mock_server.verify().await;
}

#[test_log::test(tokio::test)]
async fn test_partition_request_is_a_well_formed_multipart_form() {
    use std::sync::{Arc, Mutex};

    let mock_server = MockServer::start().await;

    let body = Arc::new(Mutex::new(None));
    let body_clone = body.clone();
    let response = elements_body();

    Mock::given(method("POST"))
        .and(path(PARTITION_PATH))
        .respond_with(move |req: &wiremock::Request| {
            let body_str = String::from_utf8_lossy(&req.body).to_string();
            let mut lock = body_clone.lock().unwrap();
            *lock = Some(body_str);
            response.clone()
        })
        .expect(1)
        .mount(&mock_server)
        .await;

    let tempdir = TempDir::new().unwrap();
    let pdf_path = tempdir.path().join("manual.pdf");
    std::fs::write(&pdf_path, b"%PDF-1.4 not a real pdf").unwrap();

    let reader = reader_for(&mock_server);
    reader
        .load_file(&pdf_path, "Documentation")
        .await
        .unwrap()
        .expect("pdf extension should be supported");

    let body = body.lock().unwrap().take().unwrap();

    // The file part carries its original file name.
    assert!(body.contains(r#"name="files"; filename="manual.pdf""#), "{body}");
    assert!(body.contains("%PDF-1.4 not a real pdf"), "{body}");

    // The strategy field defaults to auto.
    assert!(body.contains(r#"name="strategy""#), "{body}");
    assert!(body.contains("auto"), "{body}");

    // One repeated languages[] field per configured language hint.
    assert_eq!(body.matches(r#"name="languages[]""#).count(), 2, "{body}");
    assert!(body.contains("eng"), "{body}");
    assert!(body.contains("de"), "{body}");

    mock_server.verify().await;
}

#[test_log::test(tokio::test)]
async fn test_load_bytes_stages_and_partitions() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PARTITION_PATH))
        .respond_with(elements_body())
        .expect(1)
        .mount(&mock_server)
        .await;

    let encoded = BASE64.encode(b"%PDF-1.4 not a real pdf");
    let reader = reader_for(&mock_server);
    let document = reader
        .load_bytes(&encoded, "upload.pdf", "Documentation")
        .await
        .unwrap();

    assert_eq!(document.text, "Hello World");
    assert_eq!(document.name, "upload.pdf");
    assert_eq!(document.link.as_deref(), Some("upload.pdf"));

    mock_server.verify().await;
}

#[test_log::test(tokio::test)]
async fn test_api_key_header_is_sent_when_configured() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PARTITION_PATH))
        .and(header("unstructured-api-key", "secret-key"))
        .respond_with(elements_body())
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = UnstructuredConfig::builder()
        .server_url(mock_server.uri())
        .api_key("secret-key")
        .build()
        .unwrap();
    let reader = UnstructuredReader::new(config);

    let encoded = BASE64.encode(b"%PDF-1.4");
    reader
        .load_bytes(&encoded, "upload.pdf", "Documentation")
        .await
        .unwrap();

    mock_server.verify().await;
}

#[test_log::test(tokio::test)]
async fn test_service_error_is_propagated() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PARTITION_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let encoded = BASE64.encode(b"%PDF-1.4");
    let reader = reader_for(&mock_server);
    let result = reader
        .load_bytes(&encoded, "upload.pdf", "Documentation")
        .await;

    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
async fn test_load_directory_only_feeds_supported_files() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PARTITION_PATH))
        .respond_with(elements_body())
        .expect(2)
        .mount(&mock_server)
        .await;

    let tempdir = TempDir::new().unwrap();
    std::fs::write(tempdir.path().join("one.pdf"), b"%PDF-1.4").unwrap();
    std::fs::write(tempdir.path().join("ignored.txt"), b"plain").unwrap();
    let nested = tempdir.path().join("nested");
    std::fs::create_dir(&nested).unwrap();
    std::fs::write(nested.join("two.pdf"), b"%PDF-1.4").unwrap();

    let reader = reader_for(&mock_server);
    let documents = reader
        .load_directory(tempdir.path(), "Documentation")
        .await
        .unwrap();

    assert_eq!(documents.len(), 2);
    assert!(documents.iter().all(|document| document.text == "Hello World"));

    mock_server.verify().await;
}

#[test_log::test(tokio::test)]
async fn test_loader_streams_documents() {
    use docpart_core::Reader as _;
    use futures_util::TryStreamExt;

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PARTITION_PATH))
        .respond_with(elements_body())
        .expect(1)
        .mount(&mock_server)
        .await;

    let tempdir = TempDir::new().unwrap();
    std::fs::write(tempdir.path().join("manual.pdf"), b"%PDF-1.4").unwrap();

    let request = LoadRequest::builder()
        .paths(vec![tempdir.path().to_path_buf()])
        .build()
        .unwrap();
    let loader = reader_for(&mock_server).into_loader(request);

    let documents: Vec<_> = loader.into_stream().try_collect().await.unwrap();

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].text, "Hello World");
}

#[test_log::test(tokio::test)]
async fn test_batch_load_mixes_branches() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PARTITION_PATH))
        .respond_with(elements_body())
        .expect(2)
        .mount(&mock_server)
        .await;

    let tempdir = TempDir::new().unwrap();
    let pdf_path = tempdir.path().join("manual.pdf");
    std::fs::write(&pdf_path, b"%PDF-1.4").unwrap();

    let reader = reader_for(&mock_server);
    let request = LoadRequest::builder()
        .paths(vec![pdf_path, "/definitely/not/here.pdf".into()])
        .bytes(vec![BASE64.encode(b"%PDF-1.4")])
        .contents(vec!["Pre-extracted text.".to_string()])
        .file_names(vec!["upload.pdf".to_string()])
        .build()
        .unwrap();

    let documents = reader.load(request).await.unwrap();

    // One from the path, one from the byte payload, one from the contents;
    // the missing path is skipped.
    assert_eq!(documents.len(), 3);
    assert_eq!(documents[2].text, "Pre-extracted text.");

    mock_server.verify().await;
}
