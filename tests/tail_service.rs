use std::io::Write;
use std::path::PathBuf;
use tokio::time::{timeout, Duration};
use tokio_util::sync::CancellationToken;

use rtail::{ExtractionGate, RtailError, TailConfig, TailRequest, TailService};

const TIMEOUT_MS: u64 = 2000;

fn create_test_file(contents: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(contents).expect("write contents");
    file.flush().expect("flush contents");
    file
}

fn numbered_lines(count: usize) -> String {
    (1..=count).map(|i| format!("Line {}\n", i)).collect()
}

fn service_with(config: TailConfig) -> TailService {
    let gate = ExtractionGate::new(config.max_concurrent_reads).expect("create gate");
    TailService::new(config, gate)
}

fn default_service() -> TailService {
    service_with(TailConfig::default())
}

async fn tail(service: &TailService, request: TailRequest) -> rtail::Result<Vec<String>> {
    timeout(
        Duration::from_millis(TIMEOUT_MS),
        service.tail(&request, &CancellationToken::new()),
    )
    .await
    .expect("tail timed out")
    .map(|output| output.lines)
}

#[tokio::test]
async fn returns_last_five_of_twelve_lines() {
    let file = create_test_file(numbered_lines(12).as_bytes());

    let lines = tail(&default_service(), TailRequest::new(file.path(), 5))
        .await
        .unwrap();

    assert_eq!(lines, vec!["Line 8", "Line 9", "Line 10", "Line 11", "Line 12"]);
}

#[tokio::test]
async fn small_chunks_match_default_chunks() {
    let file = create_test_file(numbered_lines(2_000).as_bytes());
    let expected = tail(&default_service(), TailRequest::new(file.path(), 25))
        .await
        .unwrap();

    for chunk_size in [1, 16, 1 << 20] {
        let service = service_with(TailConfig {
            chunk_size,
            ..TailConfig::default()
        });
        let lines = tail(&service, TailRequest::new(file.path(), 25))
            .await
            .unwrap();
        assert_eq!(lines, expected, "chunk size {chunk_size}");
    }
    assert_eq!(expected.first().map(String::as_str), Some("Line 1976"));
}

#[tokio::test]
async fn trailing_blank_lines_are_preserved() {
    let file = create_test_file(b"Line 1\nLine 2\nLine 3\n\n\n");

    let lines = tail(&default_service(), TailRequest::new(file.path(), 5))
        .await
        .unwrap();

    assert_eq!(lines, vec!["Line 1", "Line 2", "Line 3", "", ""]);
}

#[tokio::test]
async fn empty_file_yields_no_lines() {
    let file = create_test_file(b"");

    let lines = tail(&default_service(), TailRequest::new(file.path(), 3))
        .await
        .unwrap();

    assert!(lines.is_empty());
}

#[tokio::test]
async fn line_number_flag_is_passed_through() {
    let file = create_test_file(b"a\nb\n");
    let request = TailRequest::new(file.path(), 1).with_line_numbers(true);

    let output = default_service()
        .tail(&request, &CancellationToken::new())
        .await
        .unwrap();

    assert!(output.number_lines);
    assert_eq!(output.lines, vec!["b"]);
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("nope.log");

    match tail(&default_service(), TailRequest::new(&missing, 5)).await {
        Err(RtailError::NotFound { path }) => assert_eq!(path, missing),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn directory_is_rejected() {
    let dir = tempfile::TempDir::new().unwrap();

    let result = tail(&default_service(), TailRequest::new(dir.path(), 5)).await;
    assert!(matches!(result, Err(RtailError::InvalidArgument { .. })));
}

#[tokio::test]
async fn blank_path_is_rejected() {
    let result = tail(&default_service(), TailRequest::new(PathBuf::from("  "), 5)).await;
    assert!(matches!(result, Err(RtailError::InvalidArgument { .. })));
}

#[tokio::test]
async fn line_count_over_ceiling_is_rejected() {
    let file = create_test_file(b"x\n");
    let service = service_with(TailConfig {
        max_line_count: 100,
        ..TailConfig::default()
    });

    match tail(&service, TailRequest::new(file.path(), 101)).await {
        Err(RtailError::InvalidArgument { message }) => {
            assert!(message.contains("100"), "message was {message}");
            assert!(message.contains("101"), "message was {message}");
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let zero = tail(&service, TailRequest::new(file.path(), 0)).await;
    assert!(matches!(zero, Err(RtailError::InvalidArgument { .. })));
}

#[tokio::test]
async fn cancelled_scan_returns_no_output() {
    let file = create_test_file(numbered_lines(50_000).as_bytes());
    let service = service_with(TailConfig {
        chunk_size: 64,
        ..TailConfig::default()
    });
    let token = CancellationToken::new();
    token.cancel();

    let result = service
        .tail(&TailRequest::new(file.path(), 5_000), &token)
        .await;

    assert!(matches!(result, Err(RtailError::Cancelled)));
}

#[tokio::test]
async fn concurrent_requests_share_the_gate() {
    let file = create_test_file(numbered_lines(1_000).as_bytes());
    let service = service_with(TailConfig {
        chunk_size: 128,
        max_concurrent_reads: 2,
        ..TailConfig::default()
    });

    let tasks = (1..=8).map(|n| {
        let service = service.clone();
        let path = file.path().to_path_buf();
        tokio::spawn(async move {
            service
                .tail(&TailRequest::new(path, n), &CancellationToken::new())
                .await
        })
    });

    let results = timeout(
        Duration::from_millis(TIMEOUT_MS),
        futures::future::join_all(tasks),
    )
    .await
    .expect("concurrent tails timed out");

    for (index, result) in results.into_iter().enumerate() {
        let output = result.expect("task panicked").expect("tail failed");
        let n = index + 1;
        assert_eq!(output.lines.len(), n);
        assert_eq!(output.lines.last().map(String::as_str), Some("Line 1000"));
        assert_eq!(output.lines[0], format!("Line {}", 1000 - n + 1));
    }
}

#[tokio::test]
async fn waiting_for_admission_can_be_cancelled() {
    let file = create_test_file(b"a\n");
    let gate = ExtractionGate::new(1).unwrap();
    let service = TailService::new(TailConfig::default(), gate.clone());

    let _held = gate.acquire(&CancellationToken::new()).await.unwrap();
    assert_eq!(gate.available(), 0);

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let result = timeout(
        Duration::from_millis(TIMEOUT_MS),
        service.tail(&TailRequest::new(file.path(), 1), &token),
    )
    .await
    .expect("cancelled tail should return");

    assert!(matches!(result, Err(RtailError::Cancelled)));
}
