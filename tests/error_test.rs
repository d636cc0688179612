use std::time::Duration;

use docsort::DocsortError;

#[test]
fn test_error_display() {
    let err = DocsortError::Configuration("chunk_overlap (10) must be less than max_chunk_size (10)".into());
    assert_eq!(
        err.to_string(),
        "configuration error: chunk_overlap (10) must be less than max_chunk_size (10)"
    );

    let err = DocsortError::Api {
        status: 502,
        message: "bad gateway".into(),
    };
    assert_eq!(err.to_string(), "API error (502): bad gateway");

    let err = DocsortError::UnsupportedFileType("Only .txt, .pdf, and .docx files are allowed".into());
    assert!(err.to_string().contains("Only .txt"));
}

#[test]
fn test_transient_classification() {
    let transient = [
        DocsortError::RateLimited { retry_after: None },
        DocsortError::Http("reset".into()),
        DocsortError::EmptyResponse,
        DocsortError::Timeout(Duration::from_secs(5)),
        DocsortError::Api {
            status: 500,
            message: String::new(),
        },
        DocsortError::Api {
            status: 503,
            message: String::new(),
        },
    ];
    for err in &transient {
        assert!(err.is_transient(), "{err} should be transient");
    }

    let permanent = [
        DocsortError::AuthenticationFailed,
        DocsortError::ModelNotFound("m".into()),
        DocsortError::InvalidScores("NaN".into()),
        DocsortError::Configuration("bad".into()),
        DocsortError::Api {
            status: 422,
            message: String::new(),
        },
        DocsortError::Extraction("corrupt".into()),
    ];
    for err in &permanent {
        assert!(!err.is_transient(), "{err} should be permanent");
    }
}

#[test]
fn test_retry_after_only_from_rate_limit() {
    let hinted = DocsortError::RateLimited {
        retry_after: Some(Duration::from_secs(3)),
    };
    assert_eq!(hinted.retry_after(), Some(Duration::from_secs(3)));
    assert_eq!(DocsortError::Http("x".into()).retry_after(), None);
}

#[test]
fn test_json_error_converts() {
    let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
    let err: DocsortError = parse.unwrap_err().into();
    assert!(matches!(err, DocsortError::Json(_)));
}
