use anyhow::Result;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use truth_or_dare::core::state::{GenerateRequest, Mode};
use truth_or_dare::services::api::{GenerateApi, GenerateError, HttpGenerateApi};

struct Captured {
    head: String,
    body: String,
}

fn header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
}

fn content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Serves exactly one request with `status` and `body`, returning what the
/// client sent.
async fn serve_once(status: &str, body: &str) -> Result<(String, JoinHandle<Result<Captured>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base = format!("http://{}", listener.local_addr()?);
    let status = status.to_string();
    let body = body.to_string();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await?;
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        let head_len = loop {
            let n = socket.read(&mut chunk).await?;
            anyhow::ensure!(n > 0, "connection closed before headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = header_end(&buf) {
                break end;
            }
        };
        let head = String::from_utf8_lossy(&buf[..head_len]).to_string();
        let wanted = head_len + content_length(&head);
        while buf.len() < wanted {
            let n = socket.read(&mut chunk).await?;
            anyhow::ensure!(n > 0, "connection closed before body");
            buf.extend_from_slice(&chunk[..n]);
        }
        let request_body = String::from_utf8_lossy(&buf[head_len..wanted]).to_string();

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await?;
        socket.shutdown().await?;

        Ok(Captured {
            head,
            body: request_body,
        })
    });

    Ok((base, handle))
}

#[tokio::test]
async fn test_posts_json_and_parses_success() -> Result<()> {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"success": true, "mode": "dare", "question": "Sing a song", "scene": "beach"}"#,
    )
    .await?;

    let api = HttpGenerateApi::new(&base, "/generate")?;
    let result = api
        .generate(&GenerateRequest::new(Mode::Dare, " beach "))
        .await?;
    assert_eq!(result.mode, Mode::Dare);
    assert_eq!(result.question, "Sing a song");
    assert_eq!(result.scene.as_deref(), Some("beach"));

    let captured = server.await??;
    assert!(captured.head.starts_with("POST /generate HTTP/1.1"));
    assert!(captured
        .head
        .to_ascii_lowercase()
        .contains("content-type: application/json"));
    let sent: serde_json::Value = serde_json::from_str(&captured.body)?;
    assert_eq!(sent, serde_json::json!({ "mode": "dare", "scene": "beach" }));
    Ok(())
}

#[tokio::test]
async fn test_error_status_uses_server_message() -> Result<()> {
    let (base, server) = serve_once("500 Internal Server Error", r#"{"error": "Server down"}"#).await?;

    let api = HttpGenerateApi::new(&base, "/generate")?;
    let err = api
        .generate(&GenerateRequest::new(Mode::Truth, ""))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GenerateError::Status {
            status: 500,
            message: "Server down".to_string()
        }
    );
    server.await??;
    Ok(())
}

#[tokio::test]
async fn test_rate_limited_without_success_flag() -> Result<()> {
    let (base, server) = serve_once("429 Too Many Requests", r#"{"error": "请求过于频繁，请稍后再试"}"#).await?;

    let api = HttpGenerateApi::new(&base, "/generate")?;
    let err = api
        .generate(&GenerateRequest::new(Mode::Truth, ""))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "请求过于频繁，请稍后再试");
    server.await??;
    Ok(())
}

#[tokio::test]
async fn test_unreachable_server_is_transport_failure() -> Result<()> {
    // Bind then drop to get a port nobody listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base = format!("http://{}", listener.local_addr()?);
    drop(listener);

    let api = HttpGenerateApi::new(&base, "/generate")?;
    let err = api
        .generate(&GenerateRequest::new(Mode::Truth, ""))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerateError::Transport { .. }));
    Ok(())
}
