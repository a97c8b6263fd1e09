use juniscan_metadata::{RpcClient, RpcError, SourceUnavailable};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;


/// Answers a single HTTP request with `status` and a JSON `body`, then closes the connection.
async fn serve_once(status: &'static str, body: &'static str) -> anyhow::Result<Url> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let url = Url::parse(&format!("http://{}", listener.local_addr()?))?;

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await?;
        read_request(&mut stream).await?;
        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await?;
        stream.shutdown().await?;
        anyhow::Ok(())
    });

    Ok(url)
}


async fn read_request(stream: &mut tokio::net::TcpStream) -> anyhow::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0; 1024];
    loop {
        let n = stream.read(&mut chunk).await?;
        anyhow::ensure!(n > 0, "connection closed before the request was complete");
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(head_end) = text.find("\r\n\r\n") {
            let content_length = text[..head_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + content_length {
                return Ok(())
            }
        }
    }
}


#[tokio::test]
async fn refused_connection_is_source_unavailable() -> anyhow::Result<()> {
    let client = RpcClient::new(Url::parse("http://127.0.0.1:1")?)?;
    let err = client.fetch_metadata(None).await.unwrap_err();
    assert!(err.downcast_ref::<SourceUnavailable>().is_some());
    Ok(())
}


#[tokio::test]
async fn rpc_error_object_is_source_unavailable() -> anyhow::Result<()> {
    let url = serve_once(
        "200 OK",
        r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"Method not found"}}"#
    ).await?;

    let client = RpcClient::new(url.clone())?;
    let err = client.runtime_version(None).await.unwrap_err();

    let unavailable = err.downcast_ref::<SourceUnavailable>().unwrap();
    assert_eq!(unavailable.url, url.to_string());

    let rpc = err.downcast_ref::<RpcError>().unwrap();
    assert_eq!(rpc.code, -32601);
    assert_eq!(rpc.message, "Method not found");
    Ok(())
}


#[tokio::test]
async fn http_error_status_is_source_unavailable() -> anyhow::Result<()> {
    let url = serve_once("503 Service Unavailable", "{}").await?;

    let client = RpcClient::new(url)?;
    let err = client.fetch_metadata(Some("0x00")).await.unwrap_err();
    assert!(err.downcast_ref::<SourceUnavailable>().is_some());
    Ok(())
}
