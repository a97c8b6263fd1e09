use crate::error::{RpcError, SourceUnavailable};
use crate::model::RuntimeMetadata;
use anyhow::{anyhow, Context};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::fmt::{Debug, Formatter};
use tracing::{debug, instrument};
use url::Url;


#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>
}


#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeVersion {
    pub spec_name: String,
    pub spec_version: u32,
    #[serde(default)]
    pub impl_name: Option<String>,
    #[serde(default)]
    pub impl_version: Option<u32>,
    #[serde(default)]
    pub transaction_version: Option<u32>,
}


/// JSON-RPC client of a Substrate node.
pub struct RpcClient {
    http: reqwest::Client,
    url: Url
}


impl Debug for RpcClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("url", &self.url.as_str())
            .finish()
    }
}


impl RpcClient {
    pub fn new(url: Url) -> anyhow::Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder().gzip(true).build()?,
            url: http_url(url)?
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    #[instrument(level = "debug", skip(self), err(Debug))]
    pub async fn fetch_metadata(&self, at: Option<&str>) -> anyhow::Result<RuntimeMetadata> {
        let hex: String = self.call("state_getMetadata", at).await?;
        debug!(size = hex.len() / 2, "received runtime metadata");
        RuntimeMetadata::from_hex(&hex)
    }

    pub async fn runtime_version(&self, at: Option<&str>) -> anyhow::Result<RuntimeVersion> {
        self.call("state_getRuntimeVersion", at).await
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, at: Option<&str>) -> anyhow::Result<T> {
        let params = match at {
            Some(hash) => json!([hash]),
            None => json!([])
        };

        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params
        });

        let response: RpcResponse<T> = self.http
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .with_context(|| SourceUnavailable {
                url: self.url.to_string()
            })?
            .json()
            .await
            .with_context(|| format!("invalid response to {}", method))?;

        if let Some(err) = response.error {
            return Err(anyhow!(err).context(SourceUnavailable {
                url: self.url.to_string()
            }))
        }

        response.result.ok_or_else(|| anyhow!("{} returned neither a result nor an error", method))
    }
}


/// Nodes serve JSON-RPC over plain HTTP on the same port as websockets.
fn http_url(mut url: Url) -> anyhow::Result<Url> {
    let scheme = match url.scheme() {
        "ws" => "http",
        "wss" => "https",
        "http" | "https" => return Ok(url),
        other => anyhow::bail!("unsupported rpc url scheme: {}", other)
    };
    url.set_scheme(scheme).map_err(|_| anyhow!("failed to convert {} to an http url", url))?;
    Ok(url)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn websocket_urls_are_mapped_to_http() {
        let url = http_url(Url::parse("wss://gdev.coinduf.eu").unwrap()).unwrap();
        assert_eq!(url.as_str(), "https://gdev.coinduf.eu/");

        let url = http_url(Url::parse("ws://127.0.0.1:9944").unwrap()).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9944/");

        let url = http_url(Url::parse("http://localhost:9933/rpc").unwrap()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9933/rpc");

        assert!(http_url(Url::parse("ftp://example.com").unwrap()).is_err());
    }

    #[test]
    fn rpc_error_response() {
        let res: RpcResponse<String> = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"Method not found"}}"#
        ).unwrap();
        assert!(res.result.is_none());
        assert_eq!(res.error.unwrap().to_string(), "node returned rpc error -32601: Method not found");
    }

    #[test]
    fn runtime_version_response() {
        let res: RpcResponse<RuntimeVersion> = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"result":{"specName":"gdev","implName":"duniter-gdev","specVersion":800,"implVersion":1,"transactionVersion":1,"apis":[]}}"#
        ).unwrap();
        let version = res.result.unwrap();
        assert_eq!(version.spec_name, "gdev");
        assert_eq!(version.spec_version, 800);
    }
}
