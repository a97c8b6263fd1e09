use crate::cli::Cli;
use anyhow::Context;
use juniscan_metadata::{RpcClient, RuntimeMetadata};
use std::path::Path;
use tracing::info;
use url::Url;


pub async fn load_metadata(args: &Cli) -> anyhow::Result<RuntimeMetadata> {
    match &args.metadata_file {
        Some(path) => read_metadata_file(path),
        None => fetch_metadata(&args.rpc_url, args.at.as_deref()).await
    }
}


pub async fn fetch_metadata(url: &Url, at: Option<&str>) -> anyhow::Result<RuntimeMetadata> {
    let client = RpcClient::new(url.clone())?;

    let version = client.runtime_version(at).await?;
    info!(
        url = %client.url(),
        spec_name = %version.spec_name,
        spec_version = version.spec_version,
        "fetching runtime metadata"
    );

    client.fetch_metadata(at).await
}


const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";


/// Reads a metadata snapshot, either a `.json` descriptor dump or SCALE bytes (raw or 0x-hex).
pub fn read_metadata_file(path: &Path) -> anyhow::Result<RuntimeMetadata> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let text = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]).trim_ascii_start();

    let metadata = if path.extension().is_some_and(|ext| ext == "json") {
        RuntimeMetadata::from_json_slice(&bytes)
    } else if text.starts_with(b"0x") {
        std::str::from_utf8(text)
            .context("metadata hex is not valid utf-8")
            .and_then(RuntimeMetadata::from_hex)
    } else {
        RuntimeMetadata::decode(&bytes)
    };

    metadata.with_context(|| format!("failed to load metadata from {}", path.display()))
}
