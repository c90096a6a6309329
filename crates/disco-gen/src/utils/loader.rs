use std::path::PathBuf;

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};

use crate::generator::document::DiscoveryDocument;

const URL_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Where a discovery document comes from: a local file or the discovery
/// service itself.
#[derive(Debug, Clone)]
pub enum DocumentSource {
  File(PathBuf),
  Url(String),
}

pub struct DocumentLoader {
  source: DocumentSource,
}

impl DocumentLoader {
  pub fn from_location(location: &str) -> Self {
    let source = if URL_SCHEMES.iter().any(|scheme| location.starts_with(*scheme)) {
      DocumentSource::Url(location.to_string())
    } else {
      DocumentSource::File(PathBuf::from(location))
    };

    Self { source }
  }

  pub async fn load(&self) -> anyhow::Result<DiscoveryDocument> {
    match &self.source {
      DocumentSource::File(path) => {
        let file = AsyncMmapFile::open(path)
          .await
          .with_context(|| format!("failed to open {}", path.display()))?;
        decode(file.as_slice())
      }
      DocumentSource::Url(url) => {
        let body = reqwest::get(url)
          .await
          .and_then(reqwest::Response::error_for_status)
          .with_context(|| format!("failed to fetch {url}"))?
          .bytes()
          .await?;
        decode(&body)
      }
    }
  }
}

/// Decode with `serde_path_to_error` so a malformed document reports the
/// JSON path of the failure, not just a byte offset.
fn decode(bytes: &[u8]) -> anyhow::Result<DiscoveryDocument> {
  let mut deserializer = serde_json::Deserializer::from_slice(bytes);
  let document = serde_path_to_error::deserialize(&mut deserializer)
    .context("discovery document is not valid JSON for the expected structure")?;
  Ok(document)
}
