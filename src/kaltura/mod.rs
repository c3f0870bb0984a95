pub mod media;

use crate::config::Config;
use async_trait::async_trait;
pub use media::MediaMetadata;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KalturaError {
    #[error("Kaltura request failed: {0}")]
    Network(String),

    #[error("Kaltura media not found: {0}")]
    NotFound(String),
}

/// Anything that can resolve a media id to its metadata.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch_metadata(&self, media_id: &str) -> Result<MediaMetadata, KalturaError>;
}

pub(crate) async fn kaltura_get(
    http: &reqwest::Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<serde_json::Value, KalturaError> {
    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| KalturaError::Network(e.to_string()))?;

    let status = res.status().as_u16();
    if status == 404 {
        return Err(KalturaError::NotFound(format!("HTTP {}", status)));
    }
    if status >= 400 {
        return Err(KalturaError::Network(format!("Kaltura API error: {}", status)));
    }

    res.json()
        .await
        .map_err(|e| KalturaError::Network(e.to_string()))
}

#[derive(Clone, Debug)]
pub struct KalturaClient {
    http: reqwest::Client,
    api_base: String,
    cdn_base: String,
    partner_id: u64,
}

impl KalturaClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            api_base: config.kaltura_api_base.clone(),
            cdn_base: config.kaltura_cdn_base.clone(),
            partner_id: config.kaltura_partner_id,
        }
    }

    /// Builds the CDN thumbnail URL for a media entry. Never touches the network.
    pub fn thumbnail_url(&self, media_id: &str, width: u32) -> String {
        format!(
            "{}/p/{}/thumbnail/entry_id/{}/width/{}",
            self.cdn_base, self.partner_id, media_id, width
        )
    }

    fn media_get_url(&self) -> String {
        format!("{}/api_v3/service/media/action/get", self.api_base)
    }
}

#[async_trait]
impl MetadataSource for KalturaClient {
    async fn fetch_metadata(&self, media_id: &str) -> Result<MediaMetadata, KalturaError> {
        let media_id = media_id.trim();
        if media_id.is_empty() {
            return Err(KalturaError::NotFound("empty media id".to_string()));
        }

        let partner_id = self.partner_id.to_string();
        let body = kaltura_get(
            &self.http,
            &self.media_get_url(),
            &[
                ("format", "1"),
                ("entryId", media_id),
                ("partnerId", partner_id.as_str()),
            ],
        )
        .await
        .map_err(|e| {
            tracing::warn!("[kaltura] Fetch failed for {}: {}", media_id, e);
            e
        })?;

        media::parse_media_entry(media_id, &body)
    }
}
