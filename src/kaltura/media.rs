use crate::kaltura::KalturaError;
use serde_json::Value;

const NOT_FOUND_CODES: &[&str] = &["ENTRY_ID_NOT_FOUND", "INVALID_ENTRY_ID"];

#[derive(Debug, Clone, PartialEq)]
pub struct MediaMetadata {
    pub name: String,
    pub duration_ms: u64,
}

/// Reads a `media.get` response body. Kaltura answers API errors with HTTP 200
/// and a `KalturaAPIException` object, so those are detected here.
pub(crate) fn parse_media_entry(media_id: &str, body: &Value) -> Result<MediaMetadata, KalturaError> {
    if body["objectType"].as_str() == Some("KalturaAPIException") {
        let code = body["code"].as_str().unwrap_or_default();
        let message = body["message"].as_str().unwrap_or("unknown error");
        if NOT_FOUND_CODES.contains(&code) {
            return Err(KalturaError::NotFound(media_id.to_string()));
        }
        return Err(KalturaError::Network(format!("{}: {}", code, message)));
    }

    if !body.is_object() {
        return Err(KalturaError::Network(format!(
            "Unexpected response for {}",
            media_id
        )));
    }

    let duration_ms = body["msDuration"]
        .as_u64()
        .or_else(|| body["msDuration"].as_f64().map(|ms| ms.max(0.0) as u64))
        .unwrap_or(0);

    Ok(MediaMetadata {
        name: body["name"].as_str().unwrap_or_default().to_string(),
        duration_ms,
    })
}
