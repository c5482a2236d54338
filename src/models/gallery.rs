use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One generated image as reported by the listing endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StoredImage {
    pub id: String,
    pub url: String,
    pub prompt: String,
    pub styles: Vec<String>,
    #[serde(rename = "aspectRatio", skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    pub timestamp: String,
}

/// Sidecar metadata written next to each PNG. The filename remains parseable
/// on its own, but the sidecar is the authoritative record and carries the
/// fields a filename cannot (full prompt, styles, aspect ratio).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub id: String,
    pub prompt: String,
    pub styles: Vec<String>,
    #[serde(rename = "aspectRatio")]
    pub aspect_ratio: String,
    pub timestamp: i64,
}

/// Formats an epoch-milliseconds timestamp the way the gallery displays it.
pub fn format_timestamp(epoch_millis: i64) -> String {
    let time: DateTime<Utc> = Utc
        .timestamp_millis_opt(epoch_millis)
        .single()
        .unwrap_or_else(Utc::now);
    time.format("%H:%M, %d/%m/%Y").to_string()
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub images: Vec<StoredImage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_formats_as_time_then_date() {
        // 2023-11-14 22:13:20 UTC
        assert_eq!(format_timestamp(1_700_000_000_000), "22:13, 14/11/2023");
    }

    #[test]
    fn metadata_round_trips_aspect_ratio_field_name() {
        let metadata = ImageMetadata {
            id: "1700000000000".into(),
            prompt: "a cat".into(),
            styles: vec!["art-oil".into()],
            aspect_ratio: "1:1".into(),
            timestamp: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["aspectRatio"], "1:1");
        let back: ImageMetadata = serde_json::from_value(json).unwrap();
        assert_eq!(back.prompt, "a cat");
    }
}
