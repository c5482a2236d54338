use serde::{Deserialize, Serialize};
use serde_json::json;

/// Body of `POST /api/generate`. The aspect ratio arrives as a raw string and
/// is validated against the supported set before any remote call.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(rename = "aspectRatio")]
    pub aspect_ratio: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub url: String,
}

/// Imagen `:predict` request payload.
pub fn imagen_payload(prompt: &str, aspect_ratio: &str) -> serde_json::Value {
    json!({
        "instances": {
            "prompt": prompt,
        },
        "parameters": {
            "sampleCount": 1,
            "aspectRatio": aspect_ratio,
        }
    })
}

#[derive(Debug, Deserialize)]
pub struct ImagenResponse {
    #[serde(default)]
    pub predictions: Vec<ImagenPrediction>,
}

#[derive(Debug, Deserialize)]
pub struct ImagenPrediction {
    #[serde(rename = "bytesBase64Encoded")]
    pub bytes_base64_encoded: Option<String>,
}

impl ImagenResponse {
    pub fn first_image_base64(&self) -> Option<&str> {
        self.predictions
            .first()?
            .bytes_base64_encoded
            .as_deref()
            .filter(|data| !data.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_requests_one_sample_at_given_ratio() {
        let payload = imagen_payload("a majestic willow tree", "16:9");
        assert_eq!(payload["parameters"]["sampleCount"], 1);
        assert_eq!(payload["parameters"]["aspectRatio"], "16:9");
        assert_eq!(payload["instances"]["prompt"], "a majestic willow tree");
    }

    #[test]
    fn missing_image_data_is_none() {
        let response: ImagenResponse = serde_json::from_str(r#"{"predictions":[]}"#).unwrap();
        assert!(response.first_image_base64().is_none());
        let response: ImagenResponse =
            serde_json::from_str(r#"{"predictions":[{"bytesBase64Encoded":""}]}"#).unwrap();
        assert!(response.first_image_base64().is_none());
    }

    #[test]
    fn present_image_data_is_returned() {
        let response: ImagenResponse =
            serde_json::from_str(r#"{"predictions":[{"bytesBase64Encoded":"aGk="}]}"#).unwrap();
        assert_eq!(response.first_image_base64(), Some("aGk="));
    }
}
