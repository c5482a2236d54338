use serde::{Deserialize, Serialize};

/// Body of `POST /api/batch-generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRequest {
    pub prompt: String,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(rename = "aspectRatio")]
    pub aspect_ratio: Option<String>,
    pub iterations: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub results: Vec<WorkResult>,
}

/// Outcome of one (style, iteration) unit of work. Serialized camelCase to
/// match the wire contract consumed by the front-end.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum WorkResult {
    #[serde(rename_all = "camelCase")]
    Success {
        style_id: String,
        iteration_id: u32,
        improved_prompt: String,
        image_url: String,
    },
    #[serde(rename_all = "camelCase")]
    Failure {
        style_id: String,
        iteration_id: u32,
        error: String,
    },
}

impl WorkResult {
    pub fn style_id(&self) -> &str {
        match self {
            WorkResult::Success { style_id, .. } | WorkResult::Failure { style_id, .. } => style_id,
        }
    }

    pub fn iteration_id(&self) -> u32 {
        match self {
            WorkResult::Success { iteration_id, .. }
            | WorkResult::Failure { iteration_id, .. } => *iteration_id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, WorkResult::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_serializes_camel_case() {
        let result = WorkResult::Success {
            style_id: "art-oil".into(),
            iteration_id: 2,
            improved_prompt: "an oil painting".into(),
            image_url: "/generated/imagen-a-cat-1700000000000.png".into(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["styleId"], "art-oil");
        assert_eq!(json["iterationId"], 2);
        assert_eq!(json["improvedPrompt"], "an oil painting");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn failure_carries_error_without_image_url() {
        let result = WorkResult::Failure {
            style_id: "art-oil".into(),
            iteration_id: 1,
            error: "No image data in response".into(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["error"], "No image data in response");
        assert!(json.get("imageUrl").is_none());
    }

    #[test]
    fn iterations_default_to_none() {
        let request: BatchRequest =
            serde_json::from_str(r#"{"prompt":"a cat","styles":["art-oil"]}"#).unwrap();
        assert_eq!(request.iterations, None);
        assert_eq!(request.aspect_ratio, None);
    }
}
