use crate::{
    config::GoogleAiConfig,
    error::{GenError, Result, MAX_PROMPT_TOKENS},
    models::{GeminiContent, GeminiPart, GeminiRequest, GeminiResponse, SafetySetting},
    styles,
};

/// Client for the Gemini `generateContent` endpoint, used to rewrite a raw
/// user prompt into an Imagen-ready one.
#[derive(Clone)]
pub struct PromptClient {
    http: reqwest::Client,
    config: GoogleAiConfig,
}

/// Rough token estimate used to bound prompt size before calling out.
pub fn estimate_tokens(text: &str) -> usize {
    (text.chars().count() as f64 / 4.5).ceil() as usize
}

impl PromptClient {
    pub fn new(http: reqwest::Client, config: GoogleAiConfig) -> Self {
        Self { http, config }
    }

    /// Produces one improved prompt for `prompt` under the given styles.
    /// `prompt_memory` holds the prompts already produced in the current
    /// batch; when non-empty the instruction block asks for a variation
    /// distinct from every one of them. The memory itself is never mutated
    /// here; appending on success is the caller's job.
    pub async fn enhance(
        &self,
        prompt: &str,
        style_ids: &[String],
        prompt_memory: &[String],
    ) -> Result<String> {
        let estimated = estimate_tokens(prompt);
        if estimated > MAX_PROMPT_TOKENS {
            return Err(GenError::PromptTooLong { estimated });
        }

        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            log::error!("Gemini API key not configured");
            GenError::NotConfigured
        })?;

        let instructions = build_instructions(prompt, style_ids, prompt_memory);
        let payload = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: instructions }],
            }],
            safety_settings: SafetySetting::defaults(),
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url(),
            self.config.gemini_model()
        );

        log::info!(
            "Requesting prompt suggestion from {} ({} styles, {} prompts in memory)",
            self.config.gemini_model(),
            style_ids.len(),
            prompt_memory.len()
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                log::error!("Gemini request error: {}", e);
                GenError::SuggestionUnavailable
            })?;

        if !response.status().is_success() {
            log::error!("Gemini returned status {}", response.status());
            return Err(GenError::SuggestionUnavailable);
        }

        let body: GeminiResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse Gemini response: {}", e);
            GenError::SuggestionUnavailable
        })?;

        body.first_text().ok_or(GenError::SuggestionUnavailable)
    }
}

/// Builds the single instructional text block sent to Gemini: the original
/// prompt, the resolved style names, and the enumerated previous prompts when
/// the batch has already produced some.
pub fn build_instructions(prompt: &str, style_ids: &[String], prompt_memory: &[String]) -> String {
    let style_names = styles::display_names(style_ids);

    let previous_prompts_context = if prompt_memory.is_empty() {
        String::new()
    } else {
        let listed = prompt_memory
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "\nPrevious prompts in this batch:\n{listed}\n\n\
             Based on the previous prompts above, create a DIFFERENT variation that maintains \
             the core theme of \"{prompt}\" but explores a new aspect, perspective, or interpretation.\n"
        )
    };

    format!(
        "Please enhance the following image prompt to be more effective for Google Imagen 3.\n\
\n\
{previous_prompts_context}\n\
A good starting point can be to think of subject, context, and style.\n\
\n\
To create a more compelling and visually rich image, focus on these aspects:\n\
\n\
1. Subject Clarity and Detail:\n\
    - Ensure the subject of the image is very clear and specific. Instead of vague terms, use precise nouns and descriptions.\n\
    - Add details about the subject's appearance, pose, and any unique characteristics.\n\
\n\
2. Context and Background Enrichment:\n\
    - Describe a vivid and relevant background that complements the subject and style.\n\
    - Consider the environment, setting, and atmosphere. Is it indoors or outdoors? What time of day is it? What's the mood?\n\
\n\
3. Style Deep Dive:\n\
    - For photography styles, suggest photography modifiers: camera proximity (\"close-up photo\", \"aerial photo\"), \
camera position (\"from below\", \"eye-level view\"), lighting (\"golden hour\", \"studio lighting\"), camera settings \
(\"bokeh\", \"long exposure\"), lens types (\"35mm lens\", \"macro lens\"), film types (\"black and white film\", \
\"polaroid photo\"), and image quality (\"4K\", \"HDR\", \"photorealistic\").\n\
    - For art and illustration styles, consider historical references and techniques relevant to the style, artists or \
art movements where applicable, artistic mediums (\"watercolor washes\", \"oil painting with thick brushstrokes\"), and \
quality modifiers like \"detailed\" or \"by a professional illustrator\".\n\
    - For abstract and special styles, encourage conceptual descriptions: shapes, colors, textures, and composition for \
abstract work; defining elements for special styles (\"cyberpunk cityscape with neon lights\", \"gothic architecture \
with dark atmosphere\", \"surreal scene with dreamlike qualities\").\n\
    - For traditional art movements (Cubism, Ukiyo-e, Renaissance, Impressionism, Expressionism, Pointillism, \
Art Nouveau, Baroque, Romanticism), emphasize the defining characteristics of the movement.\n\
    - For app icon styles, generate only the icon content itself, never a device-specific presentation with rounded \
corners: clean silhouettes for flat icons, smooth color transitions for gradient icons, depth cues for 3D icons, \
consistent stroke weights for outlined icons, 30-degree perspective for isometric icons.\n\
    - For Etsy-style illustrations, design printable card illustrations rather than card mockups: soft edges and color \
bleeds for watercolor, tactile imperfections for handcrafted work, period-accurate textures for vintage, scientific \
accuracy for botanical, cultural motifs for folk art.\n\
\n\
4. Descriptive Language Expansion:\n\
    - Use more descriptive adjectives and adverbs to enhance every aspect of the prompt.\n\
    - Example: Instead of \"a tree\", suggest \"a majestic willow tree with weeping branches\".\n\
\n\
Original Prompt: {prompt}\n\
User Selected Styles: {style_names}\n\
\n\
Instructions for Output:\n\
- Provide only the improved and enhanced prompt text.\n\
- Ensure the improved prompt is ready to be directly used for image generation with Google Imagen 3.\n\
- Do not include any extra explanations, conversational text, or introductions. Just the refined prompt.\n"
    )
}
