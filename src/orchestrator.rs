use crate::{
    error::{GenError, Result, MAX_BATCH_IMAGES},
    google::{ImageClient, PromptClient},
    models::{AspectRatio, WorkResult},
    storage::ImageStore,
};
use async_trait::async_trait;

/// Iteration counts outside [1, MAX_ITERATIONS] are clamped, not rejected.
pub const MAX_ITERATIONS: u32 = 10;

#[async_trait]
pub trait PromptEnhancer: Send + Sync {
    async fn enhance(
        &self,
        prompt: &str,
        style_ids: &[String],
        prompt_memory: &[String],
    ) -> Result<String>;
}

#[async_trait]
impl PromptEnhancer for PromptClient {
    async fn enhance(
        &self,
        prompt: &str,
        style_ids: &[String],
        prompt_memory: &[String],
    ) -> Result<String> {
        PromptClient::enhance(self, prompt, style_ids, prompt_memory).await
    }
}

#[async_trait]
pub trait ImageSynthesizer: Send + Sync {
    async fn synthesize(
        &self,
        prompt: &str,
        style_ids: &[String],
        aspect_ratio: AspectRatio,
    ) -> Result<String>;
}

/// Production synthesizer: one remote Imagen call, then persistence through
/// the image store. Returns the stored file's public URL.
pub struct Synthesizer {
    client: ImageClient,
    store: ImageStore,
}

impl Synthesizer {
    pub fn new(client: ImageClient, store: ImageStore) -> Self {
        Self { client, store }
    }
}

#[async_trait]
impl ImageSynthesizer for Synthesizer {
    async fn synthesize(
        &self,
        prompt: &str,
        style_ids: &[String],
        aspect_ratio: AspectRatio,
    ) -> Result<String> {
        let base64_data = self.client.generate(prompt, style_ids, aspect_ratio).await?;
        self.store
            .save(&base64_data, prompt, style_ids, aspect_ratio.as_str())
            .await
    }
}

/// Lifecycle of one (style, iteration) unit of work.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkState {
    Pending,
    EnhancingPrompt,
    Synthesizing { improved_prompt: String },
    Done { improved_prompt: String, image_url: String },
    Failed { error: String },
}

#[derive(Debug, Clone)]
pub struct WorkItem {
    pub style_id: String,
    pub iteration_id: u32,
    pub state: WorkState,
}

impl WorkItem {
    fn start_enhancing(&mut self) {
        debug_assert_eq!(self.state, WorkState::Pending);
        self.state = WorkState::EnhancingPrompt;
    }

    /// Accepts the improved prompt and moves on to synthesis.
    fn begin_synthesis(&mut self, improved_prompt: String) {
        debug_assert_eq!(self.state, WorkState::EnhancingPrompt);
        self.state = WorkState::Synthesizing { improved_prompt };
    }

    /// Completes the item, pairing the stored URL with the prompt accepted in
    /// `begin_synthesis`.
    fn complete(&mut self, image_url: String) {
        let state = std::mem::replace(&mut self.state, WorkState::Pending);
        self.state = match state {
            WorkState::Synthesizing { improved_prompt } => WorkState::Done {
                improved_prompt,
                image_url,
            },
            other => other,
        };
    }

    fn fail(&mut self, error: String) {
        self.state = WorkState::Failed { error };
    }

    fn into_result(self) -> WorkResult {
        match self.state {
            WorkState::Done {
                improved_prompt,
                image_url,
            } => WorkResult::Success {
                style_id: self.style_id,
                iteration_id: self.iteration_id,
                improved_prompt,
                image_url,
            },
            WorkState::Failed { error } => WorkResult::Failure {
                style_id: self.style_id,
                iteration_id: self.iteration_id,
                error,
            },
            state => WorkResult::Failure {
                style_id: self.style_id,
                iteration_id: self.iteration_id,
                error: format!("work item left in non-terminal state {:?}", state),
            },
        }
    }
}

/// Enumerates the batch's work items: input style order first, iteration
/// index ascending within each style.
pub fn plan(style_ids: &[String], iterations: u32) -> Vec<WorkItem> {
    style_ids
        .iter()
        .flat_map(|style_id| {
            (1..=iterations).map(move |iteration_id| WorkItem {
                style_id: style_id.clone(),
                iteration_id,
                state: WorkState::Pending,
            })
        })
        .collect()
}

/// Drives prompt enhancement and image synthesis for every (style, iteration)
/// pair of a batch, strictly sequentially. The rolling prompt memory is
/// shared across the whole batch so every enhancement call sees all
/// previously accepted prompts, which is what steers each new suggestion away
/// from the ones already produced. That dependency is also why the pairs
/// cannot run in parallel.
pub struct BatchOrchestrator<'a> {
    enhancer: &'a dyn PromptEnhancer,
    synthesizer: &'a dyn ImageSynthesizer,
}

impl<'a> BatchOrchestrator<'a> {
    pub fn new(enhancer: &'a dyn PromptEnhancer, synthesizer: &'a dyn ImageSynthesizer) -> Self {
        Self {
            enhancer,
            synthesizer,
        }
    }

    /// Runs one batch. The only whole-batch failures are the upfront
    /// validations; once processing starts, every unit of work yields a
    /// result and a mix of successes and failures is a normal outcome.
    pub async fn run(
        &self,
        prompt: &str,
        style_ids: &[String],
        aspect_ratio: AspectRatio,
        iterations: u32,
    ) -> Result<Vec<WorkResult>> {
        if prompt.is_empty() {
            return Err(GenError::InvalidInput("Prompt is required".into()));
        }
        if style_ids.is_empty() {
            return Err(GenError::InvalidInput(
                "At least one style is required".into(),
            ));
        }

        let iterations = iterations.clamp(1, MAX_ITERATIONS);
        let total = style_ids.len() * iterations as usize;
        if total > MAX_BATCH_IMAGES {
            return Err(GenError::BatchTooLarge(total));
        }

        log::info!(
            "Starting batch: {} styles x {} iterations = {} images",
            style_ids.len(),
            iterations,
            total
        );

        let mut prompt_memory: Vec<String> = Vec::new();
        let mut results = Vec::with_capacity(total);

        for mut item in plan(style_ids, iterations) {
            let style_id = item.style_id.clone();
            let style = std::slice::from_ref(&style_id);

            item.start_enhancing();
            let improved = match self.enhancer.enhance(prompt, style, &prompt_memory).await {
                Ok(improved) => improved,
                Err(e) => {
                    log::error!(
                        "Enhancement failed for {} iteration {}: {}",
                        item.style_id,
                        item.iteration_id,
                        e
                    );
                    item.fail(e.to_string());
                    results.push(item.into_result());
                    continue;
                }
            };

            // The accepted prompt enters memory before synthesis; a later
            // synthesis failure does not roll it back.
            prompt_memory.push(improved.clone());
            item.begin_synthesis(improved.clone());

            match self.synthesizer.synthesize(&improved, style, aspect_ratio).await {
                Ok(image_url) => item.complete(image_url),
                Err(e) => {
                    log::error!(
                        "Synthesis failed for {} iteration {}: {}",
                        item.style_id,
                        item.iteration_id,
                        e
                    );
                    item.fail(e.to_string());
                }
            }
            results.push(item.into_result());
        }

        let failures = results.iter().filter(|r| !r.is_success()).count();
        log::info!(
            "Batch finished: {} succeeded, {} failed",
            results.len() - failures,
            failures
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Enhancer double that records the memory snapshot of every call and
    /// fails on scripted call indexes (0-based).
    struct ScriptedEnhancer {
        seen_memory: Mutex<Vec<Vec<String>>>,
        fail_on: Vec<usize>,
    }

    impl ScriptedEnhancer {
        fn new(fail_on: Vec<usize>) -> Self {
            Self {
                seen_memory: Mutex::new(Vec::new()),
                fail_on,
            }
        }

        fn calls(&self) -> usize {
            self.seen_memory.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PromptEnhancer for ScriptedEnhancer {
        async fn enhance(
            &self,
            prompt: &str,
            style_ids: &[String],
            prompt_memory: &[String],
        ) -> Result<String> {
            let mut seen = self.seen_memory.lock().unwrap();
            let call = seen.len();
            seen.push(prompt_memory.to_vec());
            if self.fail_on.contains(&call) {
                return Err(GenError::SuggestionUnavailable);
            }
            Ok(format!("improved {} {} #{}", prompt, style_ids[0], call))
        }
    }

    /// Synthesizer double that counts calls and fails on scripted indexes.
    struct ScriptedSynthesizer {
        calls: Mutex<usize>,
        fail_on: Vec<usize>,
    }

    impl ScriptedSynthesizer {
        fn new(fail_on: Vec<usize>) -> Self {
            Self {
                calls: Mutex::new(0),
                fail_on,
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl ImageSynthesizer for ScriptedSynthesizer {
        async fn synthesize(
            &self,
            prompt: &str,
            _style_ids: &[String],
            _aspect_ratio: AspectRatio,
        ) -> Result<String> {
            let mut calls = self.calls.lock().unwrap();
            let call = *calls;
            *calls += 1;
            if self.fail_on.contains(&call) {
                return Err(GenError::NoImageData);
            }
            Ok(format!("/generated/imagen-{}-{}.png", prompt.len(), call))
        }
    }

    fn styles(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn work_item_transitions_end_in_a_success_result() {
        let mut item = plan(&styles(&["s"]), 1).remove(0);
        item.start_enhancing();
        assert_eq!(item.state, WorkState::EnhancingPrompt);
        item.begin_synthesis("an improved prompt".into());
        item.complete("/generated/imagen-x-1.png".into());
        match item.into_result() {
            WorkResult::Success {
                improved_prompt,
                image_url,
                ..
            } => {
                assert_eq!(improved_prompt, "an improved prompt");
                assert_eq!(image_url, "/generated/imagen-x-1.png");
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn work_item_can_fail_from_any_phase() {
        let mut item = plan(&styles(&["s"]), 1).remove(0);
        item.start_enhancing();
        item.fail("boom".into());
        match item.into_result() {
            WorkResult::Failure { error, .. } => assert_eq!(error, "boom"),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn plan_orders_by_style_then_iteration() {
        let items = plan(&styles(&["a", "b"]), 2);
        let order: Vec<(String, u32)> = items
            .iter()
            .map(|i| (i.style_id.clone(), i.iteration_id))
            .collect();
        assert_eq!(
            order,
            vec![
                ("a".into(), 1),
                ("a".into(), 2),
                ("b".into(), 1),
                ("b".into(), 2)
            ]
        );
        assert!(items.iter().all(|i| i.state == WorkState::Pending));
    }

    #[tokio::test]
    async fn memory_grows_with_each_successful_enhancement() {
        let enhancer = ScriptedEnhancer::new(vec![]);
        let synthesizer = ScriptedSynthesizer::new(vec![]);
        let orchestrator = BatchOrchestrator::new(&enhancer, &synthesizer);

        let results = orchestrator
            .run("a cat", &styles(&["photo-realistic"]), AspectRatio::Square, 2)
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].iteration_id(), 1);
        assert_eq!(results[1].iteration_id(), 2);
        assert!(results.iter().all(WorkResult::is_success));

        let seen = enhancer.seen_memory.lock().unwrap();
        assert!(seen[0].is_empty());
        assert_eq!(seen[1], vec!["improved a cat photo-realistic #0"]);
    }

    #[tokio::test]
    async fn results_follow_input_style_order() {
        let enhancer = ScriptedEnhancer::new(vec![]);
        let synthesizer = ScriptedSynthesizer::new(vec![]);
        let orchestrator = BatchOrchestrator::new(&enhancer, &synthesizer);

        let results = orchestrator
            .run("a cat", &styles(&["b-style", "a-style"]), AspectRatio::Wide, 2)
            .await
            .unwrap();

        let order: Vec<(&str, u32)> = results
            .iter()
            .map(|r| (r.style_id(), r.iteration_id()))
            .collect();
        assert_eq!(
            order,
            vec![("b-style", 1), ("b-style", 2), ("a-style", 1), ("a-style", 2)]
        );
    }

    #[tokio::test]
    async fn enhancer_failure_skips_memory_and_continues() {
        let enhancer = ScriptedEnhancer::new(vec![1]);
        let synthesizer = ScriptedSynthesizer::new(vec![]);
        let orchestrator = BatchOrchestrator::new(&enhancer, &synthesizer);

        let results = orchestrator
            .run("a cat", &styles(&["s"]), AspectRatio::Square, 3)
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_success());
        assert!(!results[1].is_success());
        assert!(results[2].is_success());

        // The failed call contributed nothing to memory; call 3 sees only the
        // two accepted prompts.
        let seen = enhancer.seen_memory.lock().unwrap();
        assert_eq!(seen[2].len(), 1);
        // Only successful enhancements reach the synthesizer.
        assert_eq!(synthesizer.calls(), 2);
    }

    #[tokio::test]
    async fn synthesis_failure_keeps_prompt_in_memory() {
        let enhancer = ScriptedEnhancer::new(vec![]);
        let synthesizer = ScriptedSynthesizer::new(vec![0]);
        let orchestrator = BatchOrchestrator::new(&enhancer, &synthesizer);

        let results = orchestrator
            .run("a cat", &styles(&["s"]), AspectRatio::Square, 2)
            .await
            .unwrap();

        match &results[0] {
            WorkResult::Failure { error, .. } => {
                assert_eq!(error, &GenError::NoImageData.to_string());
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(results[1].is_success());

        // The improved prompt from the failed pair is still visible to the
        // next enhancement call.
        let seen = enhancer.seen_memory.lock().unwrap();
        assert_eq!(seen[1].len(), 1);
    }

    #[tokio::test]
    async fn oversized_batch_is_rejected_without_remote_calls() {
        let enhancer = ScriptedEnhancer::new(vec![]);
        let synthesizer = ScriptedSynthesizer::new(vec![]);
        let orchestrator = BatchOrchestrator::new(&enhancer, &synthesizer);

        let many: Vec<String> = (0..11).map(|i| format!("style-{}", i)).collect();
        let err = orchestrator
            .run("a cat", &many, AspectRatio::Square, 3)
            .await;

        assert!(matches!(err, Err(GenError::BatchTooLarge(33))));
        assert_eq!(enhancer.calls(), 0);
        assert_eq!(synthesizer.calls(), 0);
    }

    #[tokio::test]
    async fn empty_styles_and_prompt_are_rejected() {
        let enhancer = ScriptedEnhancer::new(vec![]);
        let synthesizer = ScriptedSynthesizer::new(vec![]);
        let orchestrator = BatchOrchestrator::new(&enhancer, &synthesizer);

        let err = orchestrator.run("a cat", &[], AspectRatio::Square, 1).await;
        assert!(matches!(err, Err(GenError::InvalidInput(_))));

        let err = orchestrator
            .run("", &styles(&["s"]), AspectRatio::Square, 1)
            .await;
        assert!(matches!(err, Err(GenError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn iterations_are_clamped_to_bounds() {
        let enhancer = ScriptedEnhancer::new(vec![]);
        let synthesizer = ScriptedSynthesizer::new(vec![]);
        let orchestrator = BatchOrchestrator::new(&enhancer, &synthesizer);

        // 50 clamps down to 10; one style keeps the batch under the cap.
        let results = orchestrator
            .run("a cat", &styles(&["s"]), AspectRatio::Square, 50)
            .await
            .unwrap();
        assert_eq!(results.len(), 10);

        // 0 clamps up to 1.
        let results = orchestrator
            .run("a cat", &styles(&["s"]), AspectRatio::Square, 0)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
    }
}
