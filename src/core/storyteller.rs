use crate::core::prompt::PromptComposer;
use crate::core::sanitize;
use crate::core::{ConfigProvider, GenerationParams, GeneratedStory, StoryRequest, TextGenerator};
use crate::utils::error::{Result, StoryError};
use crate::utils::validation::Validate;
use chrono::Utc;

/// submit → compose → 呼叫外部 API → 回傳故事
pub struct StoryEngine<G: TextGenerator> {
    generator: G,
    composer: PromptComposer,
    params: GenerationParams,
    sanitize: bool,
}

impl<G: TextGenerator> StoryEngine<G> {
    pub fn new(generator: G, composer: PromptComposer, params: GenerationParams) -> Self {
        Self {
            generator,
            composer,
            params,
            sanitize: false,
        }
    }

    pub fn from_config<C: ConfigProvider>(generator: G, config: &C) -> Self {
        Self::new(
            generator,
            PromptComposer::new(config.prompt_template()),
            config.generation_params(),
        )
        .with_sanitize(config.sanitize_output())
    }

    pub fn with_sanitize(mut self, enabled: bool) -> Self {
        self.sanitize = enabled;
        self
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub async fn weave(&self, request: &StoryRequest) -> Result<GeneratedStory> {
        request.validate()?;

        let prompt = self.composer.compose(request);
        tracing::debug!(
            "Composed prompt ({} chars) for region '{}' in {} style",
            prompt.chars().count(),
            request.region,
            request.style
        );

        let raw = self.generator.complete(&prompt, &self.params).await?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(StoryError::EmptyCompletion);
        }

        let text = if self.sanitize {
            sanitize::postprocess(raw)
        } else {
            raw.to_string()
        };

        tracing::info!(
            "📜 Scroll woven with {} ({} chars)",
            self.params.model,
            text.chars().count()
        );

        Ok(GeneratedStory {
            text,
            model: self.params.model.clone(),
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockGenerator {
        reply: std::result::Result<String, u16>,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    impl MockGenerator {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                prompts: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                prompts: Arc::new(Mutex::new(Vec::new())),
            }
        }

        async fn seen_prompts(&self) -> Vec<String> {
            self.prompts.lock().await.clone()
        }
    }

    #[async_trait]
    impl TextGenerator for MockGenerator {
        async fn complete(&self, prompt: &str, _params: &GenerationParams) -> Result<String> {
            self.prompts.lock().await.push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(StoryError::UpstreamError {
                    status: *status,
                    body: "mock failure".to_string(),
                }),
            }
        }
    }

    fn params() -> GenerationParams {
        GenerationParams {
            model: "llama3-8b-8192".to_string(),
            max_tokens: 320,
            temperature: 0.85,
        }
    }

    #[tokio::test]
    async fn test_weave_returns_generated_text_unchanged() {
        let generator = MockGenerator::replying("In the hills of Pasargadae, Cyrus...");
        let engine = StoryEngine::new(generator.clone(), PromptComposer::default(), params());

        let story = engine
            .weave(&StoryRequest::new("Cyrus", "Pasargadae"))
            .await
            .unwrap();

        assert_eq!(story.text, "In the hills of Pasargadae, Cyrus...");
        assert_eq!(story.model, "llama3-8b-8192");

        let prompts = generator.seen_prompts().await;
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Cyrus"));
        assert!(prompts[0].contains("Pasargadae"));
    }

    #[tokio::test]
    async fn test_weave_trims_surrounding_whitespace() {
        let engine = StoryEngine::new(
            MockGenerator::replying("\n  A scroll.  \n"),
            PromptComposer::default(),
            params(),
        );
        let story = engine
            .weave(&StoryRequest::new("Roxana", "Sogdia"))
            .await
            .unwrap();
        assert_eq!(story.text, "A scroll.");
    }

    #[tokio::test]
    async fn test_weave_rejects_empty_input_without_calling_api() {
        let generator = MockGenerator::replying("unused");
        let engine = StoryEngine::new(generator.clone(), PromptComposer::default(), params());

        let err = engine
            .weave(&StoryRequest::new("", "Persis"))
            .await
            .unwrap_err();

        assert!(matches!(err, StoryError::ValidationError { .. }));
        assert!(generator.seen_prompts().await.is_empty());
    }

    #[tokio::test]
    async fn test_weave_propagates_upstream_failure() {
        let engine = StoryEngine::new(
            MockGenerator::failing(429),
            PromptComposer::default(),
            params(),
        );
        let err = engine
            .weave(&StoryRequest::new("Daniel", "Persis"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoryError::UpstreamError { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_blank_completion_is_an_error() {
        let engine = StoryEngine::new(
            MockGenerator::replying("   "),
            PromptComposer::default(),
            params(),
        );
        let err = engine
            .weave(&StoryRequest::new("Daniel", "Persis"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoryError::EmptyCompletion));
    }

    #[test]
    fn test_sanitize_applies_when_enabled() {
        let engine = StoryEngine::new(
            MockGenerator::replying("Cyrus kept his dharma  close."),
            PromptComposer::default(),
            params(),
        )
        .with_sanitize(true);

        let story =
            tokio_test::block_on(engine.weave(&StoryRequest::new("Cyrus", "Persis"))).unwrap();
        assert_eq!(story.text, "Kourosh (Cyrus) kept his close.");
    }
}
