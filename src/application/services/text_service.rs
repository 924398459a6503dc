//! Text Service - 文本生成编排
//!
//! 包装上游文本生成调用，对话历史先展开为单条 prompt

use std::sync::Arc;

use crate::application::error::ServiceError;
use crate::application::ports::{GenerationPort, TextParams};
use crate::domain::{format_history, ChatMessage};

/// 文本生成服务
#[derive(Clone)]
pub struct TextService {
    engine: Arc<dyn GenerationPort>,
}

impl TextService {
    pub fn new(engine: Arc<dyn GenerationPort>) -> Self {
        Self { engine }
    }

    /// 生成文本
    pub async fn generate(&self, prompt: &str, params: &TextParams) -> Result<String, ServiceError> {
        if prompt.trim().is_empty() {
            return Err(ServiceError::validation("prompt must not be empty"));
        }

        let text = self.engine.generate_text(prompt, params).await?;

        tracing::info!(response_len = text.len(), "Text generation completed");
        Ok(text)
    }

    /// 基于对话历史生成文本
    pub async fn generate_with_history(
        &self,
        messages: &[ChatMessage],
        params: &TextParams,
    ) -> Result<String, ServiceError> {
        if messages.is_empty() {
            return Err(ServiceError::validation("messages must not be empty"));
        }

        let prompt = format_history(messages);
        self.generate(&prompt, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::gemini::FakeGenerationClient;

    fn service_with_fake() -> (TextService, Arc<FakeGenerationClient>) {
        let fake = Arc::new(FakeGenerationClient::new());
        (TextService::new(fake.clone()), fake)
    }

    #[tokio::test]
    async fn test_generate_returns_text() {
        let (service, fake) = service_with_fake();
        let text = service
            .generate("say hello", &TextParams::default())
            .await
            .unwrap();
        assert_eq!(text, "generated text");
        assert_eq!(fake.text_calls(), 1);
    }

    #[tokio::test]
    async fn test_generate_rejects_blank_prompt() {
        let (service, fake) = service_with_fake();
        let err = service
            .generate("   ", &TextParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(fake.text_calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_with_history_rejects_empty() {
        let (service, _) = service_with_fake();
        let err = service
            .generate_with_history(&[], &TextParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_generate_with_history_flattens_messages() {
        let (service, fake) = service_with_fake();
        let messages = vec![ChatMessage {
            role: "user".to_string(),
            content: "hi".to_string(),
        }];
        service
            .generate_with_history(&messages, &TextParams::default())
            .await
            .unwrap();
        let prompt = fake.last_prompt().unwrap();
        assert!(prompt.contains("User: hi"));
    }
}
