use crate::domain::model::GenerationParams;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 外部文字生成服務
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn generation_params(&self) -> GenerationParams;
    fn prompt_template(&self) -> &str;
    fn sanitize_output(&self) -> bool;
}
