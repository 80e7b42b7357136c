pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::llm::ChatCompletionClient;
pub use crate::config::AppConfig;
pub use crate::core::{prompt::PromptComposer, storyteller::StoryEngine};
pub use crate::domain::model::{GeneratedStory, GenerationParams, Style, StoryRequest};
pub use crate::utils::error::{Result, StoryError};
