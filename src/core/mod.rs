pub mod prompt;
pub mod sanitize;
pub mod storyteller;

pub use crate::domain::model::{GeneratedStory, GenerationParams, Style, StoryRequest};
pub use crate::domain::ports::{ConfigProvider, TextGenerator};
pub use crate::utils::error::Result;
