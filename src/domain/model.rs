use crate::utils::error::{Result, StoryError};
use crate::utils::validation::Validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 一次表單提交；渲染完即丟棄
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryRequest {
    pub name: String,
    pub region: String,
    #[serde(default)]
    pub style: Style,
}

impl StoryRequest {
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            style: Style::default(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Validate for StoryRequest {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.region.trim().is_empty() {
            return Err(StoryError::ValidationError {
                message: "Please enter a name and choose a region.".to_string(),
            });
        }
        Ok(())
    }
}

/// 從 API 回應建立，只存活於當次渲染
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedStory {
    pub text: String,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Style {
    #[default]
    Epic,
    Mystic,
    Royal,
    Poet,
}

impl Style {
    pub const ALL: [Style; 4] = [Style::Epic, Style::Mystic, Style::Royal, Style::Poet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Epic => "Epic",
            Style::Mystic => "Mystic",
            Style::Royal => "Royal",
            Style::Poet => "Poet",
        }
    }

    /// 提示詞中使用的小寫語氣
    pub fn tone(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = StoryError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Style::default());
        }
        Style::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| StoryError::ValidationError {
                message: format!("Unknown style: {}", trimmed),
            })
    }
}

/// 生成參數：模型、最大長度、溫度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}
