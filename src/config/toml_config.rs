use crate::core::prompt::DEFAULT_TEMPLATE;
use crate::core::{ConfigProvider, GenerationParams};
use crate::utils::error::{Result, StoryError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "0.0.0.0:8501";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub generation: GenerationConfig,
    pub prompt: PromptConfig,
    pub postprocess: PostprocessConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// 分享連結用的公開網址
    pub app_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            app_url: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Groq,
    OpenAi,
}

impl ProviderKind {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "https://api.groq.com/openai/v1",
            ProviderKind::OpenAi => "https://api.openai.com/v1",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "llama3-8b-8192",
            ProviderKind::OpenAi => "gpt-4o-mini",
        }
    }

    pub fn api_key_var(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "GROQ_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
        }
    }

    pub fn model_var(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "GROQ_MODEL",
            ProviderKind::OpenAi => "OPENAI_MODEL",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "groq" => Ok(ProviderKind::Groq),
            "openai" => Ok(ProviderKind::OpenAi),
            other => Err(StoryError::InvalidConfigValueError {
                field: "provider.kind".to_string(),
                value: other.to_string(),
                reason: "Unsupported provider. Use 'groq' or 'openai'".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.85,
            max_tokens: 320,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub template: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostprocessConfig {
    pub sanitize: bool,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StoryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let mut config: AppConfig =
            toml::from_str(&processed_content).map_err(|e| StoryError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;
        config.fill_api_key_from_env();
        Ok(config)
    }

    /// 沒有設定檔時從環境變數組出配置
    pub fn from_env() -> Result<Self> {
        let kind = match env::var("PROVIDER") {
            Ok(value) if !value.trim().is_empty() => ProviderKind::parse(&value)?,
            _ => ProviderKind::default(),
        };

        let max_tokens = match env::var("MAX_TOKENS") {
            Ok(value) => value.trim().parse().map_err(|_| StoryError::InvalidConfigValueError {
                field: "MAX_TOKENS".to_string(),
                value: value.clone(),
                reason: "Must be a positive integer".to_string(),
            })?,
            Err(_) => GenerationConfig::default().max_tokens,
        };

        let temperature = match env::var("TEMPERATURE") {
            Ok(value) => value.trim().parse().map_err(|_| StoryError::InvalidConfigValueError {
                field: "TEMPERATURE".to_string(),
                value: value.clone(),
                reason: "Must be a number".to_string(),
            })?,
            Err(_) => GenerationConfig::default().temperature,
        };

        Ok(Self {
            server: ServerConfig {
                bind: env::var("BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string()),
                app_url: non_empty_var("APP_URL"),
            },
            provider: ProviderConfig {
                kind,
                api_key: non_empty_var(kind.api_key_var()),
                base_url: non_empty_var("LLM_BASE_URL"),
                model: non_empty_var(kind.model_var()),
                timeout_seconds: None,
            },
            generation: GenerationConfig {
                temperature,
                max_tokens,
            },
            prompt: PromptConfig::default(),
            postprocess: PostprocessConfig {
                sanitize: env::var("SANITIZE")
                    .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                    .unwrap_or(false),
            },
        })
    }

    /// 設定檔存在則讀檔，否則讀環境變數
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_env(),
        }
    }

    /// 替換環境變數 (例如 ${GROQ_API_KEY})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;

        static ENV_VAR: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    // 設定檔沒寫 api_key 時沿用供應商的環境變數
    fn fill_api_key_from_env(&mut self) {
        let unresolved = self
            .provider
            .api_key
            .as_deref()
            .map(|key| key.trim().is_empty() || key.starts_with("${"))
            .unwrap_or(true);
        if unresolved {
            if let Some(key) = non_empty_var(self.provider.kind.api_key_var()) {
                self.provider.api_key = Some(key);
            }
        }
    }

    pub fn base_url(&self) -> &str {
        self.provider
            .base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.kind.default_base_url())
    }

    pub fn model(&self) -> &str {
        self.provider
            .model
            .as_deref()
            .unwrap_or_else(|| self.provider.kind.default_model())
    }

    pub fn api_key(&self) -> Result<&str> {
        validation::validate_required_field("provider.api_key", &self.provider.api_key)
            .map(String::as_str)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.provider.timeout_seconds.map(Duration::from_secs)
    }

    pub fn app_url(&self) -> Option<&str> {
        self.server.app_url.as_deref().filter(|url| !url.is_empty())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl ConfigProvider for AppConfig {
    fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            model: self.model().to_string(),
            max_tokens: self.generation.max_tokens,
            temperature: self.generation.temperature,
        }
    }

    fn prompt_template(&self) -> &str {
        self.prompt.template.as_deref().unwrap_or(DEFAULT_TEMPLATE)
    }

    fn sanitize_output(&self) -> bool {
        self.postprocess.sanitize
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.bind", &self.server.bind)?;
        if let Some(app_url) = self.app_url() {
            validation::validate_url("server.app_url", app_url)?;
        }

        validation::validate_url("provider.base_url", self.base_url())?;
        validation::validate_non_empty_string("provider.model", self.model())?;

        let api_key = self.api_key()?;
        validation::validate_non_empty_string("provider.api_key", api_key)?;
        if api_key.starts_with("${") {
            return Err(StoryError::MissingConfigError {
                field: format!("provider.api_key ({})", api_key),
            });
        }

        validation::validate_range("generation.temperature", self.generation.temperature, 0.0, 2.0)?;
        validation::validate_positive_number("generation.max_tokens", self.generation.max_tokens, 1)?;
        if let Some(timeout) = self.provider.timeout_seconds {
            validation::validate_positive_number("provider.timeout_seconds", timeout, 1)?;
        }
        validation::validate_contains(
            "prompt.template",
            self.prompt_template(),
            &["{name}", "{region}"],
        )?;

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
