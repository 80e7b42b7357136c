use crate::utils::error::{Result, StoryError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(StoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(StoryError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(StoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min_value: T,
) -> Result<()> {
    if value < min_value {
        return Err(StoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| StoryError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(StoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_contains(field_name: &str, value: &str, required: &[&str]) -> Result<()> {
    for needle in required {
        if !value.contains(needle) {
            return Err(StoryError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.chars().take(40).collect(),
                reason: format!("Must contain the placeholder {}", needle),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("provider.base_url", "https://api.groq.com/openai/v1").is_ok());
        assert!(validate_url("provider.base_url", "http://localhost:8080").is_ok());
        assert!(validate_url("provider.base_url", "").is_err());
        assert!(validate_url("provider.base_url", "invalid-url").is_err());
        assert!(validate_url("provider.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("generation.max_tokens", 320, 1).is_ok());
        assert!(validate_positive_number("generation.max_tokens", 0, 1).is_err());
        assert!(validate_positive_number("provider.timeout_seconds", 0u64, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("generation.temperature", 0.85, 0.0, 2.0).is_ok());
        assert!(validate_range("generation.temperature", 2.5, 0.0, 2.0).is_err());
        assert!(validate_range("generation.temperature", -0.1, 0.0, 2.0).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let key: Option<String> = None;
        let err = validate_required_field("provider.api_key", &key).unwrap_err();
        assert!(matches!(err, StoryError::MissingConfigError { field } if field == "provider.api_key"));
    }

    #[test]
    fn test_validate_contains() {
        assert!(validate_contains("prompt.template", "{name} of {region}", &["{name}", "{region}"]).is_ok());
        assert!(validate_contains("prompt.template", "{name} only", &["{name}", "{region}"]).is_err());
    }
}
