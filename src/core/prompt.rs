use crate::domain::model::StoryRequest;
use crate::domain::regions::region_hint;
use regex::{Captures, Regex};
use std::sync::LazyLock;

pub const DEFAULT_TEMPLATE: &str = r#"You are a cultural historian and storyteller of ancient Iran.
Write a short persona scroll (4–5 sentences) about {name}, set in the historical region of {region}.

Context for accuracy: {hint}

STRICT RULES:
- Use ONLY Iranian/Persian terminology (Old Persian, Avestan, Middle Persian/Pahlavi, New Persian).
- Prefer IRANIAN ENDONYMS; if you include the more common Greek/Latin exonym, put it once in parentheses after the first mention. Examples:
  - Zarathustra (not Zoroaster)
  - Mithra (not Mithras)
  - Anāhitā (not Anaitis)
  - Kourosh (Cyrus) • Dariush (Darius) • Khashayarsha (Xerxes) • Ardeshir (Artaxerxes)
  - Parsa / Takht-e Jamshid (Persepolis), Pasargad (Pasargadae), Hagmatāna/Hamadan (Ecbatana),
    Gorgan/Varkāna (Hyrcania), Shush (Susa), Tisfun (Ctesiphon)
- DO NOT use Indic/Sanskrit terms (e.g., dharma, karma, kshatra/kṣatra).
- Use clear modern English; gloss any Persian term in brackets if needed (e.g., farrah/farr (divine glory)).
- Keep the tone {tone} and culturally faithful to Iranian history/myth.
- Return ONLY the scroll text.
"#;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(name|region|hint|tone)\}").expect("placeholder pattern"));

/// 將表單欄位套入固定模板
#[derive(Debug, Clone)]
pub struct PromptComposer {
    template: String,
}

impl PromptComposer {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// 單次掃描替換，使用者輸入中的 `{...}` 不會再被展開
    pub fn compose(&self, request: &StoryRequest) -> String {
        let hint = region_hint(&request.region);
        let tone = request.style.tone();

        PLACEHOLDER
            .replace_all(&self.template, |caps: &Captures| match &caps[1] {
                "name" => request.name.clone(),
                "region" => request.region.clone(),
                "hint" => hint.to_string(),
                _ => tone.clone(),
            })
            .trim()
            .to_string()
    }
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Style;

    #[test]
    fn test_prompt_contains_name_and_region_verbatim() {
        let composer = PromptComposer::default();
        let prompt = composer.compose(&StoryRequest::new("Cyrus", "Pasargadae"));

        assert!(prompt.contains("about Cyrus,"));
        assert!(prompt.contains("region of Pasargadae."));
    }

    #[test]
    fn test_prompt_keeps_unusual_input_intact() {
        let composer = PromptComposer::default();
        let name = "Mähsa {region} <Ārash>";
        let region = "  Zābol & beyond ";
        let prompt = composer.compose(&StoryRequest::new(name, region));

        assert!(prompt.contains(name));
        assert!(prompt.contains(region));
    }

    #[test]
    fn test_known_region_injects_hint_and_tone() {
        let composer = PromptComposer::default();
        let request = StoryRequest::new("Roxana", "Khorasan").with_style(Style::Mystic);
        let prompt = composer.compose(&request);

        assert!(prompt.contains("legendary frontiers in the Shahnameh"));
        assert!(prompt.contains("Keep the tone mystic"));
    }

    #[test]
    fn test_unknown_region_leaves_hint_empty() {
        let composer = PromptComposer::new("{name}|{region}|{hint}|{tone}");
        let prompt = composer.compose(&StoryRequest::new("Daniel", "Atlantis"));

        assert_eq!(prompt, "Daniel|Atlantis||epic");
    }

    #[test]
    fn test_custom_template_is_used() {
        let composer = PromptComposer::new(
            "Write a Persian-mythology-styled backstory for a person named {name} from {region}.",
        );
        let prompt = composer.compose(&StoryRequest::new("Cyrus", "Pasargadae"));

        assert_eq!(
            prompt,
            "Write a Persian-mythology-styled backstory for a person named Cyrus from Pasargadae."
        );
    }
}
