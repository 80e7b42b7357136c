use regex::{Captures, Regex};
use std::sync::LazyLock;

// 避免印度語系詞彙混入
const BANNED: [(&str, &str); 6] = [
    (r"(?i)\bkshatra\b", "xšaça (royal authority)"),
    (r"(?i)\bkṣatra\b", "xšaça (royal authority)"),
    (r"(?i)\bdharma\b", ""),
    (r"(?i)\bkarma\b", ""),
    (r"(?i)\bbrahman\b", ""),
    (r"(?i)\bchakra\b", ""),
];

const GREEK_TO_PERSIAN: [(&str, &str); 13] = [
    (r"(?i)\bZoroaster\b", "Zarathustra"),
    (r"(?i)\bMithras\b", "Mithra"),
    (r"(?i)\bAnaitis\b", "Anāhitā"),
    (r"(?i)\bCyrus\b", "Kourosh (Cyrus)"),
    (r"(?i)\bDarius\b", "Dariush (Darius)"),
    (r"(?i)\bXerxes\b", "Khashayarsha (Xerxes)"),
    (r"(?i)\bArtaxerxes\b", "Ardeshir (Artaxerxes)"),
    (r"(?i)\bPersepolis\b", "Parsa / Takht-e Jamshid (Persepolis)"),
    (r"(?i)\bPasargadae\b", "Pasargad (Pasargadae)"),
    (r"(?i)\bEcbatana\b", "Hagmatāna / Hamadan (Ecbatana)"),
    (r"(?i)\bHyrcania\b", "Gorgan / Varkāna (Hyrcania)"),
    (r"(?i)\bSusa\b", "Shush (Susa)"),
    (r"(?i)\bCtesiphon\b", "Tisfun (Ctesiphon)"),
];

fn compile(rules: &[(&str, &'static str)]) -> Vec<(Regex, &'static str)> {
    rules
        .iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).expect("static pattern"), *replacement))
        .collect()
}

static BANNED_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| compile(&BANNED));
static PERSIAN_RULES: LazyLock<Vec<(Regex, &'static str)>> =
    LazyLock::new(|| compile(&GREEK_TO_PERSIAN));
static INLINE_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("static pattern"));
static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("static pattern"));

fn tidy(text: &str) -> String {
    let out = INLINE_SPACES.replace_all(text, " ");
    BLANK_LINES.replace_all(&out, "\n\n").trim().to_string()
}

pub fn sanitize_non_iranian(text: &str) -> String {
    let mut out = text.to_string();
    for (pattern, replacement) in BANNED_RULES.iter() {
        out = pattern.replace_all(&out, *replacement).into_owned();
    }
    tidy(&out)
}

/// 外名改為伊朗本名；已在括號內的外名保持不動
pub fn prefer_persian_forms(text: &str) -> String {
    let mut out = text.to_string();
    for (pattern, replacement) in PERSIAN_RULES.iter() {
        let source = out.clone();
        out = pattern
            .replace_all(&source, |caps: &Captures| {
                let Some(matched) = caps.get(0) else {
                    return String::new();
                };
                let glossed = source[..matched.start()].ends_with('(')
                    && source[matched.end()..].starts_with(')');
                if glossed {
                    matched.as_str().to_string()
                } else {
                    replacement.to_string()
                }
            })
            .into_owned();
    }
    tidy(&out)
}

pub fn postprocess(text: &str) -> String {
    prefer_persian_forms(&sanitize_non_iranian(text))
}
