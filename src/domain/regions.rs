/// 表單下拉選單用的歷史地區
pub const REGIONS: [&str; 10] = [
    "Persis",
    "Media",
    "Parthia",
    "Sogdia",
    "Khwarezm",
    "Mazandaran",
    "Khorasan",
    "Zagros Mountains",
    "Caspian Sea",
    "Elam",
];

const REGION_HINTS: [(&str, &str); 10] = [
    (
        "Persis",
        "Achaemenid heartland: Pasargadae and Persepolis; Cyrus the Great, Darius; farr/farrah (xvarənah, divine royal glory).",
    ),
    (
        "Media",
        "Median highlands and early Iranian polities prior to Achaemenids; Ecbatana traditions.",
    ),
    (
        "Parthia",
        "Arsacid/Parthian era; horse archers, steppe-silk road links; Nisa; composite bows; satrapal ties.",
    ),
    (
        "Sogdia",
        "Eastern Iranian merchants and caravans; Samarkand/Bukhara spheres; vibrant trade and Zoroastrian/Buddhist contacts.",
    ),
    (
        "Khwarezm",
        "Lower Oxus/Amu Darya region; fortress-cities; water engineering; eastern Iranian culture.",
    ),
    (
        "Mazandaran",
        "Caspian forests; Gilan/Mazandaran folklore; rugged mountains and sea mists; local dynasts.",
    ),
    (
        "Khorasan",
        "Eastern marches; rising sun motif; legendary frontiers in the Shahnameh; desert winds and steppe edge.",
    ),
    (
        "Zagros Mountains",
        "Highland passes, oak forests, pastoralism; old borderlands of Elamites and Medes; fortresses.",
    ),
    (
        "Caspian Sea",
        "Caspian littoral; fishing, reeds and mist; Hyrcanian forests; humid coastal life.",
    ),
    (
        "Elam",
        "Southwestern Iranian plateau prior to Achaemenids; Elamite heritage; Susa; brickwork and bull imagery.",
    ),
];

pub const FACTS: [&str; 9] = [
    "“Farr / Farrah (xvarənah)” denotes divine royal glory in Iranian tradition.",
    "Takht-e Jamshid (Parsa/Persepolis) bears inscriptions in Old Persian, Elamite, and Babylonian.",
    "Kourosh (Cyrus) founded Pasargad, the early Achaemenid capital.",
    "Hagmatāna (Hamadan/Ecbatana) was a Median royal center with layered fortifications.",
    "Tisfun (Ctesiphon) served as a grand Sasanian capital on the Tigris.",
    "The Shahnameh preserves epic cycles like Rostam of Sistan/Zabulistan.",
    "Sogdian merchants connected Iran to the Silk Roads via Samarkand and Bukhara.",
    "Hyrcanian forests along the Caspian are among the world’s oldest temperate rainforests.",
    "Parthian cataphracts were famed for heavy armor on both rider and horse.",
];

/// 地區提示；未知地區回傳空字串
pub fn region_hint(region: &str) -> &'static str {
    let region = region.trim();
    REGION_HINTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(region))
        .map(|(_, hint)| *hint)
        .unwrap_or("")
}

/// 依序號輪替「你知道嗎」小知識
pub fn fact_for(seed: u64) -> &'static str {
    FACTS[(seed % FACTS.len() as u64) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_region_has_a_hint() {
        for region in REGIONS {
            assert!(!region_hint(region).is_empty(), "missing hint for {}", region);
        }
    }

    #[test]
    fn test_region_hint_lookup_is_case_insensitive() {
        assert!(region_hint("caspian sea").contains("Hyrcanian"));
        assert_eq!(region_hint("Atlantis"), "");
    }

    #[test]
    fn test_fact_rotation_wraps() {
        assert_eq!(fact_for(0), FACTS[0]);
        assert_eq!(fact_for(FACTS.len() as u64 + 2), FACTS[2]);
    }
}
