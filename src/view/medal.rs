use poem_openapi::Enum;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Enum, Deserialize)]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
    Other,
}

/// Case-insensitive keyword match, first hit wins.
pub fn classify(result: &str) -> Medal {
    let lower = result.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|x| lower.contains(x));
    if contains_any(&["gold", "1st", "winner"]) {
        Medal::Gold
    } else if contains_any(&["silver", "2nd", "runner"]) {
        Medal::Silver
    } else if contains_any(&["bronze", "3rd"]) {
        Medal::Bronze
    } else {
        Medal::Other
    }
}
