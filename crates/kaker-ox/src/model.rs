/// Text models that suit a chat bot: fast, cheap and good enough.
///
/// The client takes any model identifier as a string, so models missing
/// here can still be used.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
)]
pub enum Model {
    // --- Gemini 1.5 Series ---
    #[default]
    #[strum(to_string = "gemini-1.5-flash-8b")]
    Gemini15Flash8b,
    #[strum(to_string = "gemini-1.5-flash")]
    Gemini15Flash,

    // --- Gemini 2.0 / 2.5 Series ---
    #[strum(to_string = "gemini-2.0-flash-lite")]
    Gemini20FlashLite,
    #[strum(to_string = "gemini-2.0-flash")]
    Gemini20Flash,
    #[strum(to_string = "gemini-2.5-flash-lite")]
    Gemini25FlashLite,
    #[strum(to_string = "gemini-2.5-flash")]
    Gemini25Flash,

    // --- Gemma 3 Series ---
    #[strum(to_string = "gemma-3-27b-it")]
    Gemma3_27bIt,
}

impl From<Model> for String {
    fn from(model: Model) -> Self {
        model.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn default_model_is_flash_8b() {
        assert_eq!(Model::default().to_string(), "gemini-1.5-flash-8b");
    }

    #[test]
    fn identifiers_parse_back() {
        assert_eq!(Model::from_str("gemma-3-27b-it").unwrap(), Model::Gemma3_27bIt);
        assert_eq!(String::from(Model::Gemini25Flash), "gemini-2.5-flash");
        assert!(Model::from_str("gpt-4").is_err());
    }
}
