use serde::{Deserialize, Serialize};

/// Display language of the admin dashboard. Drives the `Accept-Language`
/// header sent with every API call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ar,
    #[default]
    En,
}

impl Locale {
    pub fn accept_language(self) -> &'static str {
        match self {
            Locale::Ar => "ar-EG",
            Locale::En => "en-US",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Ar => "ar",
            Locale::En => "en",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ar" => Some(Locale::Ar),
            "en" => Some(Locale::En),
            _ => None,
        }
    }
}
