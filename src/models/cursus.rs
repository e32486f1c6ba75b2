use super::CursusId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a cursus as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursusKind {
    Test,
    Main,
    MainDeprecated,
    External,
    ExternalDeprecated,
    Piscine,
    PiscineCommunity,
    PiscineDeprecated,
}

impl CursusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CursusKind::Test => "test",
            CursusKind::Main => "main",
            CursusKind::MainDeprecated => "main_deprecated",
            CursusKind::External => "external",
            CursusKind::ExternalDeprecated => "external_deprecated",
            CursusKind::Piscine => "piscine",
            CursusKind::PiscineCommunity => "piscine_community",
            CursusKind::PiscineDeprecated => "piscine_deprecated",
        }
    }
}

impl fmt::Display for CursusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursus {
    pub id: CursusId,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub slug: String,
    pub kind: Option<CursusKind>,
}
