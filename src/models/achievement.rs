use super::{AchievementId, Title};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Achievement category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    Social,
    Pedagogy,
    Scolarity,
    Project,
    #[serde(other)]
    Other,
}

impl fmt::Display for AchievementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AchievementKind::Social => "social",
            AchievementKind::Pedagogy => "pedagogy",
            AchievementKind::Scolarity => "scolarity",
            AchievementKind::Project => "project",
            AchievementKind::Other => "other",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tier: String,
    pub kind: AchievementKind,
    #[serde(default)]
    pub visible: bool,
    pub image: Option<String>,
    pub nbr_of_success: Option<u64>,
    pub users_url: Option<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub campus: Vec<String>,
    pub parent: Option<Box<Achievement>>,
    pub title: Option<Title>,
}
