use super::SkillId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub created_at: Option<DateTime<Utc>>,
    pub name: String,
    pub slug: Option<String>,
}
