use super::{Cursus, CursusId, CursusUserId, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursusUser {
    pub id: CursusUserId,
    pub begin_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub grade: Option<String>,
    #[serde(default)]
    pub level: f64,
    #[serde(default)]
    pub skills: Vec<serde_json::Value>,
    pub cursus_id: CursusId,
    #[serde(default)]
    pub has_coalition: bool,
    pub user: Option<User>,
    pub cursus: Option<Cursus>,
}
