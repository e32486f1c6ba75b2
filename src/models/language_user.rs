use super::{LanguageUserId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageUser {
    pub id: LanguageUserId,
    pub language_id: u64,
    pub user_id: UserId,
    pub position: u32,
    pub created_at: DateTime<Utc>,
}
