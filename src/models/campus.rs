use super::CampusId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campus {
    pub id: CampusId,
    pub name: String,
    pub time_zone: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub website: Option<String>,
    pub users_count: Option<u64>,
    #[serde(default)]
    pub active: bool,
}
