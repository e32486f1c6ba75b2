use super::{CursusUser, Image, LanguageUser, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub login: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub usual_full_name: Option<String>,
    pub usual_first_name: Option<String>,
    pub url: Option<String>,
    pub phone: Option<String>,
    pub displayname: Option<String>,
    pub kind: Option<String>,
    #[serde(default)]
    pub image: Image,
    #[serde(rename = "staff?", default)]
    pub staff: bool,
    pub correction_point: Option<i64>,
    pub pool_month: Option<String>,
    pub pool_year: Option<String>,
    pub location: Option<String>,
    pub wallet: Option<i64>,
    pub anonymize_date: Option<DateTime<Utc>>,
    pub data_erasure_date: Option<DateTime<Utc>>,
    pub alumnized_at: Option<DateTime<Utc>>,
    #[serde(rename = "alumni?", default)]
    pub alumni: bool,
    #[serde(rename = "active?", default)]
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub groups: Vec<serde_json::Value>,
    #[serde(default)]
    pub cursus_users: Vec<CursusUser>,
    #[serde(default)]
    pub projects_users: Vec<serde_json::Value>,
    #[serde(default)]
    pub languages_users: Vec<LanguageUser>,
}
