use crate::error::Result;
use crate::http::{path_segment, ApiRequest};
use crate::models::{CampusId, User, UserId};
use crate::pagination::Pagination;
use crate::resource::{Page, Resource};

pub type Users<'a> = Resource<'a, User>;

impl Resource<'_, User> {
    /// The user owning `token` (authorization-code flow), bypassing the
    /// application credentials.
    pub async fn me(&self, token: &str) -> Result<User> {
        self.client()
            .fetch(ApiRequest::get("me").bearer(token))
            .await
    }

    pub async fn find_by_id(&self, id: UserId) -> Result<User> {
        self.find(id).await
    }

    pub async fn find_by_login(&self, login: &str) -> Result<User> {
        self.find(path_segment(login)?).await
    }

    pub async fn find_by_campus(
        &self,
        id: CampusId,
        pagination: Option<&Pagination>,
    ) -> Result<Page<User>> {
        self.list_under("campus", id, pagination).await
    }

    /// Daily logtime for a user; the shape is left to the caller.
    pub async fn location_stats(&self, id: UserId) -> Result<serde_json::Value> {
        self.client()
            .fetch(ApiRequest::get(format!("users/{}/locations_stats", id)))
            .await
    }
}
