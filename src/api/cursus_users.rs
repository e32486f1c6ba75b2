use crate::error::Result;
use crate::models::{CursusId, CursusUser, UserId};
use crate::pagination::Pagination;
use crate::resource::{Page, Resource};

pub type CursusUsers<'a> = Resource<'a, CursusUser>;

impl Resource<'_, CursusUser> {
    /// Every cursus the user is enrolled in.
    pub async fn find_by_user(
        &self,
        id: UserId,
        pagination: Option<&Pagination>,
    ) -> Result<Page<CursusUser>> {
        self.list_under("users", id, pagination).await
    }

    pub async fn find_by_cursus(
        &self,
        id: CursusId,
        pagination: Option<&Pagination>,
    ) -> Result<Page<CursusUser>> {
        self.list_under("cursus", id, pagination).await
    }
}
