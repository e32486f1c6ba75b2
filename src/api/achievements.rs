use crate::error::Result;
use crate::models::{Achievement, AchievementId, CampusId, CursusId, TitleId};
use crate::pagination::Pagination;
use crate::resource::{Page, Resource};

pub type Achievements<'a> = Resource<'a, Achievement>;

impl Resource<'_, Achievement> {
    pub async fn find_by_cursus(
        &self,
        id: CursusId,
        pagination: Option<&Pagination>,
    ) -> Result<Page<Achievement>> {
        self.list_under("cursus", id, pagination).await
    }

    pub async fn find_by_campus(
        &self,
        id: CampusId,
        pagination: Option<&Pagination>,
    ) -> Result<Page<Achievement>> {
        self.list_under("campus", id, pagination).await
    }

    pub async fn find_by_title(
        &self,
        id: TitleId,
        pagination: Option<&Pagination>,
    ) -> Result<Page<Achievement>> {
        self.list_under("titles", id, pagination).await
    }

    pub async fn find_by_id(&self, id: AchievementId) -> Result<Achievement> {
        self.find(id).await
    }

    pub async fn delete_by_id(&self, id: AchievementId) -> Result<Achievement> {
        self.delete(id).await
    }
}
