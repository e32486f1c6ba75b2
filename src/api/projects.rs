use crate::error::Result;
use crate::models::{CursusId, Project, ProjectId};
use crate::pagination::Pagination;
use crate::resource::{Page, Resource};

pub type Projects<'a> = Resource<'a, Project>;

impl Resource<'_, Project> {
    pub async fn find_by_cursus(
        &self,
        id: CursusId,
        pagination: Option<&Pagination>,
    ) -> Result<Page<Project>> {
        self.list_under("cursus", id, pagination).await
    }

    pub async fn find_by_id(&self, id: ProjectId) -> Result<Project> {
        self.find(id).await
    }

    pub async fn delete_by_id(&self, id: ProjectId) -> Result<Project> {
        self.delete(id).await
    }
}
