use crate::error::Result;
use crate::models::{Campus, CampusId};
use crate::resource::Resource;

pub type CampusApi<'a> = Resource<'a, Campus>;

impl Resource<'_, Campus> {
    pub async fn find_by_id(&self, id: CampusId) -> Result<Campus> {
        self.find(id).await
    }
}
