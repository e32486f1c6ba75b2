use crate::error::Result;
use crate::models::{Cursus, CursusId};
use crate::resource::Resource;

pub type CursusApi<'a> = Resource<'a, Cursus>;

impl Resource<'_, Cursus> {
    pub async fn find_by_id(&self, id: CursusId) -> Result<Cursus> {
        self.find(id).await
    }

    pub async fn delete_by_id(&self, id: CursusId) -> Result<Cursus> {
        self.delete(id).await
    }
}
