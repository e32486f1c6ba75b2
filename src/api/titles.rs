use crate::error::Result;
use crate::models::{Title, TitleId};
use crate::resource::Resource;

pub type Titles<'a> = Resource<'a, Title>;

impl Resource<'_, Title> {
    pub async fn find_by_id(&self, id: TitleId) -> Result<Title> {
        self.find(id).await
    }
}
