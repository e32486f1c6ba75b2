use crate::error::Result;
use crate::models::{Skill, SkillId};
use crate::resource::Resource;

pub type Skills<'a> = Resource<'a, Skill>;

impl Resource<'_, Skill> {
    pub async fn find_by_id(&self, id: SkillId) -> Result<Skill> {
        self.find(id).await
    }
}
