//! Payload shapes returned by the intra API.
//!
//! The request engine never inspects these; they only drive JSON decoding in
//! the accessors. Unknown fields are ignored.

mod achievement;
mod campus;
mod cursus;
mod cursus_user;
mod image;
mod language_user;
mod project;
mod skill;
mod title;
mod user;

pub use achievement::{Achievement, AchievementKind};
pub use campus::Campus;
pub use cursus::{Cursus, CursusKind};
pub use cursus_user::CursusUser;
pub use image::{Image, ImageVersions};
pub use language_user::LanguageUser;
pub use project::Project;
pub use skill::Skill;
pub use title::Title;
pub use user::User;

macro_rules! id_type {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
            #[serde(transparent)]
            pub struct $name(pub u64);

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<u64> for $name {
                fn from(v: u64) -> Self {
                    Self(v)
                }
            }
        )+
    };
}

id_type!(
    AchievementId,
    CampusId,
    CursusId,
    CursusUserId,
    LanguageUserId,
    ProjectId,
    SkillId,
    TitleId,
    UserId,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_as_integers() {
        assert_eq!(UserId(42).to_string(), "42");
        assert_eq!(CursusId::from(21).to_string(), "21");
        let v: TitleId = serde_json::from_str("7").unwrap();
        assert_eq!(v, TitleId(7));
    }
}
