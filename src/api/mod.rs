//! Typed accessors: thin instantiations of [`crate::Resource`] per entity.

mod achievements;
mod campus;
mod cursus;
mod cursus_users;
mod projects;
mod skills;
mod titles;
mod users;

pub use achievements::Achievements;
pub use campus::CampusApi;
pub use cursus::CursusApi;
pub use cursus_users::CursusUsers;
pub use projects::Projects;
pub use skills::Skills;
pub use titles::Titles;
pub use users::Users;
