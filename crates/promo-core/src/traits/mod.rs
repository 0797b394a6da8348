//! Repository traits (ports)

mod repositories;

pub use repositories::{CodeRepository, RepoResult, UserRepository};
