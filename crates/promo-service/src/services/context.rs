//! Service context - dependency container for services
//!
//! Holds the repositories and the static admin allow-list needed by services.

use std::collections::HashSet;
use std::sync::Arc;

use promo_core::traits::{CodeRepository, UserRepository};
use promo_core::value_objects::UserId;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    code_repo: Arc<dyn CodeRepository>,
    admin_ids: HashSet<UserId>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        code_repo: Arc<dyn CodeRepository>,
        admin_ids: HashSet<UserId>,
    ) -> Self {
        Self {
            user_repo,
            code_repo,
            admin_ids,
        }
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the code repository
    pub fn code_repo(&self) -> &dyn CodeRepository {
        self.code_repo.as_ref()
    }

    /// Check a user against the static admin allow-list
    pub fn is_admin(&self, id: UserId) -> bool {
        self.admin_ids.contains(&id)
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("admin_ids", &self.admin_ids)
            .finish()
    }
}
