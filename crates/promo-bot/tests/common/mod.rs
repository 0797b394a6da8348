//! In-memory repositories and a router builder for dispatch tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use promo_bot::router::{CommandEvent, CommandRouter};
use promo_core::entities::{PromoCode, User};
use promo_core::error::DomainError;
use promo_core::traits::{CodeRepository, RepoResult, UserRepository};
use promo_core::value_objects::UserId;
use promo_service::{ServiceContext, UserProfile};

#[derive(Default)]
pub struct FakeUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.users.lock().get(&id).cloned())
    }

    async fn find_by_referral_code(&self, code: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .values()
            .find(|u| u.referral_code == code)
            .cloned())
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        let mut users = self.users.lock();
        if users.contains_key(&user.id) {
            return Err(DomainError::UserExists(user.id));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn count_all(&self) -> RepoResult<i64> {
        Ok(self.users.lock().len() as i64)
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64> {
        Ok(self
            .users
            .lock()
            .values()
            .filter(|u| u.created_at >= since)
            .count() as i64)
    }

    async fn top_by_referrals(&self, limit: i64) -> RepoResult<Vec<User>> {
        let mut users: Vec<User> = self.users.lock().values().cloned().collect();
        users.sort_by(|a, b| b.referrals.cmp(&a.referrals));
        users.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(users)
    }

    async fn link_referrer(&self, user_id: UserId, referrer_id: UserId) -> RepoResult<bool> {
        let mut users = self.users.lock();
        if user_id == referrer_id || !users.contains_key(&referrer_id) {
            return Ok(false);
        }
        match users.get_mut(&user_id) {
            Some(user) if user.referred_by.is_none() => user.referred_by = Some(referrer_id),
            _ => return Ok(false),
        }
        users.get_mut(&referrer_id).unwrap().referrals += 1;
        Ok(true)
    }

    async fn begin_issuance(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
        cutoff: DateTime<Utc>,
    ) -> RepoResult<bool> {
        let mut users = self.users.lock();
        match users.get_mut(&user_id) {
            Some(user) if user.last_promo_date.is_none_or(|last| last <= cutoff) => {
                user.last_promo_date = Some(now);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn finish_issuance(&self, user_id: UserId, code: &str) -> RepoResult<()> {
        self.users
            .lock()
            .get_mut(&user_id)
            .map(|u| u.used_promo_codes.push(code.to_string()))
            .ok_or(DomainError::NotRegistered(user_id))
    }

    async fn abort_issuance(
        &self,
        user_id: UserId,
        previous: Option<DateTime<Utc>>,
    ) -> RepoResult<()> {
        if let Some(user) = self.users.lock().get_mut(&user_id) {
            user.last_promo_date = previous;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeCodeRepository {
    codes: Mutex<Vec<PromoCode>>,
}

impl FakeCodeRepository {
    pub fn seed(&self, code: &str) {
        self.codes
            .lock()
            .push(PromoCode::new(code.to_string(), UserId::new(0)));
    }
}

#[async_trait]
impl CodeRepository for FakeCodeRepository {
    async fn insert(&self, code: &PromoCode) -> RepoResult<()> {
        let mut codes = self.codes.lock();
        if codes.iter().any(|c| c.code == code.code) {
            return Err(DomainError::DuplicateCode(code.code.clone()));
        }
        codes.push(code.clone());
        Ok(())
    }

    async fn remove(&self, code: &str) -> RepoResult<bool> {
        let mut codes = self.codes.lock();
        let before = codes.len();
        codes.retain(|c| !(c.is_active && c.code == code));
        Ok(codes.len() < before)
    }

    async fn find_and_remove_active(&self) -> RepoResult<Option<PromoCode>> {
        let mut codes = self.codes.lock();
        Ok(codes.iter_mut().find(|c| c.is_active).map(|code| {
            code.is_active = false;
            code.clone()
        }))
    }

    async fn list_active(&self, limit: i64) -> RepoResult<Vec<PromoCode>> {
        let mut active: Vec<PromoCode> = self
            .codes
            .lock()
            .iter()
            .filter(|c| c.is_active)
            .cloned()
            .collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        active.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(active)
    }

    async fn count_active(&self) -> RepoResult<i64> {
        Ok(self.codes.lock().iter().filter(|c| c.is_active).count() as i64)
    }

    async fn count_all(&self) -> RepoResult<i64> {
        Ok(self.codes.lock().len() as i64)
    }
}

/// Router over fresh fakes, exposing the code repository for seeding
pub fn router_with_admins(admin_ids: &[i64]) -> (CommandRouter, Arc<FakeCodeRepository>) {
    let user_repo = Arc::new(FakeUserRepository::default());
    let code_repo = Arc::new(FakeCodeRepository::default());
    let admins: HashSet<UserId> = admin_ids.iter().copied().map(UserId::new).collect();
    let ctx = ServiceContext::new(user_repo, code_repo.clone(), admins);
    (
        CommandRouter::new(ctx, "promodrop_bot".to_string()),
        code_repo,
    )
}

/// An event from the given user
pub fn event(user_id: i64, command: promo_bot::commands::Command) -> CommandEvent {
    CommandEvent {
        profile: UserProfile {
            id: UserId::new(user_id),
            username: None,
            first_name: Some(format!("User{user_id}")),
            last_name: None,
        },
        command,
    }
}
