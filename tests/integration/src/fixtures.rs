//! Test fixtures and data generators
//!
//! In-memory repository implementations standing in for PostgreSQL, plus
//! builders for the Telegram update payloads the webhook receives. Every
//! mutation happens under one lock, so the atomicity the services rely on
//! holds here too.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde_json::{json, Value};

use promo_core::entities::{PromoCode, User};
use promo_core::error::DomainError;
use promo_core::traits::{CodeRepository, RepoResult, UserRepository};
use promo_core::value_objects::UserId;

/// In-memory user store
#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl MemoryUserRepository {
    /// Direct read access for assertions
    pub fn get(&self, id: i64) -> Option<User> {
        self.users.lock().get(&UserId::new(id)).cloned()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
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
        users
            .get_mut(&referrer_id)
            .expect("referrer checked above")
            .referrals += 1;
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

/// In-memory code pool
#[derive(Default)]
pub struct MemoryCodeRepository {
    codes: Mutex<Vec<PromoCode>>,
}

impl MemoryCodeRepository {
    /// Seed an active code directly
    pub fn seed(&self, code: &str) {
        self.codes
            .lock()
            .push(PromoCode::new(code.to_string(), UserId::new(0)));
    }

    pub fn active_count(&self) -> usize {
        self.codes.lock().iter().filter(|c| c.is_active).count()
    }
}

#[async_trait]
impl CodeRepository for MemoryCodeRepository {
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
        let taken = codes
            .iter_mut()
            .filter(|c| c.is_active)
            .min_by_key(|c| c.created_at);
        Ok(taken.map(|code| {
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

// ============================================================================
// Update payload builders
// ============================================================================

/// A message update as Telegram would deliver it to the webhook
pub fn message_update(user_id: i64, first_name: &str, text: &str) -> Value {
    json!({
        "update_id": 1,
        "message": {
            "message_id": 1,
            "from": {"id": user_id, "first_name": first_name},
            "chat": {"id": user_id},
            "text": text
        }
    })
}

/// A callback-query update for an inline button press
pub fn callback_update(user_id: i64, data: &str) -> Value {
    json!({
        "update_id": 2,
        "callback_query": {
            "id": "cb1",
            "from": {"id": user_id, "first_name": "Admin"},
            "message": {"message_id": 7, "chat": {"id": user_id}},
            "data": data
        }
    })
}
