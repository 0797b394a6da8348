//! User entity <-> model mapper

use promo_core::entities::User;
use promo_core::value_objects::UserId;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            username: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            referral_code: model.referral_code,
            referrals: model.referrals,
            referred_by: model.referred_by.map(UserId::new),
            last_promo_date: model.last_promo_date,
            used_promo_codes: model.used_promo_codes,
            created_at: model.created_at,
        }
    }
}
