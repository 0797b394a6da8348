//! Promo code entity <-> model mapper

use promo_core::entities::PromoCode;
use promo_core::value_objects::UserId;

use crate::models::PromoCodeModel;

/// Convert PromoCodeModel to PromoCode entity
impl From<PromoCodeModel> for PromoCode {
    fn from(model: PromoCodeModel) -> Self {
        PromoCode {
            code: model.code,
            added_by: UserId::new(model.added_by),
            created_at: model.created_at,
            is_active: model.is_active,
        }
    }
}
