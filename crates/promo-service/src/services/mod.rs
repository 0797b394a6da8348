//! Service layer - business logic for registration, distribution, referrals
//! and administration

mod admin;
mod context;
mod distribution;
mod error;
mod referral;
mod registration;
mod stats;

pub use admin::AdminService;
pub use context::ServiceContext;
pub use distribution::DistributionService;
pub use error::{ServiceError, ServiceResult};
pub use referral::ReferralService;
pub use registration::RegistrationService;
pub use stats::StatsService;

use chrono::{DateTime, Local, NaiveTime, Utc};

/// Start of the current calendar day in the process-local timezone.
///
/// A timezone where local midnight does not exist (DST jump) falls back to
/// `now`, which only makes the "today" counters conservative.
pub(crate) fn start_of_local_day(now: DateTime<Local>) -> DateTime<Utc> {
    now.date_naive()
        .and_time(NaiveTime::MIN)
        .and_local_timezone(Local)
        .earliest()
        .map_or_else(|| now.with_timezone(&Utc), |midnight| midnight.with_timezone(&Utc))
}
