//! Reply texts and abstract menus
//!
//! The router produces these transport-agnostic values; only the webhook
//! handler turns them into Telegram keyboard JSON.

use promo_core::entities::{PromoCode, User};
use promo_service::{BotStats, ReferralSummary, UserOverview, UserStats};

/// Outbound reply: text plus an optional menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub menu: Option<Menu>,
}

impl Reply {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: None,
        }
    }

    pub fn with_menu(mut self, menu: Menu) -> Self {
        self.menu = Some(menu);
        self
    }
}

/// Abstract menu attached to a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Menu {
    /// The regular user keyboard
    Main,
    /// The admin keyboard
    Admin,
    /// The add-code dialog keyboard (auto / cancel)
    AddCode,
    /// One delete button per code plus a cancel row
    DeletableCodes(Vec<String>),
    /// A single share-link button
    Share { url: String },
}

/// Codes shown in the history view
const HISTORY_LIMIT: usize = 10;

// ============================================================================
// User replies
// ============================================================================

pub fn welcome(user: &User, is_admin: bool, referrer_name: Option<&str>) -> Reply {
    let mut text = String::new();
    if let Some(name) = referrer_name {
        text.push_str(&format!(
            "✅ You were invited by {name}!\n🎁 Extra perks unlocked!\n\n"
        ));
    }

    if is_admin {
        text.push_str(&format!(
            "👋 Welcome back, {}!\n🤖 Promo code bot admin panel:",
            user.display_name()
        ));
        return Reply::new(text).with_menu(Menu::Admin);
    }

    text.push_str(&format!(
        "👋 Hi {}!\n🎁 Welcome to the promo code bot!\n\n\
         📌 Your account:\n👥 Referrals: {}\n🎁 Codes received: {}\n\n\
         👇 Pick an option:",
        user.display_name(),
        user.referrals,
        user.used_promo_codes.len()
    ));
    Reply::new(text).with_menu(Menu::Main)
}

pub fn code_issued(code: &str) -> Reply {
    Reply::new(format!(
        "🎉 CONGRATULATIONS!\n\n🔑 Your promo code: {code}\n\n\
         📝 Single use only!\n⏳ Next code: in 24 hours\n👥 Invite friends for extra codes!"
    ))
    .with_menu(Menu::Main)
}

pub fn cooldown(hours_remaining: i64) -> Reply {
    Reply::new(format!(
        "⏳ You need to wait {hours_remaining} more hours!\n👥 Invite friends to earn codes faster!"
    ))
    .with_menu(Menu::Main)
}

pub fn pool_empty() -> Reply {
    Reply::new("❌ No promo codes left.\n📢 New codes are coming soon!").with_menu(Menu::Main)
}

pub fn not_registered() -> Reply {
    Reply::new("❌ Please press /start first.").with_menu(Menu::Main)
}

pub fn referral_link(summary: &ReferralSummary, bot_username: &str) -> Reply {
    let link = format!(
        "https://t.me/{bot_username}?start=ref_{}",
        summary.referral_code
    );
    let share_url = format!(
        "https://t.me/share/url?url={}",
        encode_query_value(&link)
    );

    Reply::new(format!(
        "👥 Your referral link:\n\n{link}\n\n\
         📊 Stats:\n✅ Invited: {}\n\n📌 Every invite earns you an extra code!",
        summary.referrals
    ))
    .with_menu(Menu::Share { url: share_url })
}

pub fn history(codes: &[String]) -> Reply {
    if codes.is_empty() {
        return Reply::new(format!(
            "📭 No promo codes yet.\n🎁 Press \"{}\"!",
            crate::commands::labels::DAILY_CODE
        ))
        .with_menu(Menu::Main);
    }

    let recent: Vec<&String> = codes.iter().rev().take(HISTORY_LIMIT).collect();
    let mut text = format!("📜 Your last {} promo codes:\n\n", recent.len());
    for (i, code) in recent.iter().enumerate() {
        text.push_str(&format!("{}. {code}\n", i + 1));
    }
    text.push_str(&format!("\n🎁 Total: {}", codes.len()));
    Reply::new(text).with_menu(Menu::Main)
}

pub fn user_stats(stats: &UserStats) -> Reply {
    let next = match stats.next_code_hours {
        Some(hours) => format!("in {hours} hours"),
        None => "available now".to_string(),
    };

    Reply::new(format!(
        "📊 YOUR STATS\n\n\
         👤 Name: {}\n👥 Referrals: {}\n🎁 Codes received: {}\n⏳ Next code: {next}\n\n\
         📈 OVERALL\n👥 Total users: {}\n🎁 Codes available: {}",
        stats.display_name, stats.referrals, stats.codes_received, stats.total_users,
        stats.active_codes
    ))
    .with_menu(Menu::Main)
}

// ============================================================================
// Admin replies
// ============================================================================

pub fn admins_only() -> Reply {
    Reply::new("❌ Admins only!").with_menu(Menu::Main)
}

pub fn main_menu() -> Reply {
    Reply::new("👇 Main menu:").with_menu(Menu::Main)
}

pub fn add_code_prompt() -> Reply {
    Reply::new(
        "📝 Add a promo code:\n\n\
         \"auto\" generates one for you\n\
         Or type your own (6-20 letters and digits)\n\n\
         \"cancel\" aborts",
    )
    .with_menu(Menu::AddCode)
}

pub fn code_added(code: &str) -> Reply {
    Reply::new(format!("✅ {code} added!")).with_menu(Menu::Admin)
}

pub fn invalid_code(reason: &str) -> Reply {
    Reply::new(format!(
        "❌ {reason}.\nTry again or send \"cancel\""
    ))
    .with_menu(Menu::AddCode)
}

pub fn duplicate_code() -> Reply {
    Reply::new("❌ That code already exists!\nSend another one or \"cancel\"")
        .with_menu(Menu::AddCode)
}

pub fn add_code_cancelled() -> Reply {
    Reply::new("❌ Cancelled.").with_menu(Menu::Admin)
}

pub fn remove_code_picker(codes: &[PromoCode]) -> Reply {
    if codes.is_empty() {
        return Reply::new("📭 Nothing to remove!").with_menu(Menu::Admin);
    }

    let mut text = "🗑 Pick a code to remove:\n\n".to_string();
    for (i, code) in codes.iter().enumerate() {
        text.push_str(&format!("{}. {}\n", i + 1, code.code));
    }
    Reply::new(text).with_menu(Menu::DeletableCodes(
        codes.iter().map(|c| c.code.clone()).collect(),
    ))
}

pub fn code_removed(code: &str) -> Reply {
    Reply::new(format!("✅ {code} removed!")).with_menu(Menu::Admin)
}

pub fn code_not_found() -> Reply {
    Reply::new("❌ Code not found.").with_menu(Menu::Admin)
}

pub fn delete_cancelled() -> Reply {
    Reply::new("❌ Deletion cancelled.").with_menu(Menu::Admin)
}

pub fn codes_list(codes: &[PromoCode]) -> Reply {
    if codes.is_empty() {
        return Reply::new("📭 No active promo codes!").with_menu(Menu::Admin);
    }

    let mut text = format!("📋 Active promo codes ({}):\n\n", codes.len());
    for (i, code) in codes.iter().enumerate() {
        text.push_str(&format!(
            "{}. {} — {}\n",
            i + 1,
            code.code,
            code.created_at.format("%Y-%m-%d")
        ));
    }
    Reply::new(text).with_menu(Menu::Admin)
}

pub fn user_overview(overview: &UserOverview) -> Reply {
    let mut text = format!(
        "👥 USERS\n\n📊 Total: {}\n🆕 Today: {}\n\n🏆 TOP REFERRERS\n",
        overview.total_users, overview.users_today
    );
    for (i, user) in overview.top_referrers.iter().enumerate() {
        text.push_str(&format!(
            "{}. {} — {}\n",
            i + 1,
            user.display_name(),
            user.referrals
        ));
    }
    Reply::new(text).with_menu(Menu::Admin)
}

pub fn bot_stats(stats: &BotStats) -> Reply {
    Reply::new(format!(
        "📊 BOT STATS\n\n\
         👥 Users:\n   • Total: {}\n   • Today: {}\n\n\
         🎁 Promo codes:\n   • Available: {}\n   • Ever added: {}\n   • Average: {:.2}/user",
        stats.total_users,
        stats.users_today,
        stats.active_codes,
        stats.total_codes,
        stats.codes_per_user()
    ))
    .with_menu(Menu::Admin)
}

// ============================================================================
// Fallbacks
// ============================================================================

pub fn buttons_only(is_admin: bool) -> Reply {
    let menu = if is_admin { Menu::Admin } else { Menu::Main };
    Reply::new("👇 I only understand the buttons.").with_menu(menu)
}

pub fn transient_failure() -> Reply {
    Reply::new("❌ Something went wrong. Please try again later.")
}

/// Percent-encode a query-string value (RFC 3986 unreserved set passes)
fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
