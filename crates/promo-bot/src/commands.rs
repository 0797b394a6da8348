//! Inbound command parsing
//!
//! Maps message text and callback data onto the command enum. Menu buttons
//! arrive as their literal label text, so the labels live here next to the
//! parser.

/// Reply-keyboard button labels
pub mod labels {
    pub const DAILY_CODE: &str = "🎁 Daily code";
    pub const REFERRAL_LINK: &str = "👥 My referral link";
    pub const MY_CODES: &str = "📜 My codes";
    pub const MY_STATS: &str = "📊 My stats";

    pub const ADMIN_ADD_CODE: &str = "➕ Add code";
    pub const ADMIN_REMOVE_CODE: &str = "🗑 Remove code";
    pub const ADMIN_LIST_CODES: &str = "📋 All codes";
    pub const ADMIN_USERS: &str = "👥 Users";
    pub const ADMIN_STATS: &str = "📊 Bot stats";
    pub const ADMIN_MAIN_MENU: &str = "🔙 Main menu";

    pub const AUTO: &str = "auto";
    pub const CANCEL: &str = "cancel";
}

/// Callback data prefix on the per-code delete buttons
const DELETE_PREFIX: &str = "delete_";
/// Callback data on the cancel row of the delete picker
const CANCEL_DELETE: &str = "cancel_delete";

/// A parsed inbound command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/start`, optionally with a referral payload
    Start { payload: Option<String> },
    RequestDailyCode,
    ViewReferral,
    ViewHistory,
    ViewStats,
    AdminAddCode,
    AdminRemoveCode,
    AdminListCodes,
    AdminListUsers,
    AdminBotStats,
    AdminMainMenu,
    /// Inline-button request to delete a specific code
    DeleteCode(String),
    /// Inline-button cancel of the delete picker
    CancelDelete,
    /// Anything else; feeds the add-code dialog when one is active
    Text(String),
}

impl Command {
    /// Parse a message text into a command
    pub fn from_text(text: &str) -> Self {
        let text = text.trim();

        if let Some(rest) = text.strip_prefix("/start") {
            let payload = rest
                .split_whitespace()
                .next()
                .filter(|p| !p.is_empty())
                .map(str::to_string);
            return Self::Start { payload };
        }

        match text {
            labels::DAILY_CODE => Self::RequestDailyCode,
            labels::REFERRAL_LINK => Self::ViewReferral,
            labels::MY_CODES => Self::ViewHistory,
            labels::MY_STATS => Self::ViewStats,
            labels::ADMIN_ADD_CODE => Self::AdminAddCode,
            labels::ADMIN_REMOVE_CODE => Self::AdminRemoveCode,
            labels::ADMIN_LIST_CODES => Self::AdminListCodes,
            labels::ADMIN_USERS => Self::AdminListUsers,
            labels::ADMIN_STATS => Self::AdminBotStats,
            labels::ADMIN_MAIN_MENU => Self::AdminMainMenu,
            other => Self::Text(other.to_string()),
        }
    }

    /// Parse callback-button data into a command
    pub fn from_callback_data(data: &str) -> Option<Self> {
        if data == CANCEL_DELETE {
            return Some(Self::CancelDelete);
        }
        data.strip_prefix(DELETE_PREFIX)
            .filter(|code| !code.is_empty())
            .map(|code| Self::DeleteCode(code.to_string()))
    }
}

/// Callback data for a delete button
pub fn delete_callback_data(code: &str) -> String {
    format!("{DELETE_PREFIX}{code}")
}

/// Callback data for the cancel row of the delete picker
pub fn cancel_delete_callback_data() -> String {
    CANCEL_DELETE.to_string()
}
