//! Structs related to Telegram's webhook updates

use serde::{Deserialize, Serialize};

/**
Inbound webhook payload. Telegram sends many update kinds; only plain
chat messages matter here, so everything else deserializes to a `None`
message and is acknowledged without action.
*/
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelegramUpdate {
    pub message: Option<IncomingMessage>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub chat: Chat,

    /// Absent for non-text messages (stickers, photos, ...).
    pub text: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}
