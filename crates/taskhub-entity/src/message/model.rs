//! Direct message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use taskhub_core::types::{MessageId, UserId};

/// A direct message between two users of the same company.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Unique message identifier.
    pub id: MessageId,
    /// Sending user.
    pub sender_id: UserId,
    /// Receiving user.
    pub receiver_id: UserId,
    /// Message body.
    pub content: String,
    /// Owning tenant (an admin's user id).
    pub company_id: UserId,
    /// When the message was sent.
    pub created_at: DateTime<Utc>,
}

/// Data submitted to send a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    /// Receiving user.
    pub receiver_id: UserId,
    /// Message body.
    pub content: String,
}
