//! WhatsApp inbound handling (Twilio)
//!
//! Twilio POSTs incoming WhatsApp messages as form data; sender addresses
//! arrive as `whatsapp:+<number>`. The prefix is stripped so the rest of
//! the system keys profiles by the bare phone number.

use serde::{Deserialize, Serialize};

/// WhatsApp message length limit (Twilio splits beyond this anyway).
pub const WHATSAPP_MAX_MESSAGE_LEN: usize = 4096;

/// Incoming Twilio webhook form fields
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TwilioWebhookData {
    #[serde(default)]
    pub message_sid: String,
    #[serde(default)]
    pub account_sid: String,
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub num_media: u32,
    #[serde(default)]
    pub profile_name: Option<String>,
}

/// Normalized inbound message: one identity, one line of text
#[derive(Debug, Clone)]
pub struct ChannelMessage {
    /// Channel-assigned message id (generated when Twilio omits one)
    pub id: String,
    /// Bare phone number, `whatsapp:` prefix stripped
    pub sender_id: String,
    pub sender_name: Option<String>,
    pub content: String,
    pub timestamp: i64,
}

impl ChannelMessage {
    /// Normalize a Twilio webhook payload.
    pub fn from_webhook(data: &TwilioWebhookData) -> Self {
        let id = if data.message_sid.is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            data.message_sid.clone()
        };
        Self {
            id,
            sender_id: data.from.replace("whatsapp:", ""),
            sender_name: data.profile_name.clone(),
            content: data.body.trim().to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// Split a reply segment at the WhatsApp length limit, breaking on line
/// boundaries where possible.
pub fn split_message(content: &str) -> Vec<String> {
    if content.len() <= WHATSAPP_MAX_MESSAGE_LEN {
        return vec![content.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in content.lines() {
        if current.len() + line.len() + 1 > WHATSAPP_MAX_MESSAGE_LEN {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }

            if line.len() > WHATSAPP_MAX_MESSAGE_LEN {
                let mut remaining = line;
                while !remaining.is_empty() {
                    let split_at = remaining
                        .char_indices()
                        .take_while(|(i, _)| *i < WHATSAPP_MAX_MESSAGE_LEN)
                        .last()
                        .map(|(i, c)| i + c.len_utf8())
                        .unwrap_or(remaining.len());
                    let (chunk, rest) = remaining.split_at(split_at);
                    chunks.push(chunk.to_string());
                    remaining = rest;
                }
            } else {
                current = line.to_string();
            }
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
