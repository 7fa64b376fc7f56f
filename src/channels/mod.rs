//! Messaging channel layer
//!
//! WhatsApp via Twilio: webhook form parsing on the way in, TwiML on the
//! way out. The engine only ever sees a normalized identity plus one line
//! of text per turn.

pub mod twiml;
pub mod whatsapp;

pub use twiml::twiml_response;
pub use whatsapp::{ChannelMessage, TwilioWebhookData, WHATSAPP_MAX_MESSAGE_LEN};
