//! TwiML reply encoding
//!
//! Twilio expects the webhook response body to be a TwiML document; each
//! `<Message>` element is delivered as a separate WhatsApp message.

use super::whatsapp::split_message;

/// Encode reply segments as a TwiML messaging response. Segments longer
/// than the WhatsApp limit are split into additional messages.
pub fn twiml_response(segments: &[String]) -> String {
    let mut body = String::from(r#"<?xml version="1.0" encoding="UTF-8"?><Response>"#);
    for segment in segments {
        for chunk in split_message(segment) {
            body.push_str("<Message>");
            body.push_str(&escape_xml(&chunk));
            body.push_str("</Message>");
        }
    }
    body.push_str("</Response>");
    body
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
