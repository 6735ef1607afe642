//! Terminal rendering of log messages

use crate::conversation::{Message, Sender};
use chrono::TimeZone;
use std::fmt::Display;

const ASSISTANT_NAME: &str = "Nekko BhAI";
const USER_NAME: &str = "You";

fn sender_label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => USER_NAME,
        Sender::Assistant => ASSISTANT_NAME,
    }
}

/// Format a message as `[time] Sender: line`, continuation lines indented
/// under the first.
pub fn format_message<Tz>(message: &Message, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let time = message.timestamp().with_timezone(tz).format("%-I:%M:%S %p");
    let prefix = format!("[{time}] {}: ", sender_label(message.sender()));
    let indent = " ".repeat(prefix.chars().count());

    let mut out = String::new();
    for (i, line) in message.lines().iter().enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(&indent);
        } else {
            out.push_str(&prefix);
        }
        out.push_str(line);
    }
    out
}
