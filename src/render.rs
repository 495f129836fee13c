//! Plain-text rendering of chat messages for the terminal

use crate::conversation::{Message, MessageBody, MessageId, PredictionBody, Sender};
use crate::runtime::ConversationView;
use std::fmt::Write;

pub const THINKING: &str = "Thinking...";

/// Render one message. Prediction details only appear when `expanded`.
pub fn render_message(message: &Message, expanded: bool) -> String {
    let speaker = match message.sender {
        Sender::User => "You",
        Sender::Bot => "Companion",
    };
    let mut out = format!("[{}] {speaker}", message.id);

    match &message.body {
        MessageBody::Text { text, mood } => {
            let _ = write!(out, ": {text}");
            if let (Sender::Bot, Some(mood)) = (message.sender, mood) {
                let _ = write!(out, "\n    ({mood})");
            }
        }
        MessageBody::Prediction(p) => {
            out.push_str(":\n");
            render_prediction(&mut out, message.id, p, expanded);
        }
    }

    out
}

fn render_prediction(out: &mut String, id: MessageId, p: &PredictionBody, expanded: bool) {
    let _ = writeln!(out, "    {} ({:.1}% confident)", p.prediction, p.confidence);
    let _ = write!(out, "    > {}", p.advice);

    if expanded {
        if !p.keywords.is_empty() {
            let _ = write!(out, "\n    Key terms: {}", p.keywords.join(", "));
        }
        out.push_str("\n    Alternative Interpretations:");
        for prob in p.ranked() {
            let _ = write!(out, "\n      {:<12} {:>5.1}%", prob.label, prob.value);
        }
        let _ = write!(out, "\n    Detailed Insight: {}", p.explanation);
    } else {
        let _ = write!(out, "\n    (/expand {id} for details)");
    }
    let _ = write!(out, "\n    ({})", p.mood);
}

/// Render the whole conversation
pub fn render_view(view: &ConversationView) -> String {
    let mut out = view
        .messages
        .iter()
        .map(|m| render_message(m, view.expanded == Some(m.id)))
        .collect::<Vec<_>>()
        .join("\n");
    if view.busy {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(THINKING);
    }
    out
}
