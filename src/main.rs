//! Mindful Companion terminal client
//!
//! Reads lines from stdin, sends them to the classifier and prints the
//! replies as they arrive.

use mindful_companion::classifier::LoggingClassifier;
use mindful_companion::conversation::{MessageId, Sender};
use mindful_companion::render::{render_message, render_view, THINKING};
use mindful_companion::runtime::ConversationView;
use mindful_companion::{
    ChatEvent, ClassifierConfig, ConversationStore, HttpClassifier, RandomMood, RequestCoordinator,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, watch};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "Type a message and press enter. Commands: /expand <id>, /history, /help, /quit";

/// One line of user input
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Submit(String),
    Expand(MessageId),
    History,
    Help,
    Quit,
    Invalid(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Submit(line.to_string());
        };

        let mut parts = rest.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some("quit" | "exit"), None, None) => Command::Quit,
            (Some("history"), None, None) => Command::History,
            (Some("help"), None, None) => Command::Help,
            (Some("expand"), Some(id), None) => id
                .parse()
                .map_or_else(|_| Command::Invalid(format!("Not a message id: {id}")), Command::Expand),
            _ => Command::Invalid(format!("Unknown command: {trimmed}")),
        }
    }
}

/// Print bot replies, busy notices and expansion changes
async fn print_events(
    mut events: broadcast::Receiver<ChatEvent>,
    view: watch::Receiver<ConversationView>,
) {
    loop {
        match events.recv().await {
            Ok(ChatEvent::MessageAppended { message }) if message.sender == Sender::Bot => {
                println!("{}", render_message(&message, false));
            }
            Ok(ChatEvent::BusyChanged { busy: true }) => println!("{THINKING}"),
            Ok(ChatEvent::ExpansionChanged { expanded }) => {
                let current = view.borrow().clone();
                match expanded.and_then(|id| current.messages.iter().find(|m| m.id == id)) {
                    Some(message) => println!("{}", render_message(message, true)),
                    None if expanded.is_some() => println!("(no such message)"),
                    None => println!("(collapsed)"),
                }
            }
            Ok(ChatEvent::SubmitRejected { reason }) => println!("({reason})"),
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Renderer fell behind");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they stay out of the transcript
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindful_companion=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = ClassifierConfig::from_env();
    tracing::info!(
        url = %config.url,
        timeout_secs = config.timeout.as_secs(),
        "Classifier configured"
    );

    let classifier = LoggingClassifier::new(HttpClassifier::new(&config)?);
    let (handle, coordinator) = RequestCoordinator::spawn(
        ConversationStore::with_greeting(),
        classifier,
        RandomMood::new(),
    );

    println!("Your Mindful Companion\n{HELP}\n");
    println!("{}", render_view(&handle.view()));

    let printer = tokio::spawn(print_events(handle.subscribe(), handle.watch()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Submit(text) => handle.submit(text).await?,
            Command::Expand(id) => handle.toggle_expanded(id).await?,
            Command::History => println!("{}", render_view(&handle.view())),
            Command::Help => println!("{HELP}"),
            Command::Invalid(reason) => println!("({reason})"),
            Command::Quit => break,
        }
    }

    // Dropping the last handle lets the coordinator finish any in-flight exchange
    drop(handle);
    let store = coordinator.await?;
    printer.await?;
    tracing::info!(messages = store.len(), "Session ended");

    Ok(())
}
