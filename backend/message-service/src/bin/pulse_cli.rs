//! Terminal front end for the message service.
//!
//! Same behavior as the web and mobile clients: load the saved alias, fetch
//! the recent feed on startup, submit typed lines as messages, and prepend
//! the server's response to the local feed. `/refresh` refetches, `/alias`
//! changes and persists the display name.

use message_service::client::{alias_preference, ApiClient, FeedMessage};
use std::io::{BufRead, Write};

const FEED_LIMIT: u32 = 50;

fn render(messages: &[FeedMessage]) {
    if messages.is_empty() {
        println!("(no messages yet - type something and press enter)");
        return;
    }
    for m in messages {
        let score = m
            .sentiment
            .score
            .map(|s| format!(" ({:.2})", s))
            .unwrap_or_default();
        let label = if m.sentiment.label.is_empty() {
            "-"
        } else {
            m.sentiment.label.as_str()
        };
        println!("@{} [{}{}] {}", m.alias, label, score, m.text);
    }
}

#[tokio::main]
async fn main() {
    let base_url = std::env::var("PULSE_API_URL")
        .unwrap_or_else(|_| "http://localhost:8080".to_string());
    let client = ApiClient::new(&base_url);

    let mut alias = alias_preference::load().unwrap_or_else(|| "anon".to_string());
    let mut feed: Vec<FeedMessage> = Vec::new();

    println!("pulse-cli connected to {} (alias: {})", base_url, alias);
    println!("commands: /alias <name>, /refresh, /quit");

    match client.list_messages(None, FEED_LIMIT).await {
        Ok(messages) => {
            feed = messages;
            render(&feed);
        }
        Err(err) => {
            tracing::debug!(error = %err, "initial fetch failed");
            println!("could not retrieve messages");
        }
    }

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }
        let line = line.trim();

        if line.is_empty() {
            continue;
        }
        if line == "/quit" {
            break;
        }
        if line == "/refresh" {
            match client.list_messages(None, FEED_LIMIT).await {
                Ok(messages) => {
                    feed = messages;
                    render(&feed);
                }
                Err(_) => println!("could not retrieve messages"),
            }
            continue;
        }
        if let Some(new_alias) = line.strip_prefix("/alias ") {
            let new_alias = new_alias.trim();
            if !new_alias.is_empty() {
                alias = new_alias.to_string();
                alias_preference::store(&alias);
                println!("alias set to {}", alias);
            }
            continue;
        }

        match client.send_message(&alias, line).await {
            Ok(message) => {
                feed.insert(0, message);
                render(&feed[..1]);
            }
            Err(_) => println!("could not submit"),
        }
    }
}
