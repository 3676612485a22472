//! Text chat CLI command
//!
//! `sanad chat` - type a message, get the therapist reply. Crisis turns
//! print the emergency script instead of a generated reply.

use crate::config::{build_session, load_config};
use anyhow::{Context, Result};
use sanad_core::ResponseType;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Run the chat loop until EOF or `/quit`
pub async fn run() -> Result<()> {
    let config = load_config()?;
    let mut session = build_session(&config)?;

    println!("\nSanad - مساعد الدعم النفسي");
    println!("{}", "-".repeat(40));
    println!("  Model:   {}", config.llm.model);
    println!("  Context: last {} turns", config.conversation.history_window);
    println!("  /clear to reset, /quit to leave");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("أنت: ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };
        let utterance = line.trim();
        match utterance {
            "" => continue,
            "/quit" | "/exit" => break,
            "/clear" => {
                session.clear_history();
                println!("(cleared)\n");
                continue;
            }
            _ => {}
        }

        let outcome = session.respond(utterance).await;
        match outcome.response_type {
            ResponseType::Crisis => println!("\n⚠️  {}\n", outcome.reply),
            ResponseType::Error => println!("\nسند: {}\n", outcome.reply),
            ResponseType::Normal => {
                let score = outcome
                    .validation
                    .as_ref()
                    .map(|v| format!(" [cultural {:.2}]", v.overall_score))
                    .unwrap_or_default();
                println!("\nسند: {}{}\n", outcome.reply, score);
            }
        }
    }

    println!("مع السلامة");
    Ok(())
}
