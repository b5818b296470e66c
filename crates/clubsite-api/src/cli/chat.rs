//! Interactive terminal chat with the site assistant.
//!
//! Runs the same turn pipeline as `POST /api/chat` in-process, driving a
//! [`ChatSession`] so history and fallback replies behave like the web
//! widget.

use anyhow::Result;
use console::style;
use dialoguer::Input;

use clubsite_core::chat::session::{ChatSession, GREETING, TurnOutcome};
use clubsite_types::chat::{ChatRequest, MEMBERS_LINK_LABEL, ReplySegment};
use clubsite_types::error::ChatError;
use clubsite_types::llm::LlmError;

use crate::state::AppState;

/// In-chat controls. Anything else is sent to the assistant.
#[derive(Debug, PartialEq)]
enum ChatCommand {
    Help,
    History,
    Exit,
}

fn parse_command(input: &str) -> Option<ChatCommand> {
    match input.trim().to_lowercase().as_str() {
        "/help" | "/?" => Some(ChatCommand::Help),
        "/history" => Some(ChatCommand::History),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        _ => None,
    }
}

pub async fn run_chat(state: &AppState, json: bool) -> Result<()> {
    let chat_config = &state.config.chat;
    let mut session = ChatSession::new(GREETING, chat_config.history_window);
    session.toggle();

    if !json {
        print_banner(&chat_config.assistant_name, state.chat.provider_name());
        println!("  {}", style(GREETING).cyan());
        println!();
    }

    loop {
        let line: String = match Input::new()
            .with_prompt(format!("{}", style("Sen").bold()))
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            // EOF or a closed terminal ends the session.
            Err(_) => break,
        };

        match parse_command(&line) {
            Some(ChatCommand::Exit) => break,
            Some(ChatCommand::Help) => {
                print_help();
                continue;
            }
            Some(ChatCommand::History) => {
                for turn in session.turns() {
                    println!("  {} {}", style(turn.role.to_string()).dim(), turn.text);
                }
                continue;
            }
            None => {}
        }

        let Some(outbound) = session.submit(&line) else {
            continue;
        };
        let request = ChatRequest {
            message: Some(outbound.message),
            history: outbound.history,
        };

        let outcome = match state.chat.respond(request).await {
            Ok(reply) => {
                if json {
                    println!("{}", serde_json::to_string(&reply)?);
                } else {
                    println!();
                    for segment in &reply.segments {
                        println!("  {}", render_segment(segment));
                    }
                    println!();
                }
                TurnOutcome::Reply(reply.reply)
            }
            Err(e) => {
                tracing::warn!(error = %e, "chat turn failed");
                outcome_for(&e)
            }
        };

        if let Some(turn) = session.complete(outcome.clone())
            && !matches!(outcome, TurnOutcome::Reply(_))
        {
            if json {
                println!("{}", serde_json::json!({"error": turn.text}));
            } else {
                println!("  {}", style(&turn.text).red());
            }
        }
    }

    if !json {
        println!("  {}", style("Görüşmek üzere!").dim());
    }
    Ok(())
}

/// Upstream failures that never produced an answer count as connection
/// errors; everything else is an error response.
fn outcome_for(error: &ChatError) -> TurnOutcome {
    match error {
        ChatError::Gateway(LlmError::Timeout(_)) => TurnOutcome::ConnectionError,
        _ => TurnOutcome::ErrorResponse,
    }
}

fn render_segment(segment: &ReplySegment) -> String {
    match segment {
        ReplySegment::PlainText { text } => text.trim().to_string(),
        ReplySegment::ActionLink => format!(
            "{} {}",
            style(format!("[{MEMBERS_LINK_LABEL}]")).green().bold(),
            style(segment.href().unwrap_or_default()).dim()
        ),
        ReplySegment::Button { url, label, .. } if url.is_empty() => {
            style(format!("[{label}]")).dim().to_string()
        }
        ReplySegment::Button {
            label, external, ..
        } => {
            let marker = if *external { " ↗" } else { "" };
            format!(
                "{} {}{}",
                style(format!("[{label}]")).green().bold(),
                style(segment.href().unwrap_or_default()).dim(),
                marker
            )
        }
    }
}

fn print_banner(assistant: &str, provider: &str) {
    println!();
    println!("  {}", style(assistant).cyan().bold());
    println!("  {}  {}", style("Provider:").bold(), style(provider).dim());
    println!();
    println!("  {}", style("Type /help for commands, /exit to leave").dim());
    println!("  {}", style("---").dim());
    println!();
}

fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!("  {}     Show this help message", style("/help").cyan());
    println!("  {}  Show the conversation so far", style("/history").cyan());
    println!("  {}     Leave the chat", style("/exit").cyan());
    println!();
}
