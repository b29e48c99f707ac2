//! Message inspection CLI commands: list and count.

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use murmur_core::valence::classify_optional;
use murmur_types::message::Message;
use murmur_types::query::{IndexQueryOptions, MessageFilters};
use murmur_types::valence::ValenceCategory;

use crate::state::ConcreteMessageService;

/// Message subcommands.
#[derive(Subcommand)]
pub enum MessageCommand {
    /// List an identity's messages, newest first by default.
    #[command(alias = "ls")]
    List {
        /// Owner identity id.
        #[arg(long)]
        user: i64,

        /// Message type filter (USER_MESSAGE, ASSISTANT_MESSAGE, SYSTEM_MESSAGE).
        #[arg(long = "type")]
        message_type: Option<String>,

        /// Sort key (repeatable): CREATED_AT_DESC or CREATED_AT_ASC.
        #[arg(long)]
        sort: Vec<String>,

        /// 1-based page number.
        #[arg(long)]
        page: Option<u32>,

        /// Page size (capped at 1000).
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Count an identity's user-authored messages.
    Count {
        /// Owner identity id.
        #[arg(long)]
        user: i64,
    },
}

/// Dispatch a message subcommand.
pub async fn handle_message_command(
    cmd: MessageCommand,
    service: &ConcreteMessageService,
    json: bool,
) -> Result<()> {
    match cmd {
        MessageCommand::List {
            user,
            message_type,
            sort,
            page,
            limit,
        } => {
            let options = IndexQueryOptions {
                filters: MessageFilters {
                    user_id: Some(user.into()),
                    message_type,
                },
                sort,
                page,
                limit,
            };
            list_messages(service, &options, json).await
        }
        MessageCommand::Count { user } => count_messages(service, user, json).await,
    }
}

async fn list_messages(
    service: &ConcreteMessageService,
    options: &IndexQueryOptions,
    json: bool,
) -> Result<()> {
    let messages = service.find(options).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!();
        println!("  {}", style("No messages found.").dim());
        println!();
        return Ok(());
    }

    println!();
    println!("{}", message_table(&messages));
    println!();
    println!(
        "  {} message{}",
        style(messages.len()).bold(),
        if messages.len() == 1 { "" } else { "s" }
    );
    println!();
    Ok(())
}

async fn count_messages(service: &ConcreteMessageService, user: i64, json: bool) -> Result<()> {
    let count = service.user_messages_count(user, None).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "user_id": user, "count": count }))?
        );
    } else {
        println!(
            "  Identity {} has {} user message{}",
            style(user).cyan(),
            style(count).bold(),
            if count == 1 { "" } else { "s" }
        );
    }
    Ok(())
}

fn message_table(messages: &[Message]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Type").fg(Color::White),
        Cell::new("Content").fg(Color::White),
        Cell::new("Valence").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for message in messages {
        table.add_row(vec![
            Cell::new(message.id),
            Cell::new(message.message_type.as_str()),
            Cell::new(truncate(&message.content, 60)),
            valence_cell(message.valence),
            Cell::new(message.created_at.format("%Y-%m-%d %H:%M:%S").to_string()),
        ]);
    }

    table
}

fn valence_cell(valence: Option<f64>) -> Cell {
    let Some(score) = valence else {
        return Cell::new("-").fg(Color::DarkGrey);
    };
    let label = format!("{score:.2}");
    match classify_optional(Some(score)) {
        Some(ValenceCategory::StrongPositive | ValenceCategory::Positive) => {
            Cell::new(label).fg(Color::Green)
        }
        Some(ValenceCategory::StrongNegative | ValenceCategory::Negative) => {
            Cell::new(label).fg(Color::Red)
        }
        Some(ValenceCategory::Neutral) => Cell::new(label),
        None => Cell::new(label).fg(Color::DarkGrey),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
