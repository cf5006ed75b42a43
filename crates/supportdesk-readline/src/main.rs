mod commands;
mod helper;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use supportdesk_application::quick_examples::{QUICK_EXAMPLES, quick_example};
use supportdesk_application::utility_agent_service::{
    SAMPLE_EMAIL, SAMPLE_MEDICAL_NOTES, SAMPLE_NEWSLETTER,
};
use supportdesk_application::{Exchange, SupportSession, UtilityAgentService};
use supportdesk_core::{ChatCompletionService, SupportdeskError};
use supportdesk_core::transcript::{Turn, TurnRole};
use supportdesk_infrastructure::config_service::API_KEY_ENV;
use supportdesk_infrastructure::{ConfigService, SupportdeskPaths};
use supportdesk_interaction::MistralApiAgent;
use supportdesk_interaction::supported_models::is_known_model;

use crate::commands::{ReplCommand, parse};
use crate::helper::CliHelper;

/// Intent-routed customer support assistant.
#[derive(Parser, Debug)]
#[command(name = "supportdesk", version, about, long_about = None)]
struct Cli {
    /// Override the completion model for this run.
    #[arg(long)]
    model: Option<String>,

    /// Directory holding secret.json and config.toml.
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "debug,hyper=info,reqwest=info"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // ===== Configuration =====
    let paths = SupportdeskPaths::new(cli.config_dir.as_deref());
    let config_service = ConfigService::new(paths.clone())?;

    let mut settings = match config_service.resolve_completion_settings().await {
        Ok(settings) => settings,
        Err(err) if !err.is_config() => return Err(err.into()),
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            match paths.ensure_secret_file() {
                Ok(path) => eprintln!(
                    "{}",
                    format!(
                        "Add your Mistral API key to {} or set ${}.",
                        path.display(),
                        API_KEY_ENV
                    )
                    .yellow()
                ),
                Err(e) => tracing::warn!(error = %e, "could not create secret.json template"),
            }
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Some(model) = cli.model {
        settings = settings.with_model(model);
    }
    if !is_known_model(&settings.model) {
        tracing::warn!(model = %settings.model, "model is not in the known Mistral model list");
    }

    let agent = MistralApiAgent::from_settings(&settings)?;
    let service: Arc<dyn ChatCompletionService> = Arc::new(agent);
    let session = SupportSession::new(service.clone());
    let utilities = UtilityAgentService::new(service.clone());

    tracing::info!(session_id = %session.id(), model = %service.model(), "session started");

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Supportdesk ===".bright_magenta().bold());
    let banner = format!(
        "Model: {}. Ask a banking question, type /help, or 'quit' to exit.",
        service.model()
    );
    println!("{}", banner.bright_black());
    println!();

    // ===== Main REPL Loop =====
    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        };

        let command = parse(&line);
        if command != ReplCommand::Empty {
            let _ = rl.add_history_entry(line.trim());
        }

        match command {
            ReplCommand::Empty => {}
            ReplCommand::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            ReplCommand::Help => print_help(),
            ReplCommand::Message(text) => submit(&session, &text).await,
            ReplCommand::Example(Some(number)) => match quick_example(number) {
                Some(text) => {
                    println!("{}", format!("> {text}").green());
                    submit(&session, text).await;
                }
                None => println!(
                    "{}",
                    format!("There are {} examples; see /examples.", QUICK_EXAMPLES.len())
                        .bright_black()
                ),
            },
            ReplCommand::Example(None) => {
                println!("{}", "Usage: /example <number>".bright_black());
            }
            ReplCommand::Examples => {
                for (index, text) in QUICK_EXAMPLES.iter().enumerate() {
                    println!("  {} {}", format!("{}.", index + 1).bright_black(), text);
                }
            }
            ReplCommand::Clear => {
                session.clear().await;
                println!("{}", "Conversation cleared.".bright_black());
            }
            ReplCommand::History => print_history(&session.transcript().await),
            ReplCommand::Classify(text) => {
                let Some(text) = text else {
                    println!("{}", "Usage: /classify <inquiry>".bright_black());
                    continue;
                };
                let classification = session.classifier().classify_detailed(&text).await;
                println!(
                    "{} {}",
                    format!("[{}]", classification.category).bright_magenta(),
                    format!("({:?})", classification.source).bright_black()
                );
            }
            ReplCommand::Extract(text) => {
                let notes = text.as_deref().unwrap_or(SAMPLE_MEDICAL_NOTES);
                match utilities.extract_structured(notes).await {
                    Ok(outcome) => match outcome.parsed {
                        Some(value) => {
                            let pretty = serde_json::to_string_pretty(&value)
                                .unwrap_or_else(|_| outcome.raw.clone());
                            print_block(&pretty);
                        }
                        None => {
                            println!("{}", "Reply was not valid JSON:".yellow());
                            print_block(&outcome.raw);
                        }
                    },
                    Err(e) => print_tool_error(&e),
                }
            }
            ReplCommand::Email(text) => {
                let email = text.as_deref().unwrap_or(SAMPLE_EMAIL);
                match utilities.draft_email_reply(email).await {
                    Ok(reply) => print_block(&reply),
                    Err(e) => print_tool_error(&e),
                }
            }
            ReplCommand::Summarize(text) => {
                let newsletter = text.as_deref().unwrap_or(SAMPLE_NEWSLETTER);
                match utilities.summarize(newsletter).await {
                    Ok(summary) => print_block(&summary),
                    Err(e) => print_tool_error(&e),
                }
            }
            ReplCommand::Unknown(name) => {
                println!("{}", format!("Unknown command {name}; try /help").bright_black());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn submit(session: &SupportSession, text: &str) {
    match session.submit(text).await {
        Some(exchange) => print_exchange(&exchange),
        None => tracing::debug!("blank inquiry ignored"),
    }
}

fn print_exchange(exchange: &Exchange) {
    let caption = format!("[{}]", exchange.classification.category);
    println!("{}", caption.bright_magenta());
    print_block(exchange.assistant.text());
    if exchange.degraded {
        println!("{}", "(model unavailable, showing standard guidance)".bright_black());
    }
    println!();
}

fn print_history(turns: &[Turn]) {
    if turns.is_empty() {
        println!("{}", "No messages yet.".bright_black());
        return;
    }
    for turn in turns {
        match turn.role() {
            TurnRole::User => println!("{}", format!("You: {}", turn.text()).green()),
            TurnRole::Assistant => {
                let caption = turn
                    .category()
                    .map(|c| format!("Assistant [{c}]:"))
                    .unwrap_or_else(|| "Assistant:".to_string());
                println!("{}", caption.bright_magenta());
                print_block(turn.text());
            }
        }
    }
    println!();
}

fn print_tool_error(err: &SupportdeskError) {
    eprintln!("{}", err.to_string().red());
    if err.is_completion() {
        eprintln!(
            "{}",
            "The model call failed; check the network and the API key.".bright_black()
        );
    }
}

fn print_block(text: &str) {
    for line in text.lines() {
        println!("{}", line.bright_blue());
    }
}

fn print_help() {
    let rows = [
        ("<text>", "ask the support assistant"),
        ("/examples", "list quick example inquiries"),
        ("/example N", "send quick example N"),
        ("/history", "show the conversation"),
        ("/clear", "start a new conversation"),
        ("/classify <text>", "show the category only"),
        ("/extract [notes]", "extract structured fields as JSON"),
        ("/email [email]", "draft a reply to a customer email"),
        ("/summarize [text]", "summarize text in bullet points"),
        ("quit", "exit"),
    ];
    for (command, description) in rows {
        println!("  {} {}", format!("{command:<20}").bright_cyan(), description.bright_black());
    }
}
