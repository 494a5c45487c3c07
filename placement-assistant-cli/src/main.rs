//! CLI entry point for the placement assistant

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use placement_assistant_core::config::{Config, ConfigLoader};
use placement_assistant_core::format::local_time;
use placement_assistant_core::logging::init_logging;
use placement_assistant_core::responder::{ResponseDispatcher, FALLBACK_RESPONSES};
use placement_assistant_core::utils::{non_blank, truncate};
use placement_assistant_core::{ChatSession, Message, PanelState, Sender, Submission};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "placement-assistant")]
#[command(about = "Rule-based help assistant for the placement portal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration directory
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Chat,
    /// Print the reply to a single message
    Ask {
        /// Message to send
        #[arg(short, long)]
        message: String,
        /// Seed for the fallback reply choice
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List the keyword rules in evaluation order
    Rules,
    /// Show configuration
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_loader = if let Some(dir) = cli.config_dir {
        ConfigLoader::with_dir(dir)
    } else {
        ConfigLoader::new()
    };
    let config = config_loader.load()?;
    let _guard = init_logging(&config.logging);

    match cli.command {
        Commands::Chat => {
            info!("Starting chat session");
            run_chat(&config).await?;
        }
        Commands::Ask { message, seed } => {
            info!("Answering one-shot message");
            run_ask(&message, seed)?;
        }
        Commands::Rules => run_rules(),
        Commands::Status => run_status(&config_loader, &config)?,
    }

    Ok(())
}

fn print_message(name: &str, message: &Message) {
    let label = match message.sender {
        Sender::Bot => style(format!("🤖 {}", name)).cyan().bold(),
        Sender::User => style("You".to_string()).green().bold(),
    };
    println!("{} {}", label, style(local_time(message)).dim());
    for paragraph in message.paragraphs() {
        println!("  {}", paragraph);
    }
    println!();
}

fn print_help_line() {
    println!(
        "{}",
        style("Type a message and press Enter. /toggle shows or hides the panel, /history reprints the chat, /quit exits.").dim()
    );
}

/// Terminal rendering of one session
///
/// Messages are rendered from the session history, so a slow renderer that
/// misses broadcast events still shows everything.
struct ChatView<'a> {
    name: &'a str,
    panel: PanelState,
    hidden: Vec<Message>,
    seen: usize,
}

impl<'a> ChatView<'a> {
    fn new(name: &'a str) -> Self {
        Self {
            name,
            panel: PanelState::new(),
            hidden: Vec::new(),
            seen: 0,
        }
    }

    /// Render or hold back every message appended since the last call
    fn catch_up(&mut self, session: &ChatSession) {
        for message in session.history_since(self.seen) {
            self.seen += 1;
            if self.panel.note_incoming(&message) {
                print_message(self.name, &message);
            } else {
                self.hidden.push(message);
            }
        }
    }

    fn toggle(&mut self) {
        if self.panel.toggle() {
            println!("{}", style("[panel opened]").dim());
            for message in self.hidden.drain(..) {
                print_message(self.name, &message);
            }
        } else {
            println!("{}", style("[panel closed]").dim());
        }
    }
}

async fn run_chat(config: &Config) -> Result<()> {
    let name = config.assistant.name.as_str();
    let session = ChatSession::from_config(&config.assistant);
    let mut events = session.subscribe();
    let mut view = ChatView::new(name);

    println!("{}", style(name).bold().cyan());
    println!("{}", style("How can I help you?").dim());
    print_help_line();
    println!();

    view.panel.toggle();
    session.init_session();
    view.catch_up(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match line.trim() {
                    "/quit" => break,
                    "/toggle" => view.toggle(),
                    "/history" => {
                        for message in session.history() {
                            print_message(name, &message);
                        }
                    }
                    _ if !view.panel.is_open() => {
                        println!(
                            "{}",
                            style(format!("[panel closed, {} unread] use /toggle to open", view.panel.unread())).dim()
                        );
                    }
                    text => {
                        if session.submit_user_text(text) == Submission::Ignored {
                            debug!("Blank input, nothing sent");
                        }
                    }
                }
            }
            event = events.recv() => {
                match event {
                    Ok(_) => view.catch_up(&session),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Renderer fell behind, catching up from history");
                        view.catch_up(&session);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }

    // Scheduled replies are never cancelled; show them before exiting.
    session.idle().await;
    view.catch_up(&session);

    info!(messages = session.len(), "Chat session ended");
    Ok(())
}

fn run_ask(message: &str, seed: Option<u64>) -> Result<()> {
    let Some(text) = non_blank(message) else {
        anyhow::bail!("message must not be blank");
    };

    let dispatcher = seed
        .map(ResponseDispatcher::with_seed)
        .unwrap_or_default();

    let topic = dispatcher
        .classify(text)
        .map(|t| t.to_string())
        .unwrap_or_else(|| "fallback".to_string());
    println!("{} {}", style("Topic:").bold(), style(topic).dim());
    println!("{}", dispatcher.dispatch(text));
    Ok(())
}

fn run_rules() {
    let dispatcher = ResponseDispatcher::new();

    println!("{}", style("Keyword rules (first match wins)").bold().cyan());
    for (index, rule) in dispatcher.rules().iter().enumerate() {
        let preview = rule.response.lines().next().unwrap_or_default();
        println!(
            "  {}. {} [{}] {}",
            index + 1,
            style(rule.topic).bold(),
            rule.keywords.join(", "),
            style(truncate(preview, 40)).dim()
        );
    }
    println!(
        "  {}. {} ({} stock replies, chosen at random)",
        dispatcher.rules().len() + 1,
        style("fallback").bold(),
        FALLBACK_RESPONSES.len()
    );
}

fn run_status(loader: &ConfigLoader, config: &Config) -> Result<()> {
    println!("{}", style("Placement Assistant Status").bold().cyan());
    println!("Version: {}\n", env!("CARGO_PKG_VERSION"));

    println!("{}", style("Configuration:").bold());
    println!("  Config directory: {}", loader.config_dir().display());
    println!("  Assistant name: {}", config.assistant.name);
    println!("  Reply delay: {} ms", config.assistant.reply_delay_ms);
    println!();

    println!("{}", style("Logging:").bold());
    println!("  Level: {}", config.logging.level);
    println!("  Format: {}", config.logging.format);
    println!("  Directory: {}", config.logging.dir);
    println!();

    println!("{}", style("Effective config:").bold());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
