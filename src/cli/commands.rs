use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use ussd_sim::{
    validate, Catalog, Result, Rule, Screen, ServiceConfig, Session, Severity, UssdError,
    UssdService, START,
};

use super::render;

#[derive(Parser)]
#[command(name = "ussd-sim")]
#[command(about = "USSD menu session simulator")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Dial in interactively (0 = back, 00 = main menu, q = quit)
    ussd-sim dial

    # Script a session and print every screen
    ussd-sim run banking balance 1234

    # Same, as JSON, without the simulated delay
    ussd-sim --latency-ms 0 run banking balance 1234 --format json

    # Use a custom menu tree
    ussd-sim --catalog menus.yml catalog validate

    # Dump the built-in menu tree as a starting point
    ussd-sim catalog export > menus.yml
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// YAML catalog file (defaults to the built-in TeleUSSD menus)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Simulated network latency per request
    #[arg(long, global = true, default_value = "700")]
    pub latency_ms: u64,

    /// Requests slower than this fail with a transport error
    #[arg(long, global = true, default_value = "5000")]
    pub timeout_ms: u64,
}

impl Cli {
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            latency: Duration::from_millis(self.latency_ms),
            request_timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session
    Dial {
        /// Print the session history on exit
        #[arg(long)]
        history: bool,
    },

    /// Send a fixed sequence of tokens and print each screen
    Run {
        /// Tokens to send, in order
        tokens: Vec<String>,

        /// Do not send an implicit leading "start"
        #[arg(long)]
        no_start: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Inspect the menu catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all path keys
    List,

    /// Show the screen at a path key
    Show {
        /// Dotted path key, e.g. banking.transfer
        key: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Check the catalog for authoring problems
    Validate,

    /// Print the catalog as YAML
    Export,
}

/// One step of a scripted run
#[derive(Debug, Serialize)]
pub struct Step {
    pub token: String,
    pub rule: Rule,
    /// Catalog key after the step
    pub path: String,
    pub screen: Screen,
}

const REQUEST_FAILED: &str = "Failed to process your request";

pub fn load_catalog(path: Option<&Path>) -> Result<Arc<Catalog>> {
    match path {
        Some(path) => Ok(Arc::new(Catalog::load(path)?)),
        None => Ok(Catalog::builtin_shared()),
    }
}

pub async fn dial(service: &UssdService, show_history: bool) -> Result<()> {
    let mut session = service.dial(None).await;
    println!("Session {}", session.id);

    let mut screen = service.engine().current_screen(&[]);
    exchange(service, &mut session, &mut screen, START).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\n{}{}", render::screen(&screen), render::prompt(&screen));
        std::io::stdout().flush()?;

        let Some(line) = read_entry(&mut lines, &screen).await? else {
            println!();
            break;
        };
        if matches!(line.trim(), "q" | "quit") {
            break;
        }
        let Some(token) = render::token_for(&screen, &line) else {
            continue;
        };

        exchange(service, &mut session, &mut screen, &token).await?;
    }

    if show_history {
        print_history(&session.history);
    }
    service.hang_up(&session.id).await;

    Ok(())
}

/// Sends one token. A transport failure is reported and leaves the last
/// session and screen in place; returns whether the screen changed.
async fn exchange(
    service: &UssdService,
    session: &mut Session,
    screen: &mut Screen,
    token: &str,
) -> Result<bool> {
    match service.send(&session.id, token).await {
        Ok(transition) => {
            *session = transition.session;
            *screen = transition.screen;
            Ok(true)
        }
        Err(UssdError::Transport(reason)) => {
            tracing::warn!("Request failed: {}", reason);
            eprintln!("{}", REQUEST_FAILED);
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Reads the next entry; PIN screens are read without echo on a terminal
async fn read_entry<R>(
    lines: &mut tokio::io::Lines<R>,
    screen: &Screen,
) -> Result<Option<String>>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    let secret = screen.input_kind.is_some_and(|kind| kind.is_secret());
    if secret && std::io::stdin().is_terminal() {
        let entry = tokio::task::spawn_blocking(rpassword::read_password)
            .await
            .map_err(std::io::Error::other)??;
        return Ok(Some(entry));
    }

    Ok(lines.next_line().await?)
}

/// Runs a token script against a fresh session
pub async fn run_steps(
    service: &UssdService,
    tokens: &[String],
    no_start: bool,
) -> Result<Vec<Step>> {
    let session = service.dial(None).await;
    let script = (!no_start)
        .then(|| START.to_string())
        .into_iter()
        .chain(tokens.iter().cloned());

    let mut steps = Vec::new();
    for token in script {
        let transition = match service.send(&session.id, &token).await {
            Ok(transition) => transition,
            Err(e) => {
                service.hang_up(&session.id).await;
                return Err(e);
            }
        };
        steps.push(Step {
            token,
            rule: transition.rule,
            path: transition.session.current_key(),
            screen: transition.screen,
        });
    }
    service.hang_up(&session.id).await;

    Ok(steps)
}

pub async fn run_script(
    service: &UssdService,
    tokens: &[String],
    no_start: bool,
    format: &str,
) -> Result<()> {
    let steps = run_steps(service, tokens, no_start).await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&steps)?);
        return Ok(());
    }

    for step in &steps {
        println!("\n>>> {}  [{:?} -> {}]", step.token, step.rule, step.path);
        print!("{}", render::screen(&step.screen));
    }

    Ok(())
}

pub fn list_keys(catalog: &Catalog) {
    for (key, screen) in catalog.entries() {
        println!("{:<56} {}", key, screen.kind.as_str());
    }
    println!("\n{} screens", catalog.len());
}

pub fn show_screen(catalog: &Catalog, key: &str, format: &str) -> Result<()> {
    let screen = catalog
        .lookup(key)
        .ok_or_else(|| UssdError::Catalog(format!("No screen at '{}'", key)))?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(screen)?);
    } else {
        print!("{}", render::screen(screen));
    }

    Ok(())
}

/// Prints validation issues; returns whether any of them is an error
pub fn validate_catalog(catalog: &Catalog) -> bool {
    let issues = validate(catalog);
    for issue in &issues {
        println!("{}", issue);
    }

    let errors = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count();
    println!(
        "\n{} screens checked: {} errors, {} warnings",
        catalog.len(),
        errors,
        issues.len() - errors
    );

    errors > 0
}

pub fn export_catalog(catalog: &Catalog) -> Result<()> {
    print!("{}", catalog.to_yaml()?);
    Ok(())
}

fn print_history(history: &[Screen]) {
    println!("\nSession history ({} screens):", history.len());
    for (i, screen) in history.iter().enumerate() {
        let first = screen.lines().next().unwrap_or_default();
        println!("  {:>3}. [{}] {}", i + 1, screen.kind.as_str(), first);
    }
}
