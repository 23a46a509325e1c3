//! Operator console on stdin/stdout.
//!
//! Runs beside the listener and shares only the cache store (through the
//! cache use cases) and the lookup policy with it.

use crate::di::UseCases;
use dnstoy_application::services::LookupPolicy;
use dnstoy_domain::{CacheEntry, DomainError};
use std::io::BufRead;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const PROMPT: &str = "\nEnter 'dump' to display database contents, 'disable' to disable DNS lookups, \
'enable' to enable DNS lookups, or 'exit' to quit ('help' lists everything):\n";

const HELP: &str = "Commands:
  dump                 print every cached domain
  enable               allow upstream lookups for cache misses
  disable              answer from the cache only
  status               lookup state, entry count and resolver
  add <domain> <ip>    insert a cache entry by hand
  exit | quit          stop the server
";

const DUMP_RULE_WIDTH: usize = 81;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Dump,
    Enable,
    Disable,
    Status,
    Add { domain: String, address: String },
    Help,
    Exit,
    Invalid,
}

impl ConsoleCommand {
    /// `None` for a blank line.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next()?.to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match (verb.as_str(), args.as_slice()) {
            ("dump", []) => Self::Dump,
            ("enable", []) => Self::Enable,
            ("disable", []) => Self::Disable,
            ("status", []) => Self::Status,
            ("help", []) => Self::Help,
            ("exit" | "quit", []) => Self::Exit,
            ("add", [domain, address]) => Self::Add {
                domain: domain.to_string(),
                address: address.to_string(),
            },
            _ => Self::Invalid,
        };
        Some(command)
    }
}

pub struct AdminConsole {
    policy: Arc<LookupPolicy>,
    use_cases: UseCases,
    resolver: String,
    shutdown: CancellationToken,
}

impl AdminConsole {
    pub fn new(
        policy: Arc<LookupPolicy>,
        use_cases: UseCases,
        resolver: String,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            policy,
            use_cases,
            resolver,
            shutdown,
        }
    }

    /// Reads commands until `exit`, end of input, or shutdown.
    pub async fn run<W>(&self, mut lines: mpsc::Receiver<String>, mut out: W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        out.write_all(PROMPT.as_bytes()).await?;
        out.flush().await?;

        loop {
            let line = tokio::select! {
                _ = self.shutdown.cancelled() => break,
                line = lines.recv() => line,
            };

            let Some(line) = line else {
                info!("Console input closed; server keeps running");
                break;
            };

            let Some(command) = ConsoleCommand::parse(&line) else {
                continue;
            };
            debug!(command = ?command, "Console command");

            let keep_running = self.execute(command, &mut out).await?;
            if !keep_running {
                break;
            }

            out.write_all(PROMPT.as_bytes()).await?;
            out.flush().await?;
        }

        Ok(())
    }

    async fn execute<W>(&self, command: ConsoleCommand, out: &mut W) -> std::io::Result<bool>
    where
        W: AsyncWrite + Unpin,
    {
        let text = match command {
            ConsoleCommand::Dump => match self.use_cases.dump_cache.execute().await {
                Ok(entries) => render_dump(&entries),
                Err(e) => format!("Error dumping database: {}\n", e),
            },
            ConsoleCommand::Disable => {
                self.policy.set_enabled(false);
                "New DNS lookups disabled.\n".to_string()
            }
            ConsoleCommand::Enable => {
                self.policy.set_enabled(true);
                "DNS lookups enabled.\n".to_string()
            }
            ConsoleCommand::Status => self.render_status().await,
            ConsoleCommand::Add { domain, address } => {
                match self.use_cases.add_entry.execute(&domain, &address).await {
                    Ok(entry) => format!("Added {} -> {}\n", entry.domain, entry.address),
                    Err(DomainError::DuplicateKey(domain)) => {
                        format!("{} is already cached.\n", domain)
                    }
                    Err(e) => format!("Error adding entry: {}\n", e),
                }
            }
            ConsoleCommand::Help => HELP.to_string(),
            ConsoleCommand::Exit => {
                out.write_all(b"Exiting...\n").await?;
                out.flush().await?;
                info!("Shutdown requested from console");
                self.shutdown.cancel();
                return Ok(false);
            }
            ConsoleCommand::Invalid => "Invalid command. Try again.\n".to_string(),
        };

        out.write_all(text.as_bytes()).await?;
        out.flush().await?;
        Ok(true)
    }

    async fn render_status(&self) -> String {
        let lookups = if self.policy.is_enabled() {
            "enabled"
        } else {
            "disabled"
        };
        let entries = match self.use_cases.count_entries.execute().await {
            Ok(count) => count.to_string(),
            Err(e) => format!("unavailable ({})", e),
        };
        format!(
            "Lookups: {}\nCached domains: {}\nResolver: {}\n",
            lookups, entries, self.resolver
        )
    }
}

fn render_dump(entries: &[CacheEntry]) -> String {
    let mut text = String::from("\nDatabase contents:\n");
    text.push_str(&format!("{:<40}{:<30}{:<30}\n", "DOMAIN", "IP", "QUERY COUNT"));
    text.push_str(&"-".repeat(DUMP_RULE_WIDTH));
    text.push('\n');
    for entry in entries {
        text.push_str(&format!(
            "{:<40}{:<30}{:<30}\n",
            entry.domain, entry.address, entry.query_count
        ));
    }
    text
}

/// Forwards stdin lines from a dedicated thread. Tokio's own stdin would
/// hold runtime shutdown until the next line arrives.
pub fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);

    let spawned = std::thread::Builder::new()
        .name("console-stdin".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to read console input");
                        break;
                    }
                }
            }
        });

    if let Err(e) = spawned {
        warn!(error = %e, "Console unavailable");
    }

    rx
}
