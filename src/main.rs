//! SDR Console CLI

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use sdr_console::config::{ConsoleConfig, MAX_COUNT, MIN_COUNT};
use sdr_console::error::{ConsoleError, FixSuggestion};
use sdr_console::history::{HistorySource, HttpHistory};
use sdr_console::lead::LeadRecord;
use sdr_console::log_stream::LogKind;
use sdr_console::logging::{init_tracing, LogTarget};
use sdr_console::mission::{ConsoleState, MissionController, MissionOutcome, WebSocketTransport};

#[derive(Parser)]
#[command(name = "sdr-console")]
#[command(about = "SDR Console - operator console for the lead-generation pipeline")]
#[command(version)]
struct Cli {
    /// Backend base URL (default: $SDR_SERVER_URL or http://localhost:8000)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the full-screen console (default)
    Tui {
        /// Target niche for the first mission
        #[arg(long)]
        niche: Option<String>,

        /// Number of leads to request (1-10)
        #[arg(long, value_parser = clap::value_parser!(u32).range(MIN_COUNT as i64..=MAX_COUNT as i64))]
        count: Option<u32>,

        /// Replay a scripted mission instead of connecting to a backend
        #[arg(long)]
        demo: bool,

        /// Clear the terminal log on every launch
        #[arg(long)]
        clear_log: bool,

        /// Diagnostics file (default: $SDR_LOG_FILE or the user data dir)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Run one mission without the TUI and stream its log to stdout
    Launch {
        /// Target niche
        #[arg(long)]
        niche: Option<String>,

        /// Number of leads to request (1-10)
        #[arg(long, value_parser = clap::value_parser!(u32).range(MIN_COUNT as i64..=MAX_COUNT as i64))]
        count: Option<u32>,
    },

    /// Print previously generated drafts
    History,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            if let Some(suggestion) = e
                .downcast_ref::<ConsoleError>()
                .and_then(|e| e.fix_suggestion())
            {
                eprintln!("  {} {}", "Fix:".yellow(), suggestion);
            }
            1
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let mut config = ConsoleConfig::from_env()?;
    if let Some(server) = cli.server.as_deref() {
        config.set_server_url(server)?;
    }

    match cli.command.unwrap_or(Commands::Tui {
        niche: None,
        count: None,
        demo: false,
        clear_log: false,
        log_file: None,
    }) {
        Commands::Tui {
            niche,
            count,
            demo,
            clear_log,
            log_file,
        } => {
            apply_mission_args(&mut config, niche, count);
            config.clear_log_on_launch |= clear_log;
            if let Some(path) = log_file {
                config.log_file = path;
            }
            init_tracing(LogTarget::File(config.log_file.clone()))?;
            sdr_console::tui::run(&config, demo).await?;
            Ok(0)
        }
        Commands::Launch { niche, count } => {
            init_tracing(LogTarget::Stderr)?;
            apply_mission_args(&mut config, niche, count);
            launch_headless(&config).await
        }
        Commands::History => {
            init_tracing(LogTarget::Stderr)?;
            print_history(&config).await
        }
    }
}

fn apply_mission_args(config: &mut ConsoleConfig, niche: Option<String>, count: Option<u32>) {
    if let Some(niche) = niche {
        config.niche = niche;
    }
    if let Some(count) = count {
        config.count = count;
    }
}

async fn launch_headless(config: &ConsoleConfig) -> anyhow::Result<i32> {
    let transport = WebSocketTransport::new(config.mission_url()?);
    println!(
        "{} Mission: {} | leads: {} | server: {}",
        "→".cyan(),
        config.niche.cyan().bold(),
        config.count.to_string().cyan(),
        transport.url()
    );

    let state = ConsoleState::new(config.niche.clone(), config.count);
    let mut controller = MissionController::new(state, Box::new(transport));
    controller.launch()?;

    let mut next_seq = 0;
    let mut printed_leads = 0;
    // The backend may hold the channel open after the final frame
    while controller.has_connection() && controller.is_running() {
        let event = controller.next_event().await;
        controller.handle_event(event);

        let state = controller.state();
        for entry in state.log.since(next_seq) {
            match entry.kind {
                LogKind::Remote => println!("{}", entry.to_string().dimmed()),
                LogKind::Console => println!("{}", entry),
            }
        }
        next_seq = state.log.next_seq();

        for lead in &state.leads.records()[printed_leads..] {
            print_lead(lead);
        }
        printed_leads = state.leads.len();
    }

    match &controller.state().mission.last_outcome {
        Some(MissionOutcome::Completed) => {
            println!("{} {} draft(s) ready", "✓".green(), printed_leads);
            Ok(0)
        }
        Some(MissionOutcome::Failed(reason)) => Err(ConsoleError::Channel(reason.clone()).into()),
        None => Err(ConsoleError::Channel("mission ended without an outcome".into()).into()),
    }
}

async fn print_history(config: &ConsoleConfig) -> anyhow::Result<i32> {
    let history = HttpHistory::new(config.history_url()?);
    let records = history.fetch_or_empty().await;

    println!("{} {} drafts", "✉".cyan(), records.len());
    for lead in &records {
        print_lead(lead);
    }
    Ok(0)
}

fn print_lead(lead: &LeadRecord) {
    println!(
        "  {} {} {} {}",
        "✉".green(),
        lead.company_or_default().bold(),
        "→".dimmed(),
        lead.person_or_default()
    );
    if let Some(subject) = lead.email_subject.as_deref() {
        println!("    {}", subject.dimmed());
    }
}
