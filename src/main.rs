use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use meeting_actions::io::{read_blocks_file, to_json_string, write_json};
use meeting_actions::{
    AppConfig, BlockActionsPayload, BotContext, ExtractionReport, HumanActionList,
    RenderedChecklist, reduce_values,
};

#[derive(Parser)]
#[command(name = "meeting-actions")]
#[command(author, version, about = "Meeting transcript action items as a Slack checklist", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/meeting-sync/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract action items from meeting notes
    Extract {
        /// Meeting markdown files; when omitted, the vault is scanned for the date
        inputs: Vec<PathBuf>,

        /// Meeting date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Print JSON instead of the plain-text list
        #[arg(long)]
        json: bool,

        /// Write the output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render the interactive checklist as Block Kit JSON
    Checklist {
        inputs: Vec<PathBuf>,

        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Apply checked values to a rendered checklist
    Reduce {
        /// Block Kit JSON: a block array or a message with `blocks`
        #[arg(short, long)]
        blocks: PathBuf,

        /// Checked option values, encoded or literal item text
        #[arg(short, long = "checked")]
        checked: Vec<String>,

        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Post the daily summary to Slack
    Post {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Post the interactive checklist to Slack
    Send {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Handle a block_actions payload and update the checklist message
    Interact {
        /// Payload JSON or form body; `-` reads stdin
        #[arg(short, long)]
        payload: PathBuf,

        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Extract {
            inputs,
            date,
            json,
            output,
        } => extract(config, inputs, resolve_date(date), json, output),
        Commands::Checklist {
            inputs,
            date,
            output,
        } => checklist(config, inputs, resolve_date(date), output),
        Commands::Reduce {
            blocks,
            checked,
            date,
            output,
        } => reduce(&blocks, &checked, resolve_date(date), output),
        Commands::Post { date } => {
            let bot = BotContext::connect(config)?;
            let posted = bot.post_summary(resolve_date(date)).await?;
            info!("Summary posted as {}", posted.ts);
            Ok(())
        }
        Commands::Send { date } => {
            let bot = BotContext::connect(config)?;
            let posted = bot.send_checklist(resolve_date(date)).await?;
            info!("Checklist posted as {}", posted.ts);
            Ok(())
        }
        Commands::Interact { payload, date } => {
            let body = read_input(&payload)?;
            let payload = BlockActionsPayload::from_body(&body)?;
            let bot = BotContext::connect(config)?;
            match bot.handle_interaction(&payload, resolve_date(date)).await? {
                Some(update) => info!("Checklist now: {}", update.text()),
                None => warn!("Payload had no checkbox actions; nothing to update"),
            }
            Ok(())
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn resolve_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        return std::io::read_to_string(std::io::stdin()).context("Failed to read stdin");
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
}

fn emit(content: &str, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write file: {:?}", path))?;
            info!("Output written to {:?}", path);
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Explicit inputs win; otherwise the configured vault is scanned for `date`
fn meeting_paths(bot: &BotContext, inputs: Vec<PathBuf>, date: NaiveDate) -> Result<Vec<PathBuf>> {
    if !inputs.is_empty() {
        return Ok(inputs);
    }
    let paths = bot.meeting_files(date)?;
    info!("Found {} meeting files for {}", paths.len(), date);
    Ok(paths)
}

fn extract(
    config: AppConfig,
    inputs: Vec<PathBuf>,
    date: NaiveDate,
    json: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let bot = BotContext::offline(config)?;
    let paths = meeting_paths(&bot, inputs, date)?;
    let groups = bot.extract(&paths)?;
    let partition = bot.partition(&groups);

    info!(
        "Extracted {} owner and {} other meeting groups",
        partition.owner.len(),
        partition.other.len()
    );

    if json {
        let report = ExtractionReport::new(date, &partition, paths.len());
        match output {
            Some(path) => {
                write_json(&report, &path)?;
                info!("Output written to {:?}", path);
                Ok(())
            }
            None => emit(&to_json_string(&report)?, None),
        }
    } else {
        emit(HumanActionList::new(&partition).format().trim_end(), output)
    }
}

fn checklist(
    config: AppConfig,
    inputs: Vec<PathBuf>,
    date: NaiveDate,
    output: Option<PathBuf>,
) -> Result<()> {
    let bot = BotContext::offline(config)?;
    let paths = meeting_paths(&bot, inputs, date)?;
    let rendered = bot.checklist_for(&paths, date)?;
    info!("{}", rendered.text);
    emit(&to_json_string(&rendered)?, output)
}

fn reduce(blocks: &Path, checked: &[String], date: NaiveDate, output: Option<PathBuf>) -> Result<()> {
    let blocks = read_blocks_file(blocks)?;
    let outcome = reduce_values(&blocks, checked, date);
    info!("{:?}: {}", outcome.state, outcome.fallback_text());

    let rendered = RenderedChecklist {
        text: outcome.fallback_text(),
        blocks: outcome.blocks,
    };
    emit(&to_json_string(&rendered)?, output)
}
