//! # coachdesk-cli
//!
//! Command-line interface for coachdesk.

mod render;
mod source;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use coachdesk_core::{
    list_classes, load_class, new_session_date, parse_class_data, submit_session,
    visible_students, ClassData, DeskConfig, DeskError, EditBuffer, FieldEdit, FieldKey,
    GridSource, SessionAssembler, StudentInfo, Viewer, SUBMITTED_FIELDS,
};
use coachdesk_http::ScriptClient;
use colored::Colorize;
use source::FileSource;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// coachdesk - class progress records kept in a spreadsheet
#[derive(Parser)]
#[command(name = "coachdesk")]
#[command(author, version, about = "Coaching-class progress dashboard", long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Scripting endpoint URL (overrides config and COACHDESK_API_URL)
    #[arg(long, value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(
        long,
        value_name = "SECS",
        global = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: Option<u64>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the class tabs of the workbook
    Classes,

    /// Show one session of a class
    Show {
        /// Class tab name
        class: String,

        /// Session date as written in the sheet (default: latest)
        #[arg(short, long)]
        date: Option<String>,

        /// Show every tracked field, not only the editable ones
        #[arg(long)]
        all_fields: bool,

        #[command(flatten)]
        viewer: ViewerArgs,

        /// Output format
        #[arg(short = 'f', long = "format", default_value = "table")]
        format: OutputFormat,
    },

    /// Edit and save one session of a class
    Save {
        /// Class tab name
        class: String,

        /// Session date (default: today, as a new session if absent)
        #[arg(short, long)]
        date: Option<String>,

        /// Edit to apply
        #[arg(short = 's', long = "set", value_name = "STUDENT.FIELD=VALUE", required = true)]
        edits: Vec<FieldEdit>,

        #[command(flatten)]
        viewer: ViewerArgs,

        /// Print the payload instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Parse an exported class tab (csv, tsv, json, xlsx, ods)
    Parse {
        /// Grid file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Workbook tab to read (default: first tab)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Output format
        #[arg(short = 'f', long = "format", default_value = "table")]
        format: OutputFormat,
    },
}

/// Who is looking at the class.
#[derive(Args)]
struct ViewerArgs {
    /// Show only the students of this coach
    #[arg(long, value_name = "NAME", conflicts_with = "admin")]
    coach: Option<String>,

    /// Show every student (default)
    #[arg(long)]
    admin: bool,
}

impl ViewerArgs {
    fn viewer(&self) -> Viewer {
        match (&self.coach, self.admin) {
            (Some(name), false) => Viewer::coach(name.clone()),
            _ => Viewer::admin("admin"),
        }
    }
}

/// Output format for results.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// JSON output
    Json,
    /// Pretty table output (default)
    #[default]
    Table,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;

    match cli.command {
        Command::Classes => run_classes(&config).await,
        Command::Show {
            class,
            date,
            all_fields,
            viewer,
            format,
        } => run_show(&config, &class, date, all_fields, &viewer.viewer(), format).await,
        Command::Save {
            class,
            date,
            edits,
            viewer,
            dry_run,
        } => run_save(&config, &class, date, &edits, &viewer.viewer(), dry_run).await,
        Command::Parse {
            file,
            sheet,
            format,
        } => run_parse(&file, sheet.as_deref(), format).await,
    }
}

/// Resolve configuration: file, then environment, then flags.
fn load_config(cli: &Cli) -> Result<DeskConfig> {
    let mut config = match &cli.config {
        Some(path) => DeskConfig::load(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?,
        None => DeskConfig::default(),
    }
    .with_env_overrides()
    .with_api_url_override(cli.api_url.clone());

    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    Ok(config)
}

fn client(config: &DeskConfig) -> Result<ScriptClient> {
    let url = config.require_api_url()?;
    Ok(ScriptClient::with_timeout(url, config.timeout_secs)?)
}

async fn run_classes(config: &DeskConfig) -> Result<()> {
    let client = client(config)?;
    let classes = list_classes(&client, &config.ignored_tabs)
        .await
        .context("Failed to load classes")?;

    if classes.is_empty() {
        println!("{}", "No class tabs found".yellow());
    }
    for class in classes {
        println!("{class}");
    }
    Ok(())
}

async fn fetch_class(config: &DeskConfig, class: &str) -> Result<ClassData> {
    let client = client(config)?;
    match load_class(&client, class).await {
        Some(data) => Ok(data),
        None => bail!("Failed to load class data for '{class}'"),
    }
}

async fn run_show(
    config: &DeskConfig,
    class: &str,
    date: Option<String>,
    all_fields: bool,
    viewer: &Viewer,
    format: OutputFormat,
) -> Result<()> {
    let data = fetch_class(config, class).await?;
    let date = date
        .or_else(|| data.default_date().map(str::to_string))
        .unwrap_or_else(|| new_session_date(chrono::Local::now().date_naive()));

    let entry = data.entry_or_new(&date);
    let visible = visible_students(&data.students, viewer);
    let fields: &[FieldKey] = if all_fields {
        &FieldKey::ALL
    } else {
        &SUBMITTED_FIELDS
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "className": class,
                "students": visible,
                "entry": entry,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table => {
            print!("{}", render::session_table(class, &entry, &visible, fields));
            if !entry.is_persisted() && !data.dates.is_empty() {
                let known: Vec<&str> = data.dates.iter().map(|d| d.date.as_str()).collect();
                println!("Known sessions: {}", known.join(", "));
            }
        }
    }
    Ok(())
}

/// Check edits against the roster and the catalog, then stage them.
fn stage_edits(
    config: &DeskConfig,
    data: &ClassData,
    date: &str,
    visible: &[StudentInfo],
    edits: &[FieldEdit],
) -> Result<EditBuffer> {
    let entry = data.entry_or_new(date);
    let mut buffer = EditBuffer::new();

    for edit in edits {
        if !visible.iter().any(|s| s.name == edit.student) {
            return Err(DeskError::UnknownStudent(edit.student.clone()).into());
        }
        if !SUBMITTED_FIELDS.contains(&edit.field) {
            bail!("{} is read-only in session saves", edit.field.label());
        }
        buffer.set(date, &edit.student, edit.field, edit.value.clone());
    }

    // Lessons depend on the specialization, which may itself be edited.
    for edit in edits {
        let specialization = buffer.value_of(&entry, &edit.student, FieldKey::Specialization);
        config
            .catalog
            .check(edit.field, &edit.value, &specialization)
            .with_context(|| format!("Rejected edit for {}", edit.student))?;
    }

    Ok(buffer)
}

async fn run_save(
    config: &DeskConfig,
    class: &str,
    date: Option<String>,
    edits: &[FieldEdit],
    viewer: &Viewer,
    dry_run: bool,
) -> Result<()> {
    let client = client(config)?;
    let Some(data) = load_class(&client, class).await else {
        bail!("Failed to load class data for '{class}'");
    };

    let date = date.unwrap_or_else(|| new_session_date(chrono::Local::now().date_naive()));
    let visible = visible_students(&data.students, viewer);
    if visible.is_empty() {
        bail!("No students assigned to you in this class");
    }

    let buffer = stage_edits(config, &data, &date, &visible, edits)?;
    let payload = SessionAssembler::assemble_for(class, &date, &visible, &data, &buffer);

    if dry_run {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let outcome = submit_session(&client, &payload).await;
    if outcome.saved {
        println!("{} {class} {date}", "Session saved successfully:".green().bold());
        Ok(())
    } else {
        bail!(
            "Failed to save session: {}",
            outcome.message.as_deref().unwrap_or("Unknown error")
        )
    }
}

async fn run_parse(file: &Path, sheet: Option<&str>, format: OutputFormat) -> Result<()> {
    let source = FileSource::new(file);
    let tab = match sheet {
        Some(name) => name.to_string(),
        None => source
            .workbook_tabs()?
            .and_then(|tabs| tabs.into_iter().next())
            .unwrap_or_default(),
    };

    let grid = source
        .fetch_grid(&tab)
        .await
        .with_context(|| format!("Failed to read grid: {}", file.display()))?;
    let data = parse_class_data(&grid);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&data)?),
        OutputFormat::Table => print!("{}", render::class_summary(grid.name(), &data)),
    }
    Ok(())
}
