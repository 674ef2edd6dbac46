use std::fmt::Write as FmtWrite;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use tracing::Level;

use formdeck::{
    FormDeck, KeymapStore, Theme, UiOptions,
    io::{DocumentFormat, OutputDestination, OutputOptions, output::serialize_value},
    submit::{FanoutSink, LogSink, OutputSink},
};

#[derive(Debug, Parser)]
#[command(
    name = "formdeck",
    version,
    about = "Build, fill and submit a form in the terminal"
)]
struct Cli {
    /// Banner text shown above the form
    #[arg(long = "welcome", value_name = "TEXT")]
    welcome: Option<String>,

    /// Initial theme (light or dark)
    #[arg(long = "theme", value_name = "THEME")]
    theme: Option<Theme>,

    /// Title shown at the top of the UI
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Where submissions are written ("-" writes the last one to stdout on exit)
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<String>,

    /// Output format; inferred from output file extensions when omitted
    #[arg(long = "format", value_name = "FORMAT")]
    format: Option<DocumentFormat>,

    /// Emit compact JSON/TOML rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Overwrite output files even if they already exist
    #[arg(short = 'f', long = "force", short_alias = 'y', alias = "yes")]
    force: bool,

    /// Simulated submission latency in milliseconds
    #[arg(long = "submit-delay-ms", value_name = "MS", default_value_t = 400)]
    submit_delay_ms: u64,

    /// Key bindings file replacing the built-in keymap
    #[arg(long = "keymap", value_name = "PATH")]
    keymap: Option<PathBuf>,

    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    init_tracing(cli.log_file.as_deref(), cli.verbose)?;

    let mut diagnostics = DiagnosticCollector::default();
    let output = build_output_options(&cli, &mut diagnostics);
    ensure_output_paths_available(&output.destinations, cli.force, &mut diagnostics);
    diagnostics.into_result()?;

    let mut options =
        UiOptions::default().with_submit_delay(Duration::from_millis(cli.submit_delay_ms));
    if let Some(path) = cli.keymap.as_ref() {
        let keymap = KeymapStore::from_path(path).map_err(Report::msg)?;
        options = options.with_keymap(keymap);
    }

    let mut sink = FanoutSink::new().with(LogSink);
    let files = output.files_only();
    if !files.destinations.is_empty() {
        sink = sink.with(OutputSink::new(files));
    }

    let mut deck = FormDeck::new().with_options(options).with_sink(sink);
    if let Some(title) = cli.title.as_ref() {
        deck = deck.with_title(title.clone());
    }
    if let Some(welcome) = cli.welcome.as_ref() {
        deck = deck.with_welcome_text(welcome.clone());
    }
    if let Some(theme) = cli.theme {
        deck = deck.with_theme(theme);
    }

    let summary = deck.run().map_err(Report::msg)?;

    let Some(last) = summary.last_submission() else {
        eprintln!("no submission was made");
        return Ok(());
    };
    if output.writes_stdout() || output.destinations.is_empty() {
        let rendered = serialize_value(last, &output).map_err(Report::msg)?;
        println!("{rendered}");
    }
    Ok(())
}

fn init_tracing(log_file: Option<&Path>, verbose: u8) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn build_output_options(cli: &Cli, diagnostics: &mut DiagnosticCollector) -> OutputOptions {
    let mut destinations = Vec::new();
    for raw in &cli.outputs {
        if raw.trim().is_empty() {
            diagnostics.push_output("output destination cannot be empty");
            continue;
        }
        if raw == "-" {
            destinations.push(OutputDestination::Stdout);
        } else {
            destinations.push(OutputDestination::file(raw));
        }
    }

    let format = match cli.format {
        Some(format) => format,
        None => infer_format_from_files(&destinations, diagnostics).unwrap_or_default(),
    };

    OutputOptions::new(format)
        .with_pretty(!cli.no_pretty)
        .with_destinations(destinations)
}

fn infer_format_from_files(
    destinations: &[OutputDestination],
    diagnostics: &mut DiagnosticCollector,
) -> Option<DocumentFormat> {
    let mut detected: Option<DocumentFormat> = None;
    for destination in destinations {
        let OutputDestination::File(path) = destination else {
            continue;
        };
        match DocumentFormat::from_path(path) {
            Some(format) => match detected {
                Some(existing) if existing != format => diagnostics.push_output(format!(
                    "output file {} uses {format} but other destinations use {existing}; align extensions",
                    path.display()
                )),
                Some(_) => {}
                None => detected = Some(format),
            },
            None => diagnostics.push_output(format!(
                "cannot infer format from output file {}; use --format or a known extension",
                path.display()
            )),
        }
    }
    detected
}

fn ensure_output_paths_available(
    destinations: &[OutputDestination],
    force: bool,
    diagnostics: &mut DiagnosticCollector,
) {
    if force {
        return;
    }
    for destination in destinations {
        if let OutputDestination::File(path) = destination
            && path.exists()
        {
            diagnostics.push_output(format!(
                "file {} already exists (pass --force to overwrite)",
                path.display()
            ));
        }
    }
}

#[derive(Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push_output(&mut self, message: impl Into<String>) {
        self.messages.push(format!("output: {}", message.into()));
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered output issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}
