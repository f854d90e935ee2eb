use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use scp_reader_core::{
    Archive, CrawlConfig, Entry, EntryNumber, Reader, ReaderConfig, ScpError, download_all, fetch_file,
};
use tracing_subscriber::EnvFilter;

mod echo;
mod speech;

use speech::NarratorConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Columns of a quotation frame lost to borders and padding
const FRAME_ALLOWANCE: usize = 6;

/// Output format for freshly read entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Read, save and narrate SCP Foundation entries from the terminal
#[derive(Parser, Debug)]
#[command(name = "scp")]
#[command(version)]
#[command(about = "CLI browser for SCP Wiki entries", long_about = None)]
struct Args {
    /// The SCP number to read (1-7999)
    #[arg(value_name = "NUMBER")]
    number: Option<u32>,

    /// Open the folder where downloaded entries are kept
    #[arg(short, long)]
    destination: bool,

    /// Narrate the entry without showing its text
    #[arg(short, long, conflicts_with = "audio_text")]
    audio: bool,

    /// Narrate the entry and show its text
    #[arg(short = 'A', long)]
    audio_text: bool,

    /// Don't save the retrieved entry as a .txt file
    #[arg(short = 't', long)]
    no_save: bool,

    /// Read a random entry
    #[arg(short, long)]
    random: bool,

    /// Download every entry into the archive folder
    #[arg(short, long)]
    get_all: bool,

    /// Fetch the entry again even if a saved copy exists
    #[arg(short, long)]
    overwrite: bool,

    /// Don't print the entry's source URL
    #[arg(short = 'u', long)]
    hide_url: bool,

    /// Read a saved entry page instead of fetching it
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Folder for downloaded entries (default: ~/Documents/SCP)
    #[arg(long, env = "SCP_READER_DIR", value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Text width in columns
    #[arg(long, default_value = "90", value_name = "COLS")]
    width: usize,

    /// Print against the left edge instead of centering
    #[arg(long)]
    no_center: bool,

    /// Narration speed in words per minute
    #[arg(long, default_value = "175", value_name = "WPM")]
    rate: u32,

    /// Narration voice
    #[arg(long, value_name = "NAME")]
    voice: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn reader_config(&self) -> ReaderConfig {
        let mut builder = ReaderConfig::builder()
            .line_width(self.width)
            .centered(!self.no_center)
            .quote_width(self.width.saturating_sub(FRAME_ALLOWANCE))
            .timeout(self.timeout);
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        builder.build()
    }

    fn narrates(&self) -> bool {
        self.audio || self.audio_text
    }

    fn narrator_config(&self) -> NarratorConfig {
        NarratorConfig { rate: self.rate, voice: self.voice.clone() }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn terminal_width() -> Option<usize> {
    crossterm::terminal::size().ok().map(|(cols, _)| usize::from(cols))
}

fn open_folder(dir: &Path) -> anyhow::Result<()> {
    let program = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(unix) {
        "xdg-open"
    } else {
        bail!("Opening folders is not supported on this platform");
    };

    let status = std::process::Command::new(program)
        .arg(dir)
        .status()
        .with_context(|| format!("Failed to open {}", dir.display()))?;
    check_opened(program, status.success(), dir)
}

fn check_opened(program: &str, success: bool, dir: &Path) -> anyhow::Result<()> {
    // explorer.exe reports failure even after opening the folder
    if !success && program != "explorer" {
        bail!("{} could not open {}", program, dir.display());
    }
    Ok(())
}

/// Prints text and links the way every run mode shares
struct Screen<'a> {
    reader: &'a Reader,
    terminal_width: Option<usize>,
}

impl Screen<'_> {
    fn line(&self, text: &str) -> String {
        self.reader.config().text.display(text, self.terminal_width)
    }

    fn separator(&self) {
        println!("{}", self.reader.separator(self.terminal_width));
    }

    fn entry_text(&self, text: &str) {
        print!("{}", self.reader.display(text, self.terminal_width));
    }

    fn source(&self, url: &str, narrating: bool) {
        let line = format!("Entry source: {}", url);
        if narrating {
            println!("\n{}\n", line);
        } else {
            println!("{}\n", self.line(&line));
        }
    }

    fn saved(&self, path: &Path, dir: &Path) {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        println!("{}", self.line(&format!("+ Saved {} to {}", name, dir.display())));
    }
}

async fn crawl(args: &Args, reader: &Reader, archive: &Archive, screen: &Screen<'_>) -> anyhow::Result<()> {
    if args.verbose {
        echo::print_info(&format!("Downloading every entry to {}", archive.dir().display()));
    }

    screen.separator();
    let count = download_all(reader, archive, &CrawlConfig::default(), |_, path| {
        screen.saved(path, archive.dir());
    })
    .await
    .context("Download stopped")?;
    screen.separator();

    println!(
        "\n{}\n",
        screen.line(&format!(
            "Downloaded all SCP entries: {} files saved to {}",
            count,
            archive.dir().display()
        ))
    );
    Ok(())
}

fn resolve_number(args: &Args) -> anyhow::Result<Option<EntryNumber>> {
    if args.random && args.number.is_some() {
        bail!("Pass -r/--random or an SCP number, not both");
    }
    if args.random {
        return Ok(Some(EntryNumber::random()));
    }
    match args.number {
        Some(n) => Ok(Some(EntryNumber::new(n)?)),
        None if args.file.is_some() => Ok(None),
        None => bail!("No entry given: pass an SCP number, -r/--random, -g/--get-all or --file"),
    }
}

async fn read_entry(args: &Args, reader: &Reader, number: Option<EntryNumber>) -> anyhow::Result<Entry> {
    if let Some(path) = &args.file {
        if args.verbose {
            echo::print_step(1, 3, &format!("Reading from file {}", path.display().bright_white()));
        }
        let html = fetch_file(&path.to_string_lossy()).context("Failed to read entry page")?;
        if args.verbose {
            eprintln!("  {} {}\n", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
        }
        return reader.parse(&html).with_context(|| format!("Failed to read {}", path.display()));
    }

    let number = number.context("No entry number given")?;
    let url = reader.url_for(number);
    if args.verbose {
        echo::print_step(1, 3, &format!("Fetching from {}", url.bright_white().underline()));
    }
    reader.fetch(number).await.with_context(|| format!("Failed to read {}", url))
}

/// One part of presenting an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Show,
    Source,
    Save,
    Narrate,
}

/// Steps for an entry, in order. Saving comes before narration so the
/// archive is written even when narration is cancelled.
fn plan(args: &Args, saved_copy: bool) -> Vec<Step> {
    let mut steps = Vec::new();
    if !args.audio {
        steps.push(Step::Show);
    }
    if !args.hide_url {
        steps.push(Step::Source);
    }
    if !saved_copy && !args.no_save {
        steps.push(Step::Save);
    }
    if args.narrates() {
        steps.push(Step::Narrate);
    }
    steps
}

fn show(args: &Args, screen: &Screen<'_>, entry: &Entry) -> anyhow::Result<()> {
    match args.format {
        OutputFormat::Text => screen.entry_text(entry.text()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&entry.to_json()?).context("Failed to encode entry")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn save(args: &Args, screen: &Screen<'_>, archive: &Archive, entry: &Entry) -> anyhow::Result<()> {
    let path = match (archive.save(entry.text()), entry.number) {
        (Ok(path), _) => path,
        (Err(ScpError::NoEntryNumber), Some(number)) => archive.save_as(number, entry.text())?,
        (Err(e), _) => return Err(e).context("Failed to save entry"),
    };
    screen.separator();
    screen.saved(&path, archive.dir());
    screen.separator();
    println!();
    if args.verbose {
        echo::print_success(&format!("Saved {}", path.display().bright_white()));
    }
    Ok(())
}

async fn perform(
    args: &Args,
    screen: &Screen<'_>,
    archive: &Archive,
    entry: &Entry,
    url: Option<&str>,
    steps: &[Step],
) -> anyhow::Result<()> {
    for step in steps {
        match step {
            Step::Show => show(args, screen, entry)?,
            Step::Source => {
                if let Some(url) = url {
                    screen.source(url, args.audio);
                }
            }
            Step::Save => save(args, screen, archive, entry)?,
            Step::Narrate => {
                if let Err(e) = speech::narrate(entry.text(), &args.narrator_config()).await {
                    echo::print_error(&format!("Narration failed: {:#}", e));
                }
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let archive = Archive::new(args.dir.clone().unwrap_or_else(Archive::default_dir));
    let reader = Reader::with_config(args.reader_config());
    let screen = Screen { reader: &reader, terminal_width: terminal_width() };

    if args.destination {
        archive.ensure_dir().context("Failed to create the archive folder")?;
        return open_folder(archive.dir());
    }

    if args.get_all {
        return crawl(&args, &reader, &archive, &screen).await;
    }

    let number = resolve_number(&args)?;

    if args.file.is_none()
        && !args.overwrite
        && let Some(number) = number
        && archive.contains(number)?
    {
        if args.verbose {
            echo::print_info(&format!("Showing saved copy of {}", number));
        }
        let text = archive.load(number)?;
        let entry = Entry::from_text(text, Some(number));
        let url = reader.url_for(number);
        return perform(&args, &screen, &archive, &entry, Some(&url), &plan(&args, true)).await;
    }

    let mut entry = read_entry(&args, &reader, number).await?;
    if entry.number.is_none() {
        entry.number = number;
    }

    if args.verbose {
        echo::print_step(2, 3, "Extracted entry");
        echo::print_entry_details(&entry);
        echo::print_step(3, 3, "Writing output");
    }

    let url = entry.source_url.clone().or_else(|| number.map(|n| reader.url_for(n)));
    perform(&args, &screen, &archive, &entry, url.as_deref(), &plan(&args, false)).await
}
