use clap::{Parser, Subcommand, ValueEnum};
use daybook::add::{self, EntrySource};
use daybook::assemble::{self, AssembleOptions};
use daybook::config::{self, JournalConfig};
use daybook::notify::{CommandNotifier, Notifier};
use daybook::types::Kind;
use daybook::{output, stem, store};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once; only called at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "A journal kept as a directory of small files")]
#[command(long_about = "\
A journal kept as a directory of small files

Each entry is one file named after the moment it was written. The extension
says what the entry is; `daybook build` stitches them together, in order,
into index.html.

Entry kinds:

  entry-20240301-091500UTC-50.h1     heading
  entry-20240301-091500UTC-51.item   list item
  entry-20240301-091502UTC-50.link   link (HREF=... and TEXT=... lines)
  entry-20240301-093000UTC-50.png    image (.png or .jpg)
  entry-20240301-100000UTC-50.code   raw HTML, inserted verbatim

Adjacent items and links are grouped into one list. Files with any other
name are left alone.

The journal directory comes from `journal_dir` in the config file, or the
current directory with --here. Run 'daybook gen-config' for a documented
config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the current directory as the journal instead of `journal_dir`.
    /// `build` still reads the config file for `title` and `notify`, so it
    /// must be valid
    #[arg(long, global = true)]
    here: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a fresh filename stem for a new entry
    Stem,
    /// Create a new entry
    Add {
        /// Kind of entry to create
        kind: EntryKind,
        /// Entry text (read from stdin when omitted)
        #[arg(long, conflicts_with = "from")]
        text: Option<String>,
        /// Copy the entry from a file (required for images)
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Assemble all entries into index.html
    Build {
        /// Send a desktop notification when done
        #[arg(long)]
        notify: bool,
    },
    /// List the entries that would go into the document
    Check {
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum EntryKind {
    Heading,
    Item,
    Link,
    Image,
    Html,
}

impl From<EntryKind> for Kind {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Heading => Kind::Heading,
            EntryKind::Item => Kind::Item,
            EntryKind::Link => Kind::Link,
            EntryKind::Image => Kind::Image,
            EntryKind::Html => Kind::RawHtml,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Command::Stem => {
            let dir = resolve_journal_dir(&cli)?;
            println!("{}", stem::allocate_stem(&dir)?);
        }
        Command::Add { kind, text, from } => {
            let dir = resolve_journal_dir(&cli)?;
            let source = match (text, from) {
                (_, Some(path)) => EntrySource::File(path.clone()),
                (Some(text), None) => EntrySource::Text(text.clone()),
                (None, None) => EntrySource::Stdin,
            };
            let path = add::add_entry(&dir, (*kind).into(), &source)?;
            println!("{}", path.display());
        }
        Command::Build { notify } => {
            let (config, config_path) = load_config(&cli)?;
            let dir = journal_dir_for(&cli, &config, &config_path)?;
            let options = AssembleOptions {
                title: config.title.clone(),
            };
            let assembly = assemble::assemble(&dir, &options)?;
            let message = output::build_message(&assembly);
            println!("{}", message);
            if *notify || config.notify {
                if let Err(e) = CommandNotifier::default().notify("daybook", &message) {
                    eprintln!("warning: notification failed: {e}");
                }
            }
        }
        Command::Check { json } => {
            let dir = resolve_journal_dir(&cli)?;
            let records = store::list_records(&dir)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                output::print_check_output(&records, &dir);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config file named by `--config`, or the default one.
fn load_config(cli: &Cli) -> Result<(JournalConfig, PathBuf), config::ConfigError> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => config::default_config_path()?,
    };
    let config = config::load_config(&path)?;
    Ok((config, path))
}

/// The journal directory: the current directory with `--here`, otherwise
/// `journal_dir` from the config file.
fn resolve_journal_dir(cli: &Cli) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if cli.here {
        return Ok(std::env::current_dir()?);
    }
    let (config, config_path) = load_config(cli)?;
    journal_dir_for(cli, &config, &config_path)
}

fn journal_dir_for(
    cli: &Cli,
    config: &JournalConfig,
    config_path: &Path,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if cli.here {
        Ok(std::env::current_dir()?)
    } else {
        Ok(config::journal_dir(config, config_path)?)
    }
}
