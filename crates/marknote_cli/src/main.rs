//! Command-line shell over `marknote_core`.
//!
//! # Responsibility
//! - Map subcommands onto repository and editor-session operations.
//! - Report every core error on stderr with a non-zero exit code.

use clap::{Parser, Subcommand};
use log::warn;
use marknote_core::{
    derive_markdown_preview, init_logging, AboutInfo, AppConfig, ConfigOverrides, EditorSession,
    LocalNoteStore, NoteRepository, SqliteBackend,
};
use std::error::Error;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

type Repo = NoteRepository<LocalNoteStore<SqliteBackend>>;

#[derive(Parser)]
#[command(name = "marknote")]
#[command(about = "Local markdown notes", version)]
struct Cli {
    /// Directory holding the note store and logs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Theme shown on the about screen (light|dark)
    #[arg(long, global = true)]
    theme: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List notes with a short preview
    List,
    /// Append a new empty note
    Add,
    /// Save a note; updates the note at --index or creates a new one
    Save {
        #[arg(short, long, default_value = "")]
        title: String,

        #[arg(short, long, default_value = "")]
        content: String,

        /// Read content from stdin instead of --content
        #[arg(long, conflicts_with = "content")]
        stdin: bool,

        /// Position of the note to update
        #[arg(short, long)]
        index: Option<usize>,
    },
    /// Delete the note at a position
    Delete { index: usize },
    /// Print a note's markdown source
    Show { index: usize },
    /// Show version, dependencies and theme
    About {
        /// Show the opposite of the configured theme
        #[arg(long)]
        toggle_theme: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = AppConfig::resolve(&ConfigOverrides {
        data_dir: cli.data_dir,
        log_level: cli.log_level,
        theme: cli.theme,
    })?;

    std::fs::create_dir_all(&config.data_dir)?;
    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    match cli.command {
        Commands::About { toggle_theme } => print_about(&config, toggle_theme),
        Commands::List => print_list(&open_repo(&config)?),
        Commands::Add => {
            let mut repo = open_repo(&config)?;
            let note = repo.add_note()?;
            println!("{}\t{}", repo.len() - 1, note.title);
        }
        Commands::Save {
            title,
            content,
            stdin,
            index,
        } => {
            let content = if stdin {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            } else {
                content
            };
            save(&mut open_repo(&config)?, title, content, index)?;
        }
        Commands::Delete { index } => {
            let removed = open_repo(&config)?.delete_note(index)?;
            println!("deleted\t{}", removed.title);
        }
        Commands::Show { index } => {
            let mut repo = open_repo(&config)?;
            let mut session = EditorSession::new();
            session.open(&mut repo, index)?;
            println!("# {}\n", session.preview_heading());
            println!("{}", session.content());
        }
    }

    Ok(())
}

fn open_repo(config: &AppConfig) -> Result<Repo, Box<dyn Error>> {
    let backend = SqliteBackend::open(config.store_path())?;
    Ok(NoteRepository::open(LocalNoteStore::new(backend)))
}

fn save(
    repo: &mut Repo,
    title: String,
    content: String,
    index: Option<usize>,
) -> Result<(), Box<dyn Error>> {
    let mut session = EditorSession::new();
    if let Some(index) = index {
        session.open(repo, index)?;
    }
    session.set_title(title);
    session.set_content(content);

    let result = session.save(repo);
    if let Some(notice) = session.notice() {
        println!("{:?}: {}", notice.severity, notice.message);
    }
    if let Err(err) = result {
        warn!("event=cli_save module=cli status=error error={err}");
        return Err(err.into());
    }
    Ok(())
}

fn print_list(repo: &Repo) {
    if repo.is_empty() {
        println!("(no notes)");
        return;
    }
    for (index, note) in repo.notes().iter().enumerate() {
        let preview = derive_markdown_preview(&note.content);
        println!(
            "{index}\t{}\t{}",
            note.title,
            preview.preview_text.unwrap_or_default()
        );
    }
}

fn print_about(config: &AppConfig, toggle_theme: bool) {
    let about = AboutInfo::current();
    let theme = if toggle_theme {
        config.theme.toggle()
    } else {
        config.theme
    };
    println!("Version: {}", about.version);
    println!("Theme: {theme}");
    println!("Data: {}", config.data_dir.display());
    println!("Dependencies:");
    for (name, version) in about.dependencies {
        println!("  {name} {version}");
    }
}
