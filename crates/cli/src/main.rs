// VerseQuote CLI - search the BibleGet service and insert formatted quotes
// into a document, the way the add-in task pane does.

mod exit_codes;

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use versequote_bibleget::{BibleGetClient, PreferOrigin};
use versequote_cli::{
    KeywordOutcome, PaneError, ReaderDialogHost, SearchOutcome, SkipReason, TaskPane,
};
use versequote_config::{
    host_language, FileStore, MessageKey, Preferences, StyleSettings, SUPPORTED_LANGUAGES,
};
use versequote_core::Reference;
use versequote_engine::{Document, DocumentError};
use versequote_protocol::DEFAULT_DIALOG_BASE;

use exit_codes::{
    pane_exit_code, EXIT_DOCUMENT, EXIT_ERROR, EXIT_INVALID_REFERENCE, EXIT_LOOKUP, EXIT_STORE,
    EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "vquote")]
#[command(about = "Search Bible quotes and insert them, formatted, into a document")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// BibleGet service root (serves /v3/index.php and /v3/metadata.php)
    #[arg(long, global = true, env = "VERSEQUOTE_API_BASE")]
    api_base: Option<String>,

    /// Where dialog pages are served from
    #[arg(long, global = true, env = "VERSEQUOTE_DIALOG_BASE", default_value = DEFAULT_DIALOG_BASE)]
    dialog_base: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a reference and insert the verses
    #[command(after_help = "\
Examples:
  vquote search 'Jn 3:16-18'
  vquote search 'Gn1,1-5' --version NVBSE --origin hebrew
  vquote search '1Co 13' --document notes.vqdoc")]
    Search {
        /// Reference, e.g. 'Jn 3:16-18' or 'Gv3,16'
        reference: String,

        /// Version key for this search (default: the selected version)
        #[arg(long)]
        version: Option<String>,

        /// Versification tradition to prefer
        #[arg(long, value_enum)]
        origin: Option<Origin>,

        /// Document to insert into (created if missing)
        #[arg(long)]
        document: Option<PathBuf>,

        /// Print the inserted quotes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open the keyword search dialog; dialog messages are read from stdin (JSONL)
    #[command(after_help = "\
Examples:
  echo '{\"action\":\"close\"}' | vquote keyword love
  vquote keyword 'pan de vida' --exact --document notes.vqdoc < dialog.jsonl")]
    Keyword {
        /// Words to search for
        words: String,

        /// Match the words exactly
        #[arg(long)]
        exact: bool,

        /// Version key for this search (default: the selected version)
        #[arg(long)]
        version: Option<String>,

        /// Document to insert into (created if missing)
        #[arg(long)]
        document: Option<PathBuf>,
    },

    /// Open a dialog page and print its URL
    Open {
        page: Page,
    },

    /// Check a reference without looking it up
    Validate {
        reference: String,
    },

    /// List the available Bible versions
    Versions {
        /// Fetch the list again instead of using the cached copy
        #[arg(long)]
        refresh: bool,

        #[arg(long)]
        json: bool,
    },

    /// Select the version used by later searches
    SelectVersion {
        key: String,
    },

    /// Style settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Show or set the UI language
    Lang {
        /// Language to use (en, es)
        lang: Option<String>,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Print the effective style settings as JSON
    Show,
    /// Print the preference file path
    Path,
    /// Drop the stored settings and go back to the defaults
    Reset,
    /// Replace the style settings with a JSON file
    Import {
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Origin {
    Greek,
    Hebrew,
}

impl From<Origin> for PreferOrigin {
    fn from(origin: Origin) -> Self {
        match origin {
            Origin::Greek => PreferOrigin::Greek,
            Origin::Hebrew => PreferOrigin::Hebrew,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Page {
    Settings,
    Help,
    About,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nservice: BibleGet v3",
    )
}

type Pane = TaskPane<FileStore, BibleGetClient>;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let ctx = Context { api_base: cli.api_base, dialog_base: cli.dialog_base };

    let result = match cli.command {
        Commands::Search { reference, version, origin, document, json } => {
            cmd_search(&ctx, &reference, version, origin, document, json)
        }
        Commands::Keyword { words, exact, version, document } => {
            cmd_keyword(&ctx, &words, exact, version, document)
        }
        Commands::Open { page } => cmd_open(&ctx, page),
        Commands::Validate { reference } => cmd_validate(&ctx, &reference),
        Commands::Versions { refresh, json } => cmd_versions(&ctx, refresh, json),
        Commands::SelectVersion { key } => cmd_select_version(&ctx, &key),
        Commands::Settings(cmd) => match cmd {
            SettingsCommands::Show => cmd_settings_show(),
            SettingsCommands::Path => cmd_settings_path(),
            SettingsCommands::Reset => cmd_settings_reset(),
            SettingsCommands::Import { file } => cmd_settings_import(&file),
        },
        Commands::Lang { lang } => cmd_lang(lang),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn document(err: DocumentError) -> Self {
        Self::new(EXIT_DOCUMENT, err.to_string())
    }

    pub fn pane(err: PaneError) -> Self {
        let hint = match &err {
            PaneError::Lookup(e) => Some(e.user_message().to_string()),
            PaneError::UnknownVersion(_) => Some("run `vquote versions` to list version keys".to_string()),
            _ => None,
        };
        Self { code: pane_exit_code(&err), message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Replace the message with a user-facing one; the old message becomes
    /// the hint unless one is already set.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        let detail = std::mem::replace(&mut self.message, message.into());
        if self.hint.is_none() {
            self.hint = Some(detail);
        }
        self
    }
}

impl From<PaneError> for CliError {
    fn from(err: PaneError) -> Self {
        CliError::pane(err)
    }
}

impl From<versequote_config::StoreError> for CliError {
    fn from(err: versequote_config::StoreError) -> Self {
        CliError::new(EXIT_STORE, err.to_string())
    }
}

// ============================================================================
// Task pane wiring
// ============================================================================

struct Context {
    api_base: Option<String>,
    dialog_base: String,
}

impl Context {
    fn client(&self) -> Result<BibleGetClient, CliError> {
        let client = match &self.api_base {
            Some(base) => BibleGetClient::with_base_url(base),
            None => BibleGetClient::new(),
        };
        client.map_err(|e| CliError::new(EXIT_ERROR, e.to_string()))
    }

    /// Pane with language and versions ready, as after the add-in loads.
    fn pane(&self) -> Result<Pane, CliError> {
        let mut pane = self.bare_pane()?;
        pane.startup(host_language().as_deref())?;
        report_notices(&pane);
        Ok(pane)
    }

    /// Pane with only the language resolved; no network access and no writes.
    fn bare_pane(&self) -> Result<Pane, CliError> {
        let prefs = Preferences::new(FileStore::open_default());
        let mut pane = TaskPane::new(prefs, self.client()?).with_dialog_base(self.dialog_base.clone());
        pane.use_language(host_language().as_deref());
        Ok(pane)
    }
}

fn report_notices(pane: &Pane) {
    for notice in pane.notices() {
        eprintln!("notice: {}", notice);
    }
}

fn open_document(path: Option<&Path>) -> Result<Document, CliError> {
    let mut doc = match path {
        Some(path) => Document::load_or_new(path).map_err(CliError::document)?,
        None => Document::new(),
    };
    doc.move_to_new_paragraph();
    Ok(doc)
}

fn finish_document(doc: &Document, path: Option<&Path>) -> Result<(), CliError> {
    match path {
        Some(path) => {
            doc.save(path).map_err(CliError::document)?;
            eprintln!("saved {} (revision {})", path.display(), doc.revision());
        }
        None => println!("{}", doc.to_plain_text()),
    }
    Ok(())
}

// ============================================================================
// search / keyword
// ============================================================================

fn cmd_search(
    ctx: &Context,
    reference: &str,
    version: Option<String>,
    origin: Option<Origin>,
    document: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let mut pane = ctx.pane()?;
    let mut doc = open_document(document.as_deref())?;

    let outcome = pane.search_by_reference(&mut doc, reference, version.as_deref(), origin.map(Into::into));
    match outcome {
        SearchOutcome::Inserted { quotes, commit } => {
            log::info!("Inserted {} verse(s) in revision {}", quotes.len(), commit.revision);
            if json {
                let out = serde_json::json!({
                    "reference": reference.trim(),
                    "version": version.or_else(|| pane.selected_version()),
                    "revision": commit.revision,
                    "quotes": quotes,
                });
                if let Some(path) = &document {
                    doc.save(path).map_err(CliError::document)?;
                }
                println!("{}", out);
                Ok(())
            } else {
                finish_document(&doc, document.as_deref())
            }
        }
        SearchOutcome::Skipped(SkipReason::EmptyInput) => Err(CliError::usage("reference is empty")),
        SearchOutcome::Skipped(SkipReason::InvalidReference) => Err(CliError::new(
            EXIT_INVALID_REFERENCE,
            pane.error_message(MessageKey::ErrorBadQuote),
        )),
        SearchOutcome::Skipped(SkipReason::NoVersion) => Err(CliError::usage("no Bible version selected")
            .with_hint("pass --version KEY or run `vquote select-version KEY`")),
        SearchOutcome::Failed(e) => Err(CliError::new(
            EXIT_LOOKUP,
            pane.error_message(MessageKey::ErrorSearchByQuote),
        )
        .with_hint(format!("{} ({})", e.user_message(), e))),
    }
}

fn cmd_keyword(
    ctx: &Context,
    words: &str,
    exact: bool,
    version: Option<String>,
    document: Option<PathBuf>,
) -> Result<(), CliError> {
    let mut pane = ctx.bare_pane()?;
    let mut doc = open_document(document.as_deref())?;
    let mut host = ReaderDialogHost::new(io::BufReader::new(io::stdin()));

    let outcome = pane
        .keyword_search(&mut doc, &mut host, words, exact, version.as_deref())
        .map_err(|e| {
            let message = pane.error_message(MessageKey::ErrorSearchByKeyword);
            CliError::pane(e).with_message(message)
        })?;

    match outcome {
        KeywordOutcome::Skipped => Err(CliError::usage("keyword is empty")),
        KeywordOutcome::Closed { inserted } => {
            if let Some(request) = host.opened().first() {
                eprintln!("dialog: {}", request.url);
            }
            log::info!("Keyword dialog closed after {} insertion(s)", inserted);
            finish_document(&doc, document.as_deref())
        }
    }
}

// ============================================================================
// open / validate
// ============================================================================

fn cmd_open(ctx: &Context, page: Page) -> Result<(), CliError> {
    let mut pane = ctx.bare_pane()?;
    let mut host = ReaderDialogHost::detached();

    let request = match page {
        Page::Settings => pane.show_settings(&mut host)?,
        Page::Help => pane.show_help(&mut host)?,
        Page::About => pane.show_about(&mut host)?,
    };
    println!("{}", request.url);
    Ok(())
}

fn cmd_validate(ctx: &Context, reference: &str) -> Result<(), CliError> {
    let pane = ctx.bare_pane()?;
    match Reference::parse(reference) {
        Ok(parsed) => {
            println!("{}", parsed);
            Ok(())
        }
        Err(e) => Err(CliError::new(
            EXIT_INVALID_REFERENCE,
            pane.error_message(MessageKey::ErrorBadQuote),
        )
        .with_hint(e.to_string())),
    }
}

// ============================================================================
// versions
// ============================================================================

fn cmd_versions(ctx: &Context, refresh: bool, json: bool) -> Result<(), CliError> {
    let mut pane = ctx.bare_pane()?;
    pane.load_versions(refresh).map_err(|e| {
        let message = pane.error_message(MessageKey::ErrorGetVersions);
        CliError::pane(e).with_message(message)
    })?;

    let selected = pane.selected_version();
    if json {
        let list: Vec<serde_json::Value> = pane
            .versions()
            .iter()
            .map(|v| {
                serde_json::json!({
                    "key": v.key,
                    "name": v.name,
                    "selected": selected.as_deref() == Some(v.key.as_str()),
                })
            })
            .collect();
        println!("{}", serde_json::Value::Array(list));
    } else {
        for v in pane.versions().iter() {
            let mark = if selected.as_deref() == Some(v.key.as_str()) { "*" } else { " " };
            println!("{} {:<10} {}", mark, v.key, v.name);
        }
    }
    Ok(())
}

fn cmd_select_version(ctx: &Context, key: &str) -> Result<(), CliError> {
    let mut pane = ctx.pane()?;
    pane.select_version(key)?;
    eprintln!("selected {}", key);
    Ok(())
}

// ============================================================================
// settings / lang
// ============================================================================

fn preferences() -> Preferences<FileStore> {
    Preferences::new(FileStore::open_default())
}

fn cmd_settings_show() -> Result<(), CliError> {
    let json = preferences()
        .style_settings()
        .to_json_pretty()
        .map_err(|e| CliError::new(EXIT_ERROR, e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn cmd_settings_path() -> Result<(), CliError> {
    println!("{}", FileStore::default_path().display());
    Ok(())
}

fn cmd_settings_reset() -> Result<(), CliError> {
    preferences().reset_style_settings()?;
    eprintln!("style settings reset to defaults");
    Ok(())
}

fn cmd_settings_import(file: &Path) -> Result<(), CliError> {
    let json = std::fs::read_to_string(file)
        .map_err(|e| CliError::usage(format!("{}: {}", file.display(), e)))?;
    let settings = StyleSettings::from_json(&json).map_err(|e| {
        CliError::usage(format!("{}: {}", file.display(), e))
            .with_hint("every section (version, bc, par, book, verse, text) is required")
    })?;
    preferences().save_style_settings(&settings)?;
    eprintln!("imported style settings from {}", file.display());
    Ok(())
}

fn cmd_lang(lang: Option<String>) -> Result<(), CliError> {
    let mut prefs = preferences();
    match lang {
        Some(lang) => {
            let lang = lang.to_lowercase();
            if !SUPPORTED_LANGUAGES.contains(&lang.as_str()) {
                return Err(CliError::usage(format!("unsupported language '{}'", lang))
                    .with_hint(format!("supported: {}", SUPPORTED_LANGUAGES.join(", "))));
            }
            prefs.set_language(&lang)?;
            println!("{}", lang);
        }
        None => {
            let lang = prefs.setup_language(host_language().as_deref())?;
            println!("{}", lang);
        }
    }
    Ok(())
}
