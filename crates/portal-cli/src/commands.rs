use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, ensure};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use portal_catalog::{
    CatalogEngine, CatalogSource, FilterPolicy, ReloadOutcome, SessionContext, SessionStore,
    TransportError,
};
use portal_cli::config::{PortalSettings, save_settings, session_path};
use portal_cli::logging::redact_value;
use portal_cli::render::{facet_lines, price_table, results_csv, results_json};
use portal_cli::shell::{HELP, ShellCommand};
use portal_cli::store::FileSessionStore;
use portal_sources::{LocalFileSource, PublishedSheetSource, ScriptAuthenticator, parse_endpoint};

use crate::cli::{
    BrowseArgs, ConfigArgs, FacetsArgs, LoginArgs, OutputFormatArg, PolicyArg, ShellArgs,
    SourceArgs,
};

/// Settings and locations shared by every command.
pub struct CommandContext {
    pub settings: PortalSettings,
    pub settings_path: Option<PathBuf>,
    pub session_path: PathBuf,
}

impl CommandContext {
    pub fn new(settings: PortalSettings, settings_path: Option<PathBuf>) -> Result<Self> {
        let session_path = session_path().context("could not determine the data directory")?;
        Ok(Self {
            settings,
            settings_path,
            session_path,
        })
    }

    fn engine(&self, policy: Option<PolicyArg>) -> CatalogEngine<FileSessionStore> {
        let policy = policy
            .map(FilterPolicy::from)
            .unwrap_or(self.settings.query.policy);
        CatalogEngine::new(FileSessionStore::open(&self.session_path)).with_policy(policy)
    }

    /// Picks the price list source; the network needs a signed-in session.
    fn feed(&self, source: &SourceArgs, session: &SessionContext) -> Result<CatalogFeed> {
        if let Some(path) = &source.input {
            return Ok(CatalogFeed::File(LocalFileSource::new(path)));
        }
        ensure!(
            session.logged_in,
            "not signed in; run `price-portal login` first or pass --input"
        );
        let url = parse_endpoint(&self.settings.endpoints.catalog_url)?;
        let sheet = PublishedSheetSource::new(url, &self.settings.network.http_options())?;
        Ok(CatalogFeed::Sheet(sheet))
    }
}

/// Either price list source, so commands can hold one concrete type.
enum CatalogFeed {
    File(LocalFileSource),
    Sheet(PublishedSheetSource),
}

impl CatalogSource for CatalogFeed {
    async fn fetch_catalog(&self) -> Result<String, TransportError> {
        match self {
            Self::File(source) => source.fetch_catalog().await,
            Self::Sheet(source) => source.fetch_catalog().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::File(source) => source.describe(),
            Self::Sheet(source) => source.describe(),
        }
    }
}

pub async fn run_login(ctx: &CommandContext, args: &LoginArgs) -> Result<()> {
    let mut engine = ctx.engine(None);
    let url = parse_endpoint(&ctx.settings.endpoints.auth_url)?;
    let authenticator = ScriptAuthenticator::new(url, &ctx.settings.network.http_options())?;

    info!(
        email = redact_value(&args.email.trim().to_lowercase()),
        "signing in"
    );
    let spinner = spinner("Signing in");
    let result = engine
        .login(&authenticator, &args.email, &args.password)
        .await;
    spinner.finish_and_clear();
    result?;

    let name = engine
        .session()
        .display_name()
        .unwrap_or_else(|| "there".to_string());
    println!("Welcome, {name}!");
    Ok(())
}

pub fn run_logout(ctx: &CommandContext) {
    let mut engine = ctx.engine(None);
    engine.logout();
    println!("Signed out.");
}

pub fn run_status(ctx: &CommandContext) {
    let engine = ctx.engine(None);
    let session = engine.session();
    match (&session.user_email, session.display_name()) {
        (Some(email), Some(name)) if session.logged_in => {
            println!("Signed in as {name} ({email})");
        }
        _ => println!("Not signed in"),
    }
    println!("Last sync: {}", session.last_synced_label());
    println!("Price sheet: {}", ctx.settings.endpoints.catalog_url);
    println!("Credential check: {}", ctx.settings.endpoints.auth_url);
    println!("Filter policy: {}", engine.policy());
    println!("Session file: {}", ctx.session_path.display());
}

pub async fn run_browse(ctx: &CommandContext, args: &BrowseArgs) -> Result<()> {
    let mut engine = ctx.engine(args.source.policy);
    let feed = ctx.feed(&args.source, engine.session())?;
    sync(&mut engine, &feed).await?;

    engine.select_category(args.category.as_str());
    engine.select_brand(args.brand.as_str());
    engine.set_search_text(args.search.as_str());

    let results = engine.results();
    match args.format {
        OutputFormatArg::Table => {
            println!("{}", price_table(&results));
            println!("{} of {} items", results.len(), engine.catalog().len());
        }
        OutputFormatArg::Json => println!("{}", results_json(&results)?),
        OutputFormatArg::Csv => print!("{}", results_csv(&results)),
    }
    Ok(())
}

pub async fn run_facets(ctx: &CommandContext, args: &FacetsArgs) -> Result<()> {
    let mut engine = ctx.engine(args.source.policy);
    let feed = ctx.feed(&args.source, engine.session())?;
    sync(&mut engine, &feed).await?;
    engine.select_category(args.category.as_str());
    print_facets(&engine);
    Ok(())
}

pub async fn run_shell(ctx: &CommandContext, args: &ShellArgs) -> Result<()> {
    let mut engine = ctx.engine(args.source.policy);
    let feed = ctx.feed(&args.source, engine.session())?;
    if let Err(error) = sync(&mut engine, &feed).await {
        eprintln!("error: {error:#}");
    }

    println!("{HELP}");
    print_view(&engine);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        io::stdout().flush().context("failed to write prompt")?;
        let Some(line) = lines.next_line().await.context("failed to read input")? else {
            break;
        };
        match ShellCommand::parse(&line) {
            ShellCommand::Search(text) => engine.set_search_text(text),
            ShellCommand::Category(category) => engine.select_category(category),
            ShellCommand::Brand(brand) => engine.select_brand(brand),
            ShellCommand::Clear => engine.reset_query(),
            ShellCommand::Refresh => {
                if let Err(error) = sync(&mut engine, &feed).await {
                    eprintln!("error: {error:#}");
                }
            }
            ShellCommand::Facets => {
                print_facets(&engine);
                continue;
            }
            ShellCommand::Help => {
                println!("{HELP}");
                continue;
            }
            ShellCommand::Quit => break,
            ShellCommand::Unknown(name) => {
                eprintln!("unknown command :{name} (try :help)");
                continue;
            }
        }
        print_view(&engine);
    }
    Ok(())
}

pub fn run_config(ctx: &CommandContext, args: &ConfigArgs) -> Result<()> {
    let rendered = toml::to_string_pretty(&ctx.settings).context("failed to serialize settings")?;
    print!("{rendered}");
    if args.write {
        let path = save_settings(&ctx.settings, ctx.settings_path.as_deref())?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}

/// Reloads behind a spinner; a failed reload becomes an error.
async fn sync<S: SessionStore>(
    engine: &mut CatalogEngine<S>,
    feed: &CatalogFeed,
) -> Result<ReloadOutcome> {
    let spinner = spinner(format!("Loading {}", feed.describe()));
    let outcome = engine.reload(feed).await;
    spinner.finish_and_clear();
    match outcome {
        ReloadOutcome::Failed(error) => {
            let hint = error.user_message().to_string();
            Err(anyhow!(error).context(hint))
        }
        other => Ok(other),
    }
}

fn print_view<S: SessionStore>(engine: &CatalogEngine<S>) {
    let query = engine.query();
    let results = engine.results();
    println!(
        "[{}] search: {:?}  category: {}  brand: {}",
        engine.status(),
        query.text(),
        query.category(),
        query.brand()
    );
    if results.is_empty() {
        println!("No items match.");
    } else {
        println!("{}", price_table(&results));
    }
    println!("{} of {} items", results.len(), engine.catalog().len());
}

fn print_facets<S: SessionStore>(engine: &CatalogEngine<S>) {
    let query = engine.query();
    let categories = facet_lines(
        "Categories",
        &engine.categories(),
        query.category().as_str(),
    );
    let brands = facet_lines("Brands", &engine.brands(), query.brand().as_str());
    print!("{categories}{brands}");
}

fn spinner(message: impl Into<String>) -> ProgressBar {
    if !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.into());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
