//! mswasth - Policy data-entry desk
//!
//! Command-line front end over [`mswasth_core::App`]: manage stored policies,
//! export them, pre-fill forms from scanned documents and run the extraction
//! proxy.

use std::io::Write as _;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use mswasth_catalog::THEMES;
use mswasth_core::{api_key_from_env, App, PortalConfig, PortalError, Severity};
use mswasth_export::{export_to_file, ExportFormat};
use mswasth_extract::{mime_for_path, proxy, Extractor, GeminiBackend, HttpExtractor, ProxyState, PROXY_PATH};
use mswasth_record::{Field, PartialRecord, PolicyRecord, RecordId};
use mswasth_view::{PageView, SortDirection, TABLE_COLUMNS};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Configuration file read when `--config` is not given and it exists
const DEFAULT_CONFIG_FILE: &str = "mswasth.toml";

/// mswasth - Policy data-entry desk
#[derive(Parser, Debug)]
#[command(name = "mswasth")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding stored policies and preferences
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show one page of the policy table
    List {
        /// Case-insensitive search over every field
        #[arg(short, long, default_value = "")]
        search: String,

        /// Sort column; repeat to toggle direction
        #[arg(long, value_name = "FIELD")]
        sort: Vec<Field>,

        /// Page number (clamped to the available pages)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one policy as JSON
    Show {
        /// Policy id
        id: String,
    },

    /// Add a new policy
    Add {
        #[command(flatten)]
        fill: FillArgs,
    },

    /// Edit an existing policy
    Edit {
        /// Policy id
        id: String,

        #[command(flatten)]
        fill: FillArgs,
    },

    /// Delete one policy
    Delete {
        /// Policy id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete every policy
    DeleteAll {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export every policy as csv, xlsx or pdf
    Export {
        /// Output format
        #[arg(value_parser = parse_format)]
        format: ExportFormat,

        /// Output file (defaults to policies.<ext>)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Extract policy fields from an image and print them as JSON
    Extract {
        /// Scanned form
        image: PathBuf,
    },

    /// Show or change the theme
    Theme {
        /// New theme name
        name: Option<String>,

        /// List the available themes
        #[arg(long)]
        list: bool,
    },

    /// Browse the partner / product / premium lookup table
    Catalog {
        /// Partner to list products for
        partner: Option<String>,

        /// Product to list premium plans for
        product: Option<String>,
    },

    /// Run the extraction proxy (reads the model key from API_KEY)
    ServeProxy {
        /// Listen address (defaults to the configured proxy_bind)
        #[arg(long)]
        bind: Option<String>,
    },
}

/// Ways to fill the form before saving; applied in this order
#[derive(clap::Args, Debug)]
struct FillArgs {
    /// Pre-fill from a scanned form through the extraction proxy
    #[arg(long)]
    image: Option<PathBuf>,

    /// Pre-fill from a JSON file with any subset of policy fields
    #[arg(long)]
    json: Option<PathBuf>,

    /// Set one field; repeatable
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    set: Vec<(Field, String)>,
}

fn parse_assignment(s: &str) -> std::result::Result<(Field, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
    let field = name.trim().parse::<Field>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

fn parse_format(s: &str) -> std::result::Result<ExportFormat, String> {
    s.parse().map_err(|e: mswasth_export::ExportError| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let config = load_config(cli.config.as_deref(), cli.data_dir)?;

    match cli.command {
        Commands::List {
            search,
            sort,
            page,
            json,
        } => list(&config, &search, &sort, page, json),
        Commands::Show { id } => show(&config, &RecordId::new(id)),
        Commands::Add { fill } => {
            let mut app = App::open(&config)?;
            app.add_new();
            save(&mut app, &config, &fill).await
        }
        Commands::Edit { id, fill } => {
            let mut app = App::open(&config)?;
            app.edit(&RecordId::new(id))?;
            save(&mut app, &config, &fill).await
        }
        Commands::Delete { id, yes } => {
            let mut app = App::open(&config)?;
            let id = RecordId::new(id);
            if app.record(&id).is_none() {
                return Err(PortalError::UnknownRecord(id).into());
            }
            app.request_delete(id);
            settle_pending(&mut app, yes)
        }
        Commands::DeleteAll { yes } => {
            let mut app = App::open(&config)?;
            if app.request_delete_all().is_none() {
                println!("No policies to delete.");
                return Ok(());
            }
            settle_pending(&mut app, yes)
        }
        Commands::Export { format, out } => export(&config, format, out),
        Commands::Extract { image } => extract(&config, &image).await,
        Commands::Theme { name, list } => theme(&config, name.as_deref(), list),
        Commands::Catalog { partner, product } => catalog(&config, partner.as_deref(), product.as_deref()),
        Commands::ServeProxy { bind } => serve_proxy(&config, bind).await,
    }
}

fn load_config(path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<PortalConfig> {
    let config = match path {
        Some(path) => PortalConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => PortalConfig::from_file(DEFAULT_CONFIG_FILE)?,
        None => PortalConfig::default(),
    };
    let config = config.with_env_overrides();
    Ok(match data_dir {
        Some(dir) => config.with_data_dir(dir),
        None => config,
    })
}

fn report(app: &App) {
    if let Some(toast) = app.toast() {
        match toast.severity {
            Severity::Error => eprintln!("{toast}"),
            Severity::Success | Severity::Info => println!("{toast}"),
        }
    }
}

fn ask(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn settle_pending(app: &mut App, yes: bool) -> Result<()> {
    let Some(pending) = app.pending().cloned() else {
        return Ok(());
    };
    if yes || ask(pending.prompt())? {
        app.confirm()?;
        report(app);
    } else {
        app.cancel();
        println!("Cancelled.");
    }
    Ok(())
}

fn list(config: &PortalConfig, search: &str, sort: &[Field], page: usize, json: bool) -> Result<()> {
    let mut app = App::open(config)?;
    let view = app.list_mut();
    view.set_search(search);
    for field in sort {
        view.request_sort(*field);
    }
    view.go_to_page(page);
    let sort = view.sort();
    let rendered = app.page();

    if json {
        println!("{}", serde_json::to_string_pretty(&rendered.rows)?);
    } else {
        print_page(&rendered, sort.key, sort.direction);
    }
    Ok(())
}

fn print_page(page: &PageView<'_>, key: Option<Field>, direction: SortDirection) {
    let mut header = vec!["id".to_string()];
    header.extend(TABLE_COLUMNS.iter().map(|field| {
        if key == Some(*field) {
            format!("{} {}", field.label(), direction.arrow())
        } else {
            field.label().to_string()
        }
    }));
    println!("{}", header.join("\t"));

    if page.rows.is_empty() {
        println!("No policies found.");
    }
    for record in &page.rows {
        let mut cells = vec![record.id.to_string()];
        cells.extend(TABLE_COLUMNS.iter().map(|field| record.display(*field)));
        println!("{}", cells.join("\t"));
    }
    println!(
        "Page {} of {} ({} matching)",
        page.page, page.total_pages, page.total_matches
    );
}

fn show(config: &PortalConfig, id: &RecordId) -> Result<()> {
    let app = App::open(config)?;
    let record: &PolicyRecord = app
        .record(id)
        .ok_or_else(|| PortalError::UnknownRecord(id.clone()))?;
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}

fn read_image(path: &Path) -> Result<(Vec<u8>, &'static str)> {
    let mime_type =
        mime_for_path(path).with_context(|| format!("unsupported image type: {}", path.display()))?;
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok((bytes, mime_type))
}

fn extractor(config: &PortalConfig) -> Result<HttpExtractor> {
    Ok(HttpExtractor::with_timeout(
        config.extract_url.clone(),
        config.request_timeout(),
    )?)
}

async fn save(app: &mut App, config: &PortalConfig, fill: &FillArgs) -> Result<()> {
    if let Some(path) = &fill.image {
        let (bytes, mime_type) = read_image(path)?;
        let extractor = extractor(config)?;
        let outcome = app.autofill(&extractor, Some((bytes.as_slice(), mime_type))).await;
        report(app);
        outcome?;
    }
    if let Some(path) = &fill.json {
        let text = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        let partial = PartialRecord::from_json(&text).with_context(|| format!("invalid policy JSON in {}", path.display()))?;
        app.form_mut()?.apply_prefill(&partial);
    }
    for (field, value) in &fill.set {
        app.form_mut()?.set_field(*field, value)?;
    }

    if let Some(form) = app.form() {
        for conflict in form.lookup_conflicts() {
            eprintln!("warning: {conflict}");
        }
    }
    let saved = app.save_form();
    report(app);
    let id = saved?;
    println!("{id}");
    Ok(())
}

fn export(config: &PortalConfig, format: ExportFormat, out: Option<PathBuf>) -> Result<()> {
    let app = App::open(config)?;
    let path = out.unwrap_or_else(|| PathBuf::from(format.default_file_name()));
    export_to_file(app.records(), format, &path)?;
    println!("Exported {} policies to {}", app.records().len(), path.display());
    Ok(())
}

async fn extract(config: &PortalConfig, image: &Path) -> Result<()> {
    let (bytes, mime_type) = read_image(image)?;
    let partial = extractor(config)?.extract(&bytes, mime_type).await?;
    println!("{}", serde_json::to_string_pretty(&partial)?);
    Ok(())
}

fn theme(config: &PortalConfig, name: Option<&str>, list: bool) -> Result<()> {
    let mut app = App::open(config)?;
    if list {
        for theme in THEMES {
            let marker = if theme == app.theme() { "*" } else { " " };
            println!("{marker} {theme}");
        }
        return Ok(());
    }
    if let Some(name) = name {
        app.set_theme(name)?;
    }
    println!("{}", app.theme());
    Ok(())
}

fn catalog(config: &PortalConfig, partner: Option<&str>, product: Option<&str>) -> Result<()> {
    let table = config.load_lookup_table()?;
    match (partner, product) {
        (None, _) => {
            for partner in table.partners() {
                println!("{partner}");
            }
        }
        (Some(partner), None) => {
            if !table.has_partner(partner) {
                bail!("unknown partner: '{partner}'");
            }
            for product in table.products(partner) {
                println!("{product}");
            }
        }
        (Some(partner), Some(product)) => {
            let plans = table.plans(partner, product);
            if plans.is_empty() {
                bail!("'{partner}' does not offer '{product}'");
            }
            println!("premium\ttenure\tagent");
            for plan in plans {
                println!("{}\t{}\t{}", plan.premium, plan.tenure, plan.agent);
            }
        }
    }
    Ok(())
}

async fn serve_proxy(config: &PortalConfig, listen: Option<String>) -> Result<()> {
    let listen = listen.unwrap_or_else(|| config.proxy_bind.clone());
    let addr: SocketAddr = listen
        .parse()
        .with_context(|| format!("invalid listen address: {listen}"))?;

    let api_key = api_key_from_env();
    if api_key.is_none() {
        tracing::warn!("API_KEY is not set; extraction requests will be refused");
    }
    let backend = GeminiBackend::new(api_key.clone().unwrap_or_default())?
        .with_model(config.gemini_model.clone())
        .with_base_url(config.gemini_base_url.clone());
    tracing::info!(model = backend.model(), "using generative backend");

    let state = Arc::new(ProxyState::new(api_key, Arc::new(backend)));
    let (bound, server) = proxy::bind(addr, state, async {
        let _ = tokio::signal::ctrl_c().await;
    })?;
    println!("Extraction proxy listening on http://{bound}/{PROXY_PATH}");
    server.await;
    tracing::info!("extraction proxy stopped");
    Ok(())
}
