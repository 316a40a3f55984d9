//! Clause risk server
//!
//! Segments uploaded contracts into clauses and ranks them by risk.
//!
//! - `serve` runs the REST API (analysis upload, category listing, health)
//! - `analyze` runs the engine once over a local `.pdf` or `.txt` file and
//!   prints the report as JSON
//!
//! Rate limiting is applied per client IP via tower-governor.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::{Args, Parser, Subcommand};
use clause_engine::{ContractAnalyzer, HeuristicAnalyzer, Taxonomy};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;

use api::{analyze_extracted, handle_analyze, handle_health, handle_list_categories};

/// Command-line arguments for the clause server
#[derive(Parser, Debug)]
#[command(name = "clause-server")]
#[command(about = "Contract clause segmentation and risk scoring")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the analysis API over HTTP
    Serve(ServeArgs),

    /// Analyze one document and print the report
    Analyze(AnalyzeArgs),
}

/// Options shared by every command that builds an analyzer
#[derive(Args, Debug, Clone)]
struct EngineArgs {
    /// Taxonomy TOML replacing the built-in categories
    #[arg(long)]
    taxonomy: Option<PathBuf>,

    /// Add sentence and negation signals from the built-in heuristics
    #[arg(long)]
    heuristic_signals: bool,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Largest accepted document, in megabytes. Raw text whose JSON escaping
    /// more than doubles it (control characters sent as \uXXXX) may hit the
    /// request body limit first
    #[arg(long, default_value = "16")]
    max_upload_mb: usize,

    /// Analysis timeout in milliseconds
    #[arg(long, default_value = "30000")]
    timeout_ms: u64,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Document to analyze (.pdf or .txt)
    path: PathBuf,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    #[command(flatten)]
    engine: EngineArgs,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<ContractAnalyzer>,
    /// Analysis timeout in milliseconds
    pub timeout_ms: u64,
    /// Largest accepted document, in bytes
    pub max_upload_bytes: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    // Logs go to stderr so `analyze` output stays clean JSON
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Analyze(args) => analyze(args),
    }
}

fn build_analyzer(args: &EngineArgs) -> anyhow::Result<ContractAnalyzer> {
    let taxonomy = match &args.taxonomy {
        Some(path) => {
            info!("Loading taxonomy from {}", path.display());
            Taxonomy::from_file(path)?
        }
        None => Taxonomy::builtin(),
    };

    let analyzer = ContractAnalyzer::new(taxonomy)?;
    Ok(if args.heuristic_signals {
        analyzer.with_linguistics(Arc::new(HeuristicAnalyzer::new()))
    } else {
        analyzer
    })
}

/// Request body limit for a given document limit
///
/// Covers base64 uploads (4/3) and raw text whose newlines, quotes and
/// backslashes are escaped to two bytes each, plus room for the JSON envelope.
pub fn request_body_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes.saturating_mul(2).saturating_add(64 * 1024)
}

/// Routes with the upload limit applied; transport middleware is added by `serve`
pub fn routes(state: AppState) -> Router {
    let body_limit = request_body_limit(state.max_upload_bytes);

    Router::new()
        .route("/health", get(handle_health))
        .route("/api/categories", get(handle_list_categories))
        .route("/api/analyze", post(handle_analyze))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    info!("Starting clause server on {}:{}", args.host, args.port);

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .ok_or_else(|| anyhow!("Invalid rate limit: {}", args.rate_limit))?,
    );

    let state = AppState {
        analyzer: Arc::new(build_analyzer(&args.engine)?),
        timeout_ms: args.timeout_ms,
        max_upload_bytes: args.max_upload_mb * 1024 * 1024,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes(state)
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!(
        "Upload limit: {}MB, analysis timeout: {}ms",
        args.max_upload_mb, args.timeout_ms
    );

    // The governor keys on the peer address
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let analyzer = build_analyzer(&args.engine)?;
    let report = analyze_file(&analyzer, &args.path)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}

fn analyze_file(
    analyzer: &ContractAnalyzer,
    path: &Path,
) -> anyhow::Result<shared_types::ContractReport> {
    let extracted = shared_pdf::extract_path(path)
        .with_context(|| format!("Failed to extract {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    Ok(analyze_extracted(analyzer, extracted, filename))
}
