use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use credit_engine::config::AppConfig;
use credit_engine::error::AppError;
use credit_engine::scoring::{
    decision_router, DecisionEngine, LoanApplication, LogisticModel,
};
use credit_engine::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Credit Eligibility Engine",
    about = "Serve or exercise the loan eligibility decision engine from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute an eligibility decision offline for a loan application file
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// Override the configured model parameter file
    #[arg(long)]
    model: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Loan application JSON file (same shape as the predict endpoint body)
    #[arg(long)]
    application: PathBuf,
    /// Fitted model parameter file (defaults to APP_MODEL_PATH)
    #[arg(long)]
    model: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Score(args) => run_score(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(model) = args.model.take() {
        config.model.path = Some(model);
    }

    telemetry::init(&config.telemetry)?;

    let engine = match &config.model.path {
        Some(path) => {
            let model = LogisticModel::from_path(path)?;
            info!(path = %path.display(), "eligibility model loaded");
            Arc::new(DecisionEngine::new(Arc::new(model)))
        }
        None => {
            warn!("APP_MODEL_PATH not set, predictions will answer 503 until a model is configured");
            Arc::new(DecisionEngine::unavailable())
        }
    };

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(decision_router(engine))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "credit eligibility engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs { application, model } = args;

    let model_path = match model {
        Some(path) => Some(path),
        None => AppConfig::load()?.model.path,
    };

    let engine = match model_path {
        Some(path) => DecisionEngine::new(Arc::new(LogisticModel::from_path(path)?)),
        None => DecisionEngine::unavailable(),
    };

    let file = File::open(&application)?;
    let application: LoanApplication = serde_json::from_reader(BufReader::new(file))
        .map_err(|err| AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))?;

    if let Err(error) = application.validate() {
        eprintln!("invalid application: {error}");
        std::process::exit(2);
    }

    let decision = engine.decide(&application);

    println!("# Eligibility decision ({})", Local::now().format("%Y-%m-%d %H:%M"));
    match serde_json::to_string_pretty(&decision) {
        Ok(rendered) => println!("{rendered}"),
        Err(_) => println!("{decision:?}"),
    }

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
