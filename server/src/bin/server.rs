use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};

use axum::http::{header::HeaderName, Method};
use camino::{Utf8Path as Path, Utf8PathBuf as PathBuf};
use clap::Parser;
use eyre::{eyre, Context, Result};
use memorybox::{
    app_state::{AppState, SharedState},
    principal::PRINCIPAL_HEADER,
    reminder_sweep::spawn_reminder_sweep,
    routes,
};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{prelude::*, EnvFilter};

use memorybox_core::{
    capsule::CapsulePasswordHasher,
    model::repository::db::{self, DbPool},
    service::SystemClock,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(short, long)]
    config: String,
    #[cfg(feature = "opentelemetry")]
    #[arg(long)]
    otel_endpoint: Option<String>,
}

async fn db_setup(dir: &Path) -> Result<DbPool> {
    std::fs::create_dir_all(dir).wrap_err("error creating data directory")?;
    let db_url = dir.join("memorybox.db").to_string();
    db::open_and_migrate(&db_url).await
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "1")
    }
    if std::env::var("RUST_SPANTRACE").is_err() {
        std::env::set_var("RUST_SPANTRACE", "1");
    }
    color_eyre::install()?;
    if std::env::var("MEMORYBOX_LOG").is_err() {
        std::env::set_var("MEMORYBOX_LOG", "debug,hyper=info")
    }
    let tracing = tracing_subscriber::registry()
        .with(EnvFilter::from_env("MEMORYBOX_LOG"))
        .with(ErrorLayer::default())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    #[cfg(feature = "opentelemetry")]
    {
        use opentelemetry_otlp::WithExportConfig;
        let telemetry = args
            .otel_endpoint
            .as_ref()
            .map(|otel_endpoint| -> Result<_> {
                let tracer = opentelemetry_otlp::new_pipeline()
                    .tracing()
                    .with_exporter(
                        opentelemetry_otlp::new_exporter()
                            .tonic()
                            .with_endpoint(otel_endpoint.clone()),
                    )
                    .with_trace_config(opentelemetry_sdk::trace::config().with_resource(
                        opentelemetry_sdk::Resource::new(vec![opentelemetry::KeyValue::new(
                            opentelemetry_semantic_conventions::resource::SERVICE_NAME,
                            "memorybox",
                        )]),
                    ))
                    .install_batch(opentelemetry_sdk::runtime::Tokio)
                    .wrap_err("error installing opentelemetry pipeline")?;
                Ok(tracing_opentelemetry::layer().with_tracer(tracer))
            })
            .transpose()?;
        tracing.with(telemetry).init();
    }
    #[cfg(not(feature = "opentelemetry"))]
    {
        tracing.init();
    }

    let config_path = PathBuf::from(args.config);
    let config = memorybox_core::config::read_config(&config_path).await?;
    // relative paths in the config are relative to this
    let config_dir = config_path
        .parent()
        .ok_or_else(|| eyre!("config path {} has no parent directory", config_path))?;

    let addr: IpAddr = config
        .address
        .as_ref()
        .map(|a| a.parse().wrap_err("error parsing listening address"))
        .transpose()?
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
    let port = config.port.unwrap_or(3000);

    let data_dir_path = if config.data_dir.path.is_absolute() {
        config.data_dir.path.clone()
    } else {
        config_dir.join(&config.data_dir.path)
    };
    info!("Starting up...");
    let pool = db_setup(&data_dir_path).await?;
    let hasher = CapsulePasswordHasher::new(&config.password_hashing)?;
    let shared_state: SharedState = Arc::new(AppState::new(pool, Arc::new(SystemClock), hasher));
    let sweep = spawn_reminder_sweep(shared_state.clone(), config.reminders.sweep_interval);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            HeaderName::from_static(PRINCIPAL_HEADER),
        ])
        .allow_origin(Any);
    let app = routes::app(shared_state)
        .layer(
            ServiceBuilder::new()
                .set_x_request_id(MakeRequestUuid)
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().include_headers(true))
                        .on_response(DefaultOnResponse::new().include_headers(true)),
                )
                .propagate_x_request_id(),
        )
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(SocketAddr::new(addr, port))
        .await
        .wrap_err("Error binding socket")?;
    info!(%addr, port, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("error running server")?;
    info!("Shutting down...");
    sweep.abort();

    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => {}
        Err(err) => {
            eprintln!("Unable to listen for shutdown signal: {}", err);
            std::process::exit(1);
        }
    }
}
