//! Dispatch board entry-point: loads settings, prepares the database and
//! serves the REST API.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use dispatch_board::inbound::http::health::HealthState;
use dispatch_board::inbound::http::session_config::{BuildMode, session_settings_from_env};
use dispatch_board::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use server::{AppSettings, ServerConfig, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let mode = BuildMode::from_debug_assertions();
    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let session = session_settings_from_env(&DefaultEnv::new(), mode)
        .wrap_err("invalid session configuration")?;
    let database_url = settings.database_url()?.to_owned();
    let bind_addr = settings.bind_addr()?;

    if settings.run_migrations() {
        run_migrations(database_url.clone())
            .await
            .wrap_err("failed to apply migrations")?;
        info!("database migrations applied");
    }

    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await
    .wrap_err("failed to create database pool")?;
    let http_state = build_http_state(&pool, &settings, mode)?;

    let config = ServerConfig::new(session, bind_addr, http_state);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(make_metrics());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "dispatch board listening");
    server.await.wrap_err("server terminated with an error")
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Option<PrometheusMetrics> {
    match PrometheusMetricsBuilder::new("dispatch_board")
        .endpoint("/metrics")
        .build()
    {
        Ok(metrics) => Some(metrics),
        Err(e) => {
            warn!(error = %e, "Prometheus metrics disabled");
            None
        }
    }
}
