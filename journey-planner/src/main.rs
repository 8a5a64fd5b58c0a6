use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use journey_planner::config::ServerConfig;
use journey_planner::timetable::read_timetable;
use journey_planner::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let config = ServerConfig::from_env();
    info!(?config, "starting journey planner");

    // Fail fast if the timetable is unusable
    let timetable = match read_timetable(&config.timetable_path) {
        Ok(timetable) => timetable,
        Err(e) => {
            error!(error = %e, "failed to load timetable");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(timetable, &config.cache);
    let app = create_router(state, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };
    info!("listening on http://{}", config.bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
