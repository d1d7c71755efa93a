use std::sync::Arc;

use autostop::config::AppConfig;
use autostop::session::{SessionGate, SessionRouteState, session_routes};
use autostop::state::fixture::{default_rides, load_rides};
use autostop::state::{StateContainer, StateRouteState, state_routes, ws_routes};
use autostop::store::{LibSqlStore, StorageCapability};
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    eprintln!("🚗 AutoStop core v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Session API: http://0.0.0.0:{}/api/session", config.port);
    eprintln!("   Gate API: http://0.0.0.0:{}/api/gate", config.port);
    eprintln!("   State WS: ws://0.0.0.0:{}/ws", config.port);

    // ── Settings store ──────────────────────────────────────────────────
    let storage = match config.db_path {
        Some(ref path) => {
            let store = LibSqlStore::new_local(path).await.unwrap_or_else(|e| {
                eprintln!(
                    "Error: Failed to open settings store at {}: {}",
                    path.display(),
                    e
                );
                std::process::exit(1);
            });
            eprintln!("   Settings store: {}", path.display());
            StorageCapability::Available(Arc::new(store))
        }
        None => {
            // Deliberate configuration, not a fallback: the gate stands open.
            eprintln!("   Settings store: disabled");
            StorageCapability::Unavailable
        }
    };

    let gate = Arc::new(SessionGate::new(storage, config.onboarding_path.clone()));

    // ── Ride fixture ────────────────────────────────────────────────────
    let rides = match config.rides_path {
        Some(ref path) => load_rides(path),
        None => default_rides(),
    }
    .unwrap_or_else(|e| {
        eprintln!("Error: Failed to load ride fixture: {}", e);
        std::process::exit(1);
    });
    eprintln!("   Rides: {} seeded\n", rides.len());

    // ── State container + HTTP surface ──────────────────────────────────
    let container = StateContainer::new(rides);

    let app = session_routes(SessionRouteState { gate })
        .merge(state_routes(StateRouteState {
            container: Arc::clone(&container),
            mapbox_token: config.mapbox_token.clone(),
        }))
        .merge(ws_routes(container))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "AutoStop core started");
    axum::serve(listener, app).await?;

    Ok(())
}
