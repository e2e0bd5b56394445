//! Gatepass server binary.
//!
//! Wires the coordination core together: configuration, tracing, the event
//! bus with the WebSocket bridge registered, the in-memory collaborator
//! adapters, and the axum router.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderValue, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

use gatepass::adapters::http::flat::{flat_routes, FlatHandlers};
use gatepass::adapters::http::visitor::{visitor_routes, VisitorHandlers};
use gatepass::adapters::websocket::{
    websocket_router, GateEventBridge, GateSocketState, RoomRegistry,
};
use gatepass::adapters::{InMemoryEventBus, InMemoryFlatDirectory, InMemoryVisitorRepository};
use gatepass::application::visitor::{
    ListVisitorsHandler, LogVisitorHandler, ResolveVisitorHandler,
};
use gatepass::application::VisitorWriteGateway;
use gatepass::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let app = build_app(&config);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Gatepass listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gatepass shut down");
    Ok(())
}

/// Assemble the router over freshly wired adapters.
fn build_app(config: &AppConfig) -> Router {
    // Shared infrastructure
    let rooms = Arc::new(RoomRegistry::new(config.websocket.channel_capacity));
    let bus = Arc::new(InMemoryEventBus::new());

    // Fan-out: the bridge owns topic resolution and room broadcast
    let bridge = GateEventBridge::new_shared(rooms.clone());
    bridge.register(bus.as_ref());

    // Collaborator adapters
    let repository = Arc::new(InMemoryVisitorRepository::new());
    let directory = Arc::new(InMemoryFlatDirectory::new());

    // Write path: durable write first, gateway publish after
    let gateway = Arc::new(VisitorWriteGateway::new(directory.clone(), bus.clone()));

    let visitor_handlers = VisitorHandlers::new(
        Arc::new(LogVisitorHandler::new(
            repository.clone(),
            directory.clone(),
            gateway.clone(),
        )),
        Arc::new(ResolveVisitorHandler::new(repository.clone(), gateway)),
        Arc::new(ListVisitorsHandler::new(repository)),
    );
    let flat_handlers = FlatHandlers::new(directory);
    let ws_state = GateSocketState::new(rooms);

    Router::new()
        .nest("/api/visitors", visitor_routes(visitor_handlers))
        .nest("/api/flats", flat_routes(flat_handlers))
        .nest("/api", websocket_router().with_state(ws_state))
        .route("/health", get(|| async { "ok" }))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.server))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_secs,
                ))),
        )
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        // No origins configured: admit the mobile apps and gate screens
        // from anywhere.
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
