use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use std::sync::Arc;

use crate::{auth, cities, hotels, session};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

pub fn router(state: ServerState) -> Router {
    let manager = Router::new()
        .route("/manager/hotels", get(hotels::list).post(hotels::create))
        .route(
            "/manager/hotels/{id}",
            get(hotels::show)
                .put(hotels::update)
                .delete(hotels::delete),
        )
        .route_layer(middleware::from_fn(session::require_manager));

    Router::new()
        .route("/", get(cities::landing))
        .route("/autocomplete", get(cities::autocomplete))
        .route("/cities/{city_code}/hotels", get(cities::hotels))
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .merge(manager)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::resolve_caller,
        ))
        .with_state(state)
}

pub async fn run(engine: Engine, addr: &str) {
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
