use std::sync::Arc;

use axum::{
    extract::{Path, State, WebSocketUpgrade},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use get_the_gold::application::GameService;
use get_the_gold::game::types::{GameId, GameState};
use get_the_gold::websocket::WebSocketService;

#[derive(Clone)]
struct AppState {
    game_service: Arc<GameService>,
    ws_service: WebSocketService,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatedGame {
    game_id: GameId,
}

async fn hello_world() -> &'static str {
    "Get the Gold server"
}

async fn create_game(State(state): State<AppState>) -> Json<CreatedGame> {
    let game_id = state.game_service.create_game().await;
    Json(CreatedGame { game_id })
}

async fn list_games(State(state): State<AppState>) -> Json<Vec<GameId>> {
    Json(state.game_service.list_games().await)
}

async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameState>, StatusCode> {
    match state.game_service.snapshot(&game_id).await {
        Ok(snapshot) => Ok(Json(snapshot)),
        Err(e) => {
            log::warn!("Snapshot request failed: {e}");
            Err(StatusCode::NOT_FOUND)
        }
    }
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    Path((game_id, player_id)): Path<(String, String)>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| async move {
        state
            .ws_service
            .handle_connection(socket, game_id, player_id)
            .await
    })
}

#[tokio::main]
async fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let game_service = Arc::new(GameService::new());
    let ws_service = WebSocketService::new(game_service.clone());
    let state = AppState {
        game_service,
        ws_service,
    };

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any);

    let app = Router::new()
        .route("/", get(hello_world))
        .route("/games", get(list_games).post(create_game))
        .route("/games/{game_id}", get(get_game))
        .route("/ws/games/{game_id}/{player_id}", get(ws_handler))
        .with_state(state)
        .layer(cors);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    log::info!("Starting Get the Gold server v{} on {addr}", get_the_gold::VERSION);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        log::error!("Server error: {e}");
        std::process::exit(1);
    }
}
