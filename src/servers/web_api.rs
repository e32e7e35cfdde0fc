use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{IntoResponse, Json as ResponseJson, Response},
    routing::{get, post},
    Json, Router,
};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::dictionary::Dictionary;
use crate::game::board::Position;
use crate::game::get_empty_cells::get_empty_cells;
use crate::game::error::GameError;
use crate::game::letter::Letter;
use crate::game::player::PlayerSlot;
use crate::recording::GameRecorder;
use crate::services::game_manager::{
    apply_player_move, determine_outcome, outcome_message, reset_game, GameOutcome, GameStatus,
    PlayerMove, PlayerRecord, WordGridGameState,
};
use crate::services::session_manager::{
    create_session_with_manager, get_session_by_code_with_manager,
    remove_idle_sessions_with_manager, update_session_with_manager, GameSession, SessionError,
    SessionManager,
};
use crate::WordGridError;

// ============================================================================
// API PAYLOADS
// ============================================================================

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PlayerNamesRequest {
    pub player1_name: Option<String>,
    pub player2_name: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MoveRequest {
    pub row: usize,
    pub col: usize,
    pub letter: String,
    /// Defaults to the player whose turn it is (hot-seat clients).
    pub player: Option<PlayerSlot>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
    pub version: String,
}

/// Client-facing snapshot of a game.
#[derive(Serialize, Debug, Clone)]
pub struct GameView {
    pub session_id: String,
    pub code: String,
    /// One string per row, `.` for empty cells.
    pub board: Vec<String>,
    pub empty_cells: usize,
    pub players: [PlayerRecord; 2],
    pub current_player: PlayerSlot,
    pub current_player_name: String,
    pub turn_number: usize,
    pub status: GameStatus,
    pub outcome: Option<GameOutcome>,
    pub outcome_message: Option<String>,
}

impl GameView {
    fn from_session(session: &GameSession) -> Self {
        let game = &session.game;
        let outcome = finished_outcome(game);
        Self {
            session_id: session.id.clone(),
            code: session.code.clone(),
            board: game.board.rows(),
            empty_cells: get_empty_cells(&game.board).len(),
            players: game.players.clone(),
            current_player: game.current_player,
            current_player_name: game.player(game.current_player).name.clone(),
            turn_number: game.turn_number,
            status: game.game_status,
            outcome_message: outcome.as_ref().map(|o| outcome_message(game, o)),
            outcome,
        }
    }
}

fn finished_outcome(game: &WordGridGameState) -> Option<GameOutcome> {
    match game.game_status {
        GameStatus::Finished => Some(determine_outcome(game)),
        GameStatus::InProgress => None,
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct MoveResponse {
    pub player: PlayerSlot,
    pub new_words: Vec<String>,
    pub points_earned: u32,
    pub game: GameView,
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("no game with code {0}")]
    UnknownGame(String),

    #[error(transparent)]
    Move(#[from] GameError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UnknownGame(_) | ApiError::Session(SessionError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Move(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Session(SessionError::Conflict { .. }) => StatusCode::CONFLICT,
            ApiError::InvalidBody(rejection) => rejection.status(),
        };
        let body = ApiResponse {
            status: "error".to_string(),
            message: self.to_string(),
        };
        (status, ResponseJson(body)).into_response()
    }
}

// ============================================================================
// SERVER
// ============================================================================

#[derive(Debug, Clone)]
pub struct WebApiConfig {
    pub port: u16,
    pub host: String,
    /// Games without a move or reset for this long are dropped; 0 keeps them forever.
    pub session_timeout_minutes: u64,
}

impl Default for WebApiConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            session_timeout_minutes: 360,
        }
    }
}

const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionManager,
    pub dictionary: Arc<Dictionary>,
    pub recorder: Arc<GameRecorder>,
}

pub struct WebApiServer {
    config: WebApiConfig,
    state: AppState,
}

impl AppState {
    pub fn new(dictionary: Arc<Dictionary>, recorder: Arc<GameRecorder>) -> Self {
        Self {
            sessions: SessionManager::default(),
            dictionary,
            recorder,
        }
    }
}

impl WebApiServer {
    pub fn new(
        config: WebApiConfig,
        dictionary: Arc<Dictionary>,
        recorder: Arc<GameRecorder>,
    ) -> Self {
        Self {
            config,
            state: AppState::new(dictionary, recorder),
        }
    }

    pub async fn start(&self) -> crate::Result<()> {
        let app = create_router(self.state.clone());
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| {
                WordGridError::Server(format!(
                    "invalid listen address {}:{}: {}",
                    self.config.host, self.config.port, e
                ))
            })?;
        let listener = TcpListener::bind(addr).await?;

        if self.config.session_timeout_minutes > 0 {
            let state = self.state.clone();
            let max_idle = chrono::Duration::minutes(self.config.session_timeout_minutes as i64);
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(PRUNE_INTERVAL);
                loop {
                    interval.tick().await;
                    prune_idle_sessions(&state, max_idle).await;
                }
            });
        }

        log::info!(
            "🌐 Word grid API listening on http://{}:{}",
            self.config.host,
            self.config.port
        );

        axum::serve(listener, app).await?;
        Ok(())
    }
}

/// Drops idle games together with their unfinished recordings.
pub async fn prune_idle_sessions(state: &AppState, max_idle: chrono::Duration) -> usize {
    let evicted = remove_idle_sessions_with_manager(&state.sessions, max_idle).await;
    for session in &evicted {
        state.recorder.cancel_game(&session.game.game_id);
        log::info!("🧹 Removed idle game {} (code {})", session.id, session.code);
    }
    evicted.len()
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/status", get(api_status))
        .route("/api/games", post(api_create_game))
        .route("/api/games/{code}", get(api_get_game))
        .route("/api/games/{code}/moves", post(api_place_letter))
        .route("/api/games/{code}/reset", post(api_reset_game))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

// ============================================================================
// HANDLERS
// ============================================================================

async fn api_status() -> ResponseJson<StatusResponse> {
    ResponseJson(StatusResponse {
        status: "ready".to_string(),
        message: "Word grid server is running".to_string(),
        version: crate::VERSION.to_string(),
    })
}

/// A missing body means "no names given"; a malformed one is rejected.
fn player_names(
    request: Result<Option<Json<PlayerNamesRequest>>, JsonRejection>,
) -> Result<PlayerNamesRequest, ApiError> {
    Ok(request?.map(|Json(names)| names).unwrap_or_default())
}

async fn api_create_game(
    State(state): State<AppState>,
    request: Result<Option<Json<PlayerNamesRequest>>, JsonRejection>,
) -> Result<(StatusCode, ResponseJson<GameView>), ApiError> {
    let names = player_names(request)?;
    let session = create_session_with_manager(
        &state.sessions,
        names.player1_name.as_deref().unwrap_or(""),
        names.player2_name.as_deref().unwrap_or(""),
    )
    .await;

    Ok((StatusCode::CREATED, ResponseJson(GameView::from_session(&session))))
}

async fn load_session(state: &AppState, code: &str) -> Result<GameSession, ApiError> {
    get_session_by_code_with_manager(&state.sessions, code)
        .await
        .ok_or_else(|| ApiError::UnknownGame(code.to_string()))
}

async fn api_get_game(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<ResponseJson<GameView>, ApiError> {
    let session = load_session(&state, &code).await?;
    Ok(ResponseJson(GameView::from_session(&session)))
}

async fn api_place_letter(
    State(state): State<AppState>,
    Path(code): Path<String>,
    request: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<ResponseJson<MoveResponse>, ApiError> {
    let Json(request) = request?;
    let mut session = load_session(&state, &code).await?;

    let position = Position::new(request.row, request.col)?;
    let letter = Letter::parse(&request.letter)?;
    let player = request.player.unwrap_or(session.game.current_player);

    // Dictionary lookups run on a copy; the store only sees the finished turn.
    let result = apply_player_move(
        session.game.clone(),
        PlayerMove::new(player, position, letter),
        state.dictionary.as_ref(),
    )
    .await?;

    session.game = result.new_game_state.clone();
    let stored = update_session_with_manager(&state.sessions, session).await?;

    if let Err(e) = state.recorder.record_move(&result) {
        log::error!("❌ Failed to record move for game {}: {}", stored.id, e);
    }

    Ok(ResponseJson(MoveResponse {
        player: result.player,
        new_words: result.new_words,
        points_earned: result.points_earned,
        game: GameView::from_session(&stored),
    }))
}

async fn api_reset_game(
    State(state): State<AppState>,
    Path(code): Path<String>,
    request: Result<Option<Json<PlayerNamesRequest>>, JsonRejection>,
) -> Result<ResponseJson<GameView>, ApiError> {
    let names = player_names(request)?;
    let session = load_session(&state, &code).await?;
    let stored = reset_session(&state, session, &names).await?;
    Ok(ResponseJson(GameView::from_session(&stored)))
}

/// The old game's recording is dropped only once the reset is stored.
async fn reset_session(
    state: &AppState,
    mut session: GameSession,
    names: &PlayerNamesRequest,
) -> Result<GameSession, ApiError> {
    let previous_game_id = session.game.game_id.clone();
    session.game = reset_game(
        session.game,
        names.player1_name.as_deref(),
        names.player2_name.as_deref(),
    );
    let stored = update_session_with_manager(&state.sessions, session).await?;
    state.recorder.cancel_game(&previous_game_id);
    Ok(stored)
}
