// src/services/session_manager.rs - In-memory store of running games

use crate::services::game_manager::{create_word_grid_game, WordGridGameState};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

// ============================================================================
// DATA TYPES
// ============================================================================

#[derive(Debug, Clone)]
pub struct GameSession {
    pub id: String,
    /// Short join code shared between the two players.
    pub code: String,
    pub game: WordGridGameState,
    /// Bumped on every stored update.
    pub version: u64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Time of the last stored update; idle sessions are evicted from it.
    pub last_active: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session {0} not found")]
    NotFound(String),

    #[error("session {session_id} was modified concurrently (expected version {expected}, found {found})")]
    Conflict {
        session_id: String,
        expected: u64,
        found: u64,
    },
}

#[derive(Debug, Clone)]
pub enum SessionAction {
    CreateSession { session: GameSession },
    UpdateSession { session: GameSession },
    RemoveSession { session_id: String },
}

#[derive(Debug, Clone, Default)]
pub struct SessionStoreState {
    pub sessions: HashMap<String, GameSession>,
    pub sessions_by_code: HashMap<String, String>,
}

impl SessionStoreState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Clone, Default)]
pub struct SessionManager {
    store: Arc<RwLock<SessionStoreState>>,
}

pub fn new_session_manager() -> SessionManager {
    SessionManager::default()
}

pub fn get_store_from_manager(manager: &SessionManager) -> &Arc<RwLock<SessionStoreState>> {
    &manager.store
}

// ============================================================================
// PURE STATE TRANSITIONS
// ============================================================================

pub fn apply_session_action(mut state: SessionStoreState, action: SessionAction) -> SessionStoreState {
    match action {
        SessionAction::CreateSession { session } | SessionAction::UpdateSession { session } => {
            state
                .sessions_by_code
                .insert(session.code.clone(), session.id.clone());
            state.sessions.insert(session.id.clone(), session);
        }
        SessionAction::RemoveSession { session_id } => {
            if let Some(session) = state.sessions.remove(&session_id) {
                state.sessions_by_code.remove(&session.code);
            }
        }
    }
    state
}

pub fn find_session_by_code<'a>(
    state: &'a SessionStoreState,
    code: &str,
) -> Option<&'a GameSession> {
    state
        .sessions_by_code
        .get(&code.to_uppercase())
        .and_then(|session_id| state.sessions.get(session_id))
}

pub fn find_session_by_id<'a>(
    state: &'a SessionStoreState,
    session_id: &str,
) -> Option<&'a GameSession> {
    state.sessions.get(session_id)
}

pub fn create_game_session(player1_name: &str, player2_name: &str) -> GameSession {
    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now();
    GameSession {
        game: create_word_grid_game(id.clone(), player1_name, player2_name),
        id,
        code: generate_session_code(),
        version: 0,
        created_at: now,
        last_active: now,
    }
}

fn generate_session_code() -> String {
    use rand::Rng;
    let mut rng = rand::rng();
    let chars: Vec<char> = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".chars().collect();

    (0..6)
        .map(|_| chars[rng.random_range(0..chars.len())])
        .collect()
}

// ============================================================================
// STORE OPERATIONS
// ============================================================================

pub async fn create_session_in_store(
    store: &Arc<RwLock<SessionStoreState>>,
    player1_name: &str,
    player2_name: &str,
) -> GameSession {
    let mut state = store.write().await;

    let mut session = create_game_session(player1_name, player2_name);
    while state.sessions_by_code.contains_key(&session.code) {
        session.code = generate_session_code();
    }

    log::info!(
        "🎮 Created game {} (code {}): {} vs {}",
        session.id,
        session.code,
        session.game.players[0].name,
        session.game.players[1].name
    );

    let created = session.clone();
    *state = apply_session_action(std::mem::take(&mut *state), SessionAction::CreateSession { session });
    created
}

pub async fn get_session_by_code_from_store(
    store: &Arc<RwLock<SessionStoreState>>,
    code: &str,
) -> Option<GameSession> {
    let state = store.read().await;
    find_session_by_code(&state, code).cloned()
}

pub async fn get_session_by_id_from_store(
    store: &Arc<RwLock<SessionStoreState>>,
    session_id: &str,
) -> Option<GameSession> {
    let state = store.read().await;
    find_session_by_id(&state, session_id).cloned()
}

/// Stores `session` if nobody else updated it since it was read.
/// Returns the stored copy with its new version.
pub async fn update_session_in_store(
    store: &Arc<RwLock<SessionStoreState>>,
    mut session: GameSession,
) -> Result<GameSession, SessionError> {
    let mut state = store.write().await;

    let found = find_session_by_id(&state, &session.id)
        .map(|current| current.version)
        .ok_or_else(|| SessionError::NotFound(session.id.clone()))?;
    if found != session.version {
        return Err(SessionError::Conflict {
            session_id: session.id,
            expected: session.version,
            found,
        });
    }

    session.version += 1;
    session.last_active = chrono::Utc::now();
    let stored = session.clone();
    *state = apply_session_action(std::mem::take(&mut *state), SessionAction::UpdateSession { session });
    Ok(stored)
}

pub async fn remove_session_from_store(
    store: &Arc<RwLock<SessionStoreState>>,
    session_id: &str,
) -> bool {
    let mut state = store.write().await;
    let existed = state.sessions.contains_key(session_id);
    *state = apply_session_action(
        std::mem::take(&mut *state),
        SessionAction::RemoveSession {
            session_id: session_id.to_string(),
        },
    );
    existed
}

/// Removes sessions untouched for longer than `max_idle` and returns them.
pub async fn remove_idle_sessions_from_store(
    store: &Arc<RwLock<SessionStoreState>>,
    max_idle: chrono::Duration,
) -> Vec<GameSession> {
    let mut state = store.write().await;
    let cutoff = chrono::Utc::now() - max_idle;

    let idle: Vec<GameSession> = state
        .sessions
        .values()
        .filter(|session| session.last_active < cutoff)
        .cloned()
        .collect();

    for session in &idle {
        *state = apply_session_action(
            std::mem::take(&mut *state),
            SessionAction::RemoveSession {
                session_id: session.id.clone(),
            },
        );
    }
    idle
}

pub async fn session_count_in_store(store: &Arc<RwLock<SessionStoreState>>) -> usize {
    store.read().await.sessions.len()
}

// ============================================================================
// MANAGER-LEVEL HELPERS
// ============================================================================

pub async fn create_session_with_manager(
    manager: &SessionManager,
    player1_name: &str,
    player2_name: &str,
) -> GameSession {
    create_session_in_store(get_store_from_manager(manager), player1_name, player2_name).await
}

pub async fn get_session_by_code_with_manager(
    manager: &SessionManager,
    code: &str,
) -> Option<GameSession> {
    get_session_by_code_from_store(get_store_from_manager(manager), code).await
}

pub async fn get_session_by_id_with_manager(
    manager: &SessionManager,
    session_id: &str,
) -> Option<GameSession> {
    get_session_by_id_from_store(get_store_from_manager(manager), session_id).await
}

pub async fn update_session_with_manager(
    manager: &SessionManager,
    session: GameSession,
) -> Result<GameSession, SessionError> {
    update_session_in_store(get_store_from_manager(manager), session).await
}

pub async fn remove_session_with_manager(manager: &SessionManager, session_id: &str) -> bool {
    remove_session_from_store(get_store_from_manager(manager), session_id).await
}

pub async fn remove_idle_sessions_with_manager(
    manager: &SessionManager,
    max_idle: chrono::Duration,
) -> Vec<GameSession> {
    remove_idle_sessions_from_store(get_store_from_manager(manager), max_idle).await
}

pub async fn session_count_with_manager(manager: &SessionManager) -> usize {
    session_count_in_store(get_store_from_manager(manager)).await
}
