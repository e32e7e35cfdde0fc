// src/services/game_manager.rs - Turn flow of a two-player word grid game

use serde::{Deserialize, Serialize};

use crate::dictionary::WordValidator;
use crate::game::board::{create_board_empty, Board, Position};
use crate::game::board_is_full::is_board_full;
use crate::game::error::GameError;
use crate::game::letter::Letter;
use crate::game::player::PlayerSlot;
use crate::scoring::scoring::score_placement;

// ============================================================================
// GAME STATE TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub score: u32,
    /// Every word this player has scored, in the order they were found.
    pub words: Vec<String>,
}

impl PlayerRecord {
    fn new(name: String) -> Self {
        Self {
            name,
            score: 0,
            words: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordGridGameState {
    pub session_id: String,
    /// Identifies one played game in recordings; renewed on every reset.
    pub game_id: String,
    pub board: Board,
    /// Indexed by `PlayerSlot::index`.
    pub players: [PlayerRecord; 2],
    pub current_player: PlayerSlot,
    /// Number of letters placed so far.
    pub turn_number: usize,
    pub game_status: GameStatus,
}

impl WordGridGameState {
    pub fn player(&self, slot: PlayerSlot) -> &PlayerRecord {
        &self.players[slot.index()]
    }

    fn player_mut(&mut self, slot: PlayerSlot) -> &mut PlayerRecord {
        &mut self.players[slot.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Finished,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerMove {
    pub player: PlayerSlot,
    pub position: Position,
    pub letter: Letter,
    pub timestamp: i64,
}

impl PlayerMove {
    pub fn new(player: PlayerSlot, position: Position, letter: Letter) -> Self {
        Self {
            player,
            position,
            letter,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResult {
    pub new_game_state: WordGridGameState,
    pub player: PlayerSlot,
    pub position: Position,
    pub letter: Letter,
    pub new_words: Vec<String>,
    pub points_earned: u32,
    pub is_game_over: bool,
    pub outcome: Option<GameOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Winner { player: PlayerSlot, name: String },
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    CanPlay,
    WaitingForOpponent,
    GameFinished,
}

// ============================================================================
// GAME CREATION
// ============================================================================

/// Trims `input`, falling back to the slot's default name when blank.
pub fn normalize_player_name(input: &str, slot: PlayerSlot) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        slot.default_name().to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn create_word_grid_game(
    session_id: String,
    player1_name: &str,
    player2_name: &str,
) -> WordGridGameState {
    WordGridGameState {
        session_id,
        game_id: uuid::Uuid::new_v4().to_string(),
        board: create_board_empty(),
        players: [
            PlayerRecord::new(normalize_player_name(player1_name, PlayerSlot::One)),
            PlayerRecord::new(normalize_player_name(player2_name, PlayerSlot::Two)),
        ],
        current_player: PlayerSlot::One,
        turn_number: 0,
        game_status: GameStatus::InProgress,
    }
}

/// Fresh board, scores, word lists and game id. Names are replaced only when given.
pub fn reset_game(
    game_state: WordGridGameState,
    player1_name: Option<&str>,
    player2_name: Option<&str>,
) -> WordGridGameState {
    let name1 = player1_name
        .map(|n| normalize_player_name(n, PlayerSlot::One))
        .unwrap_or_else(|| game_state.players[0].name.clone());
    let name2 = player2_name
        .map(|n| normalize_player_name(n, PlayerSlot::Two))
        .unwrap_or_else(|| game_state.players[1].name.clone());

    log::info!("Game {} reset ({} vs {})", game_state.session_id, name1, name2);
    create_word_grid_game(game_state.session_id, &name1, &name2)
}

// ============================================================================
// TURN FLOW
// ============================================================================

/// Places the letter, scores it for the mover and hands the turn over.
///
/// The turn passes even when nothing was scored. A rejected move returns the
/// error and leaves the caller's state as it was.
pub async fn apply_player_move<V: WordValidator>(
    mut game_state: WordGridGameState,
    player_move: PlayerMove,
    validator: &V,
) -> Result<MoveResult, GameError> {
    if is_game_finished(&game_state) {
        return Err(GameError::GameFinished);
    }

    if player_move.player != game_state.current_player {
        return Err(GameError::NotYourTurn {
            expected: game_state.current_player,
        });
    }

    game_state
        .board
        .place(player_move.position, player_move.letter)?;

    let mover = player_move.player;
    let turn = score_placement(
        &game_state.board,
        player_move.position,
        &game_state.player(mover).words,
        validator,
    )
    .await;

    {
        let record = game_state.player_mut(mover);
        record.score += turn.points;
        for word in &turn.new_words {
            if !record.words.contains(word) {
                record.words.push(word.clone());
            }
        }
    }

    log::info!(
        "{} placed {} at ({}, {}) and formed new words: [{}]",
        game_state.player(mover).name,
        player_move.letter,
        player_move.position.row(),
        player_move.position.col(),
        turn.new_words.join(", ")
    );
    log::info!(
        "{} scored {} points this turn",
        game_state.player(mover).name,
        turn.points
    );

    game_state.turn_number += 1;
    game_state.current_player = mover.other();

    let outcome = if is_board_full(&game_state.board) {
        game_state.game_status = GameStatus::Finished;
        let outcome = determine_outcome(&game_state);
        log::info!("🏁 {}", outcome_message(&game_state, &outcome));
        Some(outcome)
    } else {
        None
    };

    Ok(MoveResult {
        is_game_over: outcome.is_some(),
        new_game_state: game_state,
        player: mover,
        position: player_move.position,
        letter: player_move.letter,
        new_words: turn.new_words,
        points_earned: turn.points,
        outcome,
    })
}

// ============================================================================
// GAME END
// ============================================================================

pub fn is_game_finished(game_state: &WordGridGameState) -> bool {
    matches!(game_state.game_status, GameStatus::Finished) || is_board_full(&game_state.board)
}

pub fn determine_outcome(game_state: &WordGridGameState) -> GameOutcome {
    let [first, second] = &game_state.players;
    if first.score > second.score {
        GameOutcome::Winner {
            player: PlayerSlot::One,
            name: first.name.clone(),
        }
    } else if second.score > first.score {
        GameOutcome::Winner {
            player: PlayerSlot::Two,
            name: second.name.clone(),
        }
    } else {
        GameOutcome::Draw
    }
}

pub fn outcome_message(game_state: &WordGridGameState, outcome: &GameOutcome) -> String {
    match outcome {
        GameOutcome::Winner { name, .. } => format!("{} has won the game!", name),
        GameOutcome::Draw => format!(
            "It's a draw between {} and {}!",
            game_state.players[0].name, game_state.players[1].name
        ),
    }
}

pub fn get_player_status(game_state: &WordGridGameState, slot: PlayerSlot) -> PlayerStatus {
    if is_game_finished(game_state) {
        PlayerStatus::GameFinished
    } else if game_state.current_player == slot {
        PlayerStatus::CanPlay
    } else {
        PlayerStatus::WaitingForOpponent
    }
}
