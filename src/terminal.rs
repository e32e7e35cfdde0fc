//! Hot-seat play in a terminal: both players share stdin.

use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::dictionary::WordValidator;
use crate::game::board::{Position, BOARD_SIZE};
use crate::game::error::GameError;
use crate::game::letter::Letter;
use crate::game::player::PlayerSlot;
use crate::recording::GameRecorder;
use crate::services::game_manager::{
    apply_player_move, create_word_grid_game, outcome_message, reset_game, PlayerMove,
    WordGridGameState,
};

const HELP: &str = "\
Commands:
  <row> <col> <letter>   place a letter, rows and columns count from 1
  reset                  start over with the same players
  help                   show this text
  quit                   leave the game";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Place(Position, Letter),
    Reset,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

pub fn parse_command(line: &str) -> Command {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        [] => Command::Empty,
        [word] if word.eq_ignore_ascii_case("quit") || word.eq_ignore_ascii_case("exit") => {
            Command::Quit
        }
        [word] if word.eq_ignore_ascii_case("reset") => Command::Reset,
        [word] if word.eq_ignore_ascii_case("help") => Command::Help,
        [row, col, letter] => {
            let coords = (row.parse::<usize>(), col.parse::<usize>());
            let (Ok(row), Ok(col)) = coords else {
                return Command::Invalid(format!("'{}' is not a row and column", line.trim()));
            };
            if !(1..=BOARD_SIZE).contains(&row) || !(1..=BOARD_SIZE).contains(&col) {
                return Command::Invalid(format!(
                    "row and column must be between 1 and {}",
                    BOARD_SIZE
                ));
            }
            let parsed = Position::new(row - 1, col - 1).and_then(|position| {
                Letter::parse(letter).map(|letter| (position, letter))
            });
            match parsed {
                Ok((position, letter)) => Command::Place(position, letter),
                Err(e) => Command::Invalid(e.to_string()),
            }
        }
        _ => Command::Invalid(format!("unknown command '{}', type 'help'", line.trim())),
    }
}

pub fn render_game(game: &WordGridGameState) -> String {
    let mut out = String::from("   ");
    for col in 1..=BOARD_SIZE {
        out.push_str(&format!(" {}", col));
    }
    out.push('\n');
    for (i, row) in game.board.rows().iter().enumerate() {
        out.push_str(&format!("{:>2} ", i + 1));
        for c in row.chars() {
            out.push(' ');
            out.push(c);
        }
        out.push('\n');
    }
    for slot in [PlayerSlot::One, PlayerSlot::Two] {
        let player = game.player(slot);
        let marker = if slot == game.current_player { ">" } else { " " };
        out.push_str(&format!(
            "{} {}: {} [{}]\n",
            marker,
            player.name,
            player.score,
            player.words.join(", ")
        ));
    }
    out
}

/// Reads one line, `None` on end of input.
async fn read_line<R: AsyncBufRead + Unpin>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line).await? == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

async fn ask_name<R, W>(input: &mut R, output: &mut W, slot: PlayerSlot) -> std::io::Result<String>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(output, "{} name (blank for '{}'): ", slot, slot.default_name())?;
    output.flush()?;
    Ok(read_line(input).await?.unwrap_or_default())
}

/// Runs games until `quit` or end of input. Names that are `None` are asked for.
pub async fn play_hot_seat<V, R, W>(
    validator: &V,
    recorder: &GameRecorder,
    names: (Option<String>, Option<String>),
    mut input: R,
    output: &mut W,
) -> crate::Result<()>
where
    V: WordValidator,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let player1 = match names.0 {
        Some(name) => name,
        None => ask_name(&mut input, output, PlayerSlot::One).await?,
    };
    let player2 = match names.1 {
        Some(name) => name,
        None => ask_name(&mut input, output, PlayerSlot::Two).await?,
    };

    let mut game = create_word_grid_game(uuid::Uuid::new_v4().to_string(), &player1, &player2);
    writeln!(output, "{}", HELP)?;

    loop {
        write!(output, "\n{}", render_game(&game))?;
        write!(output, "{} > ", game.player(game.current_player).name)?;
        output.flush()?;

        let Some(line) = read_line(&mut input).await? else {
            break;
        };

        match parse_command(&line) {
            Command::Quit => break,
            Command::Empty => {}
            Command::Help => writeln!(output, "{}", HELP)?,
            Command::Invalid(message) => writeln!(output, "✗ {}", message)?,
            Command::Reset => {
                recorder.cancel_game(&game.game_id);
                game = reset_game(game, None, None);
                writeln!(output, "New game started.")?;
            }
            Command::Place(position, letter) => {
                let player_move = PlayerMove::new(game.current_player, position, letter);
                match apply_player_move(game.clone(), player_move, validator).await {
                    Ok(result) => {
                        let mover = result.new_game_state.player(result.player).name.clone();
                        if result.new_words.is_empty() {
                            writeln!(output, "{} formed no new words.", mover)?;
                        } else {
                            writeln!(
                                output,
                                "{} formed {} and scored {} points.",
                                mover,
                                result.new_words.join(", "),
                                result.points_earned
                            )?;
                        }
                        if let Err(e) = recorder.record_move(&result) {
                            log::error!("❌ Failed to record move: {}", e);
                        }
                        if let Some(outcome) = &result.outcome {
                            writeln!(
                                output,
                                "\n🏁 {}\nType 'reset' to play again or 'quit' to leave.",
                                outcome_message(&result.new_game_state, outcome)
                            )?;
                        }
                        game = result.new_game_state;
                    }
                    Err(GameError::CellOccupied { .. }) => {
                        writeln!(output, "✗ That cell is already taken.")?
                    }
                    Err(e) => writeln!(output, "✗ {}", e)?,
                }
            }
        }
    }

    recorder.cancel_game(&game.game_id);
    writeln!(output, "Goodbye!")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordList;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("  "), Command::Empty);
        assert_eq!(parse_command("QUIT\n"), Command::Quit);
        assert_eq!(parse_command("reset"), Command::Reset);
        assert_eq!(
            parse_command("1 7 q"),
            Command::Place(Position::new(0, 6).unwrap(), Letter::new('Q').unwrap())
        );
        assert!(matches!(parse_command("0 1 a"), Command::Invalid(_)));
        assert!(matches!(parse_command("8 1 a"), Command::Invalid(_)));
        assert!(matches!(parse_command("a b c"), Command::Invalid(_)));
        assert!(matches!(parse_command("1 1 ab"), Command::Invalid(_)));
        assert!(matches!(parse_command("dance"), Command::Invalid(_)));
    }

    #[test]
    fn test_render_marks_current_player() {
        let game = create_word_grid_game("t".to_string(), "Ada", "Bob");
        let rendered = render_game(&game);
        assert!(rendered.starts_with("    1 2 3 4 5 6 7\n"));
        assert!(rendered.contains(" 1  . . . . . . .\n"));
        assert!(rendered.contains("> Ada: 0 []"));
        assert!(rendered.contains("  Bob: 0 []"));
    }

    #[tokio::test]
    async fn test_hot_seat_session() {
        let dictionary = WordList::from_words(["cat"]);
        let recorder = GameRecorder::disabled();
        let input: &[u8] = b"Ada\n\n1 1 c\n1 1 x\n1 2 a\nnonsense\n1 3 t\nquit\n";
        let mut output = Vec::new();

        play_hot_seat(&dictionary, &recorder, (None, None), input, &mut output)
            .await
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Ada formed no new words."));
        assert!(text.contains("✗ That cell is already taken."));
        assert!(text.contains("Player 2 formed no new words."));
        assert!(text.contains("✗ unknown command 'nonsense'"));
        assert!(text.contains("Ada formed CAT and scored 3 points."));
        assert!(text.contains("> Player 2: 0 []"));
        assert!(text.contains("  Ada: 3 [CAT]"));
        assert!(text.ends_with("Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_end_of_input_stops_the_game() {
        let dictionary = WordList::default();
        let recorder = GameRecorder::disabled();
        let input: &[u8] = b"";
        let mut output = Vec::new();

        let names = (Some("Ada".to_string()), Some("Bob".to_string()));
        play_hot_seat(&dictionary, &recorder, names, input, &mut output)
            .await
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Ada > "));
        assert!(text.ends_with("Goodbye!\n"));
    }
}
