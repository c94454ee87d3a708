use std::io::{self, BufRead, Write};

use hanabi_core::GameError;
use hanabi_core::game::{Game, Move, Strategy};
use hanabi_core::model::player::PlayerId;

use crate::render::render_table;

const RETRY: &str = "Nah, that can't be quite right. Try again...";

/// Human seat driven through a line-oriented terminal.
///
/// Shows the table from the seat's point of view, numbers every legal move
/// and waits for a valid choice. Closing the input stream abandons the game.
pub struct ConsoleStrategy<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleStrategy<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, game: &Game, seat: PlayerId, moves: &[Move]) -> io::Result<Option<usize>> {
        writeln!(self.output, "{seat} - it's your turn!")?;
        write!(self.output, "{}", render_table(game, Some(seat)))?;
        writeln!(self.output, "Options:")?;
        for (index, option) in moves.iter().enumerate() {
            writeln!(self.output, "{}: {option}", index + 1)?;
        }

        loop {
            write!(self.output, "Choose a move [1-{}]: ", moves.len())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            match line.trim().parse::<usize>() {
                Ok(choice) if (1..=moves.len()).contains(&choice) => return Ok(Some(choice - 1)),
                _ => writeln!(self.output, "{RETRY}")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Strategy for ConsoleStrategy<R, W> {
    fn choose_move(&mut self, game: &Game, seat: PlayerId) -> Result<Move, GameError> {
        let moves = game.legal_moves(seat);
        if moves.is_empty() {
            return Err(GameError::NoLegalMoves { seat });
        }

        let choice = self
            .prompt(game, seat, &moves)
            .map_err(|err| GameError::Strategy {
                seat,
                message: format!("console I/O failed: {err}"),
            })?;

        match choice {
            Some(index) => Ok(moves[index]),
            None => Err(GameError::Strategy {
                seat,
                message: "input closed before a move was chosen".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanabi_core::game::NullSink;
    use std::io::Cursor;

    fn started() -> Game {
        let mut game = Game::with_seed(3, 5).unwrap();
        game.start(&mut NullSink).unwrap();
        game
    }

    #[test]
    fn picks_the_numbered_move() {
        let game = started();
        let seat = PlayerId::new(0);
        let mut console = ConsoleStrategy::new(Cursor::new("2\n"), Vec::new());

        let chosen = console.choose_move(&game, seat).unwrap();

        assert_eq!(chosen, game.legal_moves(seat)[1]);
        let shown = String::from_utf8(console.into_output()).unwrap();
        assert!(shown.contains("1: play card 0"));
        assert!(shown.contains("You (player 0): (*,*)"));
    }

    #[test]
    fn reprompts_until_the_choice_is_valid() {
        let game = started();
        let seat = PlayerId::new(1);
        let mut console = ConsoleStrategy::new(Cursor::new("zero\n0\n999\n3\n"), Vec::new());

        let chosen = console.choose_move(&game, seat).unwrap();

        assert_eq!(chosen, game.legal_moves(seat)[2]);
        let shown = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(shown.matches(RETRY).count(), 3);
    }

    #[test]
    fn closed_input_is_a_strategy_error() {
        let game = started();
        let mut console = ConsoleStrategy::new(Cursor::new(""), Vec::new());
        let err = console.choose_move(&game, PlayerId::new(2)).unwrap_err();
        assert!(matches!(err, GameError::Strategy { .. }));
    }
}
