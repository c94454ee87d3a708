use std::fmt::Write as _;

use hanabi_core::game::{Game, GameEvent, GameState};
use hanabi_core::model::board::Board;
use hanabi_core::model::colour::Colour;
use hanabi_core::model::player::PlayerId;

/// One line of table talk for an event.
pub fn narrate(event: &GameEvent) -> String {
    match event {
        GameEvent::Dealt { player, cards } => format!("{player} was dealt {cards} cards"),
        GameEvent::TurnStarted { turn, player } => format!("Turn {turn}: {player} to act"),
        GameEvent::MoveChosen { player, chosen } => format!("{player} chose to {chosen}"),
        GameEvent::CardPlayed {
            player,
            card,
            success: true,
        } => format!("{player} played {card}"),
        GameEvent::CardPlayed {
            player,
            card,
            success: false,
        } => format!("{player} misplayed {card}"),
        GameEvent::FuseLit { fuses_left: 0 } => "KABOOM!!! The last fuse burned out".to_string(),
        GameEvent::FuseLit { fuses_left } => {
            format!("The fuse is getting shorter: {fuses_left} left")
        }
        GameEvent::CardDiscarded {
            player,
            card,
            hint_tokens,
        } => format!("{player} discarded {card} ({hint_tokens} hint tokens)"),
        GameEvent::CardDrawn { player, deck_left } => {
            format!("{player} drew a card, {deck_left} left in the deck")
        }
        GameEvent::HintGiven {
            from,
            to,
            hint,
            slots,
        } => {
            let slots = slots
                .iter()
                .map(|slot| slot.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{from} told {to} about their {hint} (slots {slots})")
        }
        GameEvent::LastRoundStarted { turns_left } => {
            format!("The deck is empty. Last round: {turns_left} turns left")
        }
        GameEvent::Finished {
            state: GameState::Won,
            score,
            ..
        } => format!("Game over: won with {score} points"),
        GameEvent::Finished { state, score, .. } => {
            format!("Game over: {state} with {score} on the board, 0 points")
        }
    }
}

/// Fireworks line, e.g. `R2 B0 G1 Y0 W0 (score 3)`.
pub fn render_board(board: &Board) -> String {
    let piles = Colour::ALL
        .iter()
        .map(|colour| format!("{colour}{}", board.pile(*colour)))
        .collect::<Vec<_>>()
        .join(" ");
    format!("{piles} (score {})", board.score())
}

/// The table as `viewer` sees it: its own hand censored, everyone else's in full.
pub fn render_table(game: &Game, viewer: Option<PlayerId>) -> String {
    let board = game.board();
    let tokens = board.tokens();
    let mut out = String::new();

    let _ = writeln!(out, "Fireworks: {}", render_board(board));
    let _ = writeln!(
        out,
        "Hint tokens: {}  Fuses: {}  Deck: {}",
        tokens.hint_tokens(),
        tokens.fuse_tokens(),
        game.deck().len()
    );
    let _ = writeln!(
        out,
        "Last round: {}",
        match game.turns_left() {
            Some(left) => format!("yes, {left} turns left"),
            None => "no".to_string(),
        }
    );

    let discards = game.deck().discarded();
    if !discards.is_empty() {
        let listed = discards
            .iter()
            .map(|card| card.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "Discards: {listed}");
    }

    for (index, holder) in game.players().iter().enumerate() {
        let seat = PlayerId::from_index(index);
        if seat.is_some() && seat == viewer {
            let _ = writeln!(out, "You (player {index}): {}", holder.describe());
        } else {
            let cards = holder
                .hand()
                .iter()
                .map(|card| card.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            let _ = writeln!(out, "Player {index}: {cards}");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanabi_core::game::{Move, NullSink};
    use hanabi_core::model::card::Card;
    use hanabi_core::model::deck::Deck;
    use hanabi_core::model::hint::Hint;
    use hanabi_core::model::rank::Rank;

    fn stacked() -> Game {
        let mut game = Game::with_deck(3, Deck::from_draw_order(Deck::composition())).unwrap();
        game.start(&mut NullSink).unwrap();
        game
    }

    #[test]
    fn viewer_sees_own_hand_censored() {
        let mut game = stacked();
        let flow = game.apply(
            PlayerId::new(1),
            Move::Hint {
                target: PlayerId::new(0),
                hint: Hint::Rank(Rank::One),
            },
            &mut NullSink,
        )
        .unwrap();
        assert!(!flow.is_halt());

        let table = render_table(&game, Some(PlayerId::new(0)));
        assert!(table.contains("You (player 0): (1,*), (1,*), (*,*), (*,*), (*,*)"));
        assert!(table.contains("Player 1: "));
        assert!(table.contains("Hint tokens: 7"));
        assert!(table.contains("Last round: no"));
    }

    #[test]
    fn spectator_sees_every_hand() {
        let game = stacked();
        let table = render_table(&game, None);
        assert!(!table.contains("You"));
        assert_eq!(table.matches("Player ").count(), 3);
    }

    #[test]
    fn board_line_lists_piles_in_colour_order() {
        let game = stacked();
        assert_eq!(render_board(game.board()), "R0 B0 G0 Y0 W0 (score 0)");
    }

    #[test]
    fn narration_distinguishes_success_and_misfire() {
        let card = Card::new(Rank::Two, Colour::Blue);
        let played = narrate(&GameEvent::CardPlayed {
            player: PlayerId::new(1),
            card,
            success: true,
        });
        let misplayed = narrate(&GameEvent::CardPlayed {
            player: PlayerId::new(1),
            card,
            success: false,
        });
        assert_eq!(played, "player 1 played 2B");
        assert_eq!(misplayed, "player 1 misplayed 2B");
        assert!(narrate(&GameEvent::FuseLit { fuses_left: 0 }).contains("KABOOM"));
    }
}
