use crate::game::moves::Move;
use crate::game::state::Game;
use crate::model::colour::Colour;
use crate::model::hint::Hint;
use crate::model::player::PlayerId;
use crate::model::rank::Rank;

/// Full action space for `seat` this turn, in a fixed order.
///
/// Play then discard for every held slot; then, only while hint tokens remain,
/// one colour hint per distinct colour and one rank hint per distinct rank held
/// by each other player. An unknown seat has no moves.
pub fn legal_moves(game: &Game, seat: PlayerId) -> Vec<Move> {
    let Ok(own) = game.player(seat) else {
        return Vec::new();
    };

    let mut moves = Vec::with_capacity(2 * own.len() + 10 * game.player_count());
    for slot in 0..own.len() {
        moves.push(Move::Play { slot });
        moves.push(Move::Discard { slot });
    }

    if game.board().tokens().hint_tokens() == 0 {
        return moves;
    }

    for target in game.other_players(seat) {
        let Ok(holder) = game.player(target) else {
            continue;
        };
        let hand = holder.hand();
        for colour in Colour::ALL {
            if hand.iter().any(|card| card.colour == colour) {
                moves.push(Move::Hint {
                    target,
                    hint: Hint::Colour(colour),
                });
            }
        }
        for rank in Rank::ORDERED {
            if hand.iter().any(|card| card.rank == rank) {
                moves.push(Move::Hint {
                    target,
                    hint: Hint::Rank(rank),
                });
            }
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::legal_moves;
    use crate::game::events::NullSink;
    use crate::game::moves::Move;
    use crate::game::state::Game;
    use crate::model::player::PlayerId;
    use crate::model::tokens::Tokens;

    #[test]
    fn fresh_hand_yields_plays_discards_and_hints() {
        let mut game = Game::with_seed(3, 42).unwrap();
        game.start(&mut NullSink).unwrap();
        let moves = legal_moves(&game, PlayerId::new(0));

        let slot_moves = moves
            .iter()
            .filter(|mv| !matches!(mv, Move::Hint { .. }))
            .count();
        assert_eq!(slot_moves, 10);
        assert_eq!(moves[0], Move::Play { slot: 0 });
        assert_eq!(moves[1], Move::Discard { slot: 0 });

        for target in [PlayerId::new(1), PlayerId::new(2)] {
            let hints = moves
                .iter()
                .filter(|mv| matches!(mv, Move::Hint { target: t, .. } if *t == target))
                .count();
            // Five cards always show at least one colour and one rank.
            assert!(hints >= 2);
        }
        assert!(!moves.iter().any(
            |mv| matches!(mv, Move::Hint { target, .. } if *target == PlayerId::new(0))
        ));
    }

    #[test]
    fn no_hints_without_tokens() {
        let mut game = Game::with_seed(4, 42)
            .unwrap()
            .with_tokens(Tokens::with_counts(0, 3));
        game.start(&mut NullSink).unwrap();
        let moves = legal_moves(&game, PlayerId::new(2));
        assert_eq!(moves.len(), 10);
    }

    #[test]
    fn enumeration_is_deterministic() {
        let mut game = Game::with_seed(5, 8).unwrap();
        game.start(&mut NullSink).unwrap();
        assert_eq!(
            legal_moves(&game, PlayerId::new(3)),
            legal_moves(&game.clone(), PlayerId::new(3))
        );
    }

    #[test]
    fn unknown_seat_has_no_moves() {
        let game = Game::with_seed(3, 1).unwrap();
        assert!(legal_moves(&game, PlayerId::new(4)).is_empty());
    }
}
