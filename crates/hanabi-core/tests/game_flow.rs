use hanabi_core::GameError;
use hanabi_core::belief::PossibleCards;
use hanabi_core::game::{Game, GameEvent, GameState, Move, NullSink, Strategy};
use hanabi_core::model::board::MAX_SCORE;
use hanabi_core::model::card::Card;
use hanabi_core::model::colour::Colour;
use hanabi_core::model::deck::{DECK_SIZE, Deck};
use hanabi_core::model::player::PlayerId;
use hanabi_core::model::rank::Rank;

/// Plays any card that fits, otherwise discards the first slot. Peeks at its own
/// hand, which only a test strategy may do.
struct CarefulPeeker;

impl Strategy for CarefulPeeker {
    fn choose_move(&mut self, game: &Game, seat: PlayerId) -> Result<Move, GameError> {
        let hand = game.player(seat)?.hand();
        let slot = hand
            .iter()
            .position(|card| game.board().is_playable(*card));
        Ok(match slot {
            Some(slot) => Move::Play { slot },
            None => Move::Discard { slot: 0 },
        })
    }
}

struct Reckless;

impl Strategy for Reckless {
    fn choose_move(&mut self, _game: &Game, _seat: PlayerId) -> Result<Move, GameError> {
        Ok(Move::Play { slot: 0 })
    }
}

fn peekers(count: usize) -> Vec<Box<dyn Strategy>> {
    (0..count)
        .map(|_| Box::new(CarefulPeeker) as Box<dyn Strategy>)
        .collect()
}

#[test]
fn legal_only_game_wins_within_one_lap_of_exhaustion() {
    for seed in [1_u64, 2, 3, 42, 1234] {
        let mut game = Game::with_seed(3, seed).unwrap();
        let mut events = Vec::new();

        let outcome = game.run(&mut peekers(3), &mut events).unwrap();

        assert_eq!(outcome.state, GameState::Won, "seed {seed}");
        assert!(outcome.score <= MAX_SCORE);
        assert_eq!(outcome.fuse_tokens, 3);
        assert_eq!(outcome.points, outcome.score);

        let exhausted_at = events
            .iter()
            .position(|event| matches!(event, GameEvent::LastRoundStarted { .. }));
        if let Some(index) = exhausted_at {
            let turns_after = events[index..]
                .iter()
                .filter(|event| matches!(event, GameEvent::TurnStarted { .. }))
                .count();
            assert!(turns_after <= 3, "seed {seed}: {turns_after} turns after exhaustion");
        } else {
            assert!(outcome.perfect);
        }
    }
}

#[test]
fn rank_ordered_deck_completes_every_pile() {
    // One of each card in rank order, then the spare copies.
    let mut order = Vec::new();
    for copy in 0..2 {
        for rank in Rank::ORDERED {
            for colour in Colour::ALL {
                if copy < rank.copies() {
                    order.push(Card::new(rank, colour));
                }
            }
        }
    }
    assert_eq!(order.len(), DECK_SIZE);
    let mut game = Game::with_deck(3, Deck::from_draw_order(order)).unwrap();
    let mut events = Vec::new();

    let outcome = game.run(&mut peekers(3), &mut events).unwrap();

    assert_eq!(outcome.state, GameState::Won);
    assert_eq!(outcome.score, MAX_SCORE);
    assert_eq!(outcome.points, MAX_SCORE);
    assert!(outcome.perfect);
    assert_eq!(outcome.turns, 25);
    assert_eq!(outcome.fuse_tokens, 3);
    assert_eq!(outcome.piles, [5; 5]);
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, GameEvent::LastRoundStarted { .. }))
    );
    assert_eq!(
        events.last(),
        Some(&GameEvent::Finished {
            state: GameState::Won,
            score: MAX_SCORE,
            points: MAX_SCORE,
        })
    );
}

#[test]
fn three_illegal_plays_lose_on_the_third() {
    let order = std::iter::once(Card::new(Rank::Four, Colour::Yellow))
        .chain(
            Deck::composition()
                .into_iter()
                .filter(|card| card.rank != Rank::One),
        )
        .collect();
    let mut game = Game::with_deck(3, Deck::from_draw_order(order)).unwrap();
    let mut strategies: Vec<Box<dyn Strategy>> =
        vec![Box::new(Reckless), Box::new(Reckless), Box::new(Reckless)];
    let mut events = Vec::new();

    let outcome = game.run(&mut strategies, &mut events).unwrap();

    assert_eq!(outcome.state, GameState::Lost);
    assert_eq!(outcome.turns, 3);
    assert_eq!(outcome.points, 0);
    let fuses: Vec<u8> = events
        .iter()
        .filter_map(|event| match event {
            GameEvent::FuseLit { fuses_left } => Some(*fuses_left),
            _ => None,
        })
        .collect();
    assert_eq!(fuses, vec![2, 1, 0]);
    assert_eq!(
        events.last(),
        Some(&GameEvent::Finished {
            state: GameState::Lost,
            score: 0,
            points: 0,
        })
    );
}

#[test]
fn fresh_hand_enumerates_ten_slot_moves_and_hints_for_everyone() {
    for players in 3..=5 {
        let mut game = Game::with_seed(players, 77).unwrap();
        game.start(&mut NullSink).unwrap();
        let seat = PlayerId::new(0);
        let moves = game.legal_moves(seat);

        let slot_moves = moves
            .iter()
            .filter(|mv| matches!(mv, Move::Play { .. } | Move::Discard { .. }))
            .count();
        assert_eq!(slot_moves, 10);
        for target in game.other_players(seat) {
            assert!(
                moves
                    .iter()
                    .any(|mv| matches!(mv, Move::Hint { target: t, .. } if *t == target))
            );
        }
    }
}

#[test]
fn possible_card_probabilities_sum_to_one_through_a_game() {
    let mut game = Game::with_seed(4, 9).unwrap();
    game.start(&mut NullSink).unwrap();
    let mut strategy = CarefulPeeker;

    for _ in 0..20 {
        for seat in PlayerId::all(game.player_count()) {
            let held = game.player(seat).unwrap().len();
            for slot in 0..held {
                let possible = PossibleCards::from_state(&game, seat, slot).unwrap();
                assert!(!possible.is_empty());
                let total: f64 = possible
                    .distinct()
                    .map(|(card, _)| possible.probability(card))
                    .sum();
                assert!((total - 1.0).abs() < 1e-9);
            }
        }
        if game.play_turn(&mut strategy, &mut NullSink).unwrap().is_halt() {
            break;
        }
    }
}

#[test]
fn card_count_is_conserved_to_the_end() {
    let mut game = Game::with_seed(5, 314).unwrap();
    game.run(&mut peekers(5), &mut NullSink).unwrap();
    let in_hands: usize = game.players().iter().map(|kb| kb.len()).sum();
    let total = game.deck().len()
        + game.deck().discarded().len()
        + game.board().played().len()
        + in_hands;
    assert_eq!(total, DECK_SIZE);
    assert!(game.state().is_terminal());
    assert!(game.outcome().is_some());
}
