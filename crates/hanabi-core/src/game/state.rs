use crate::error::GameError;
use crate::flow::{Flow, Terminal};
use crate::game::events::{EventSink, GameEvent};
use crate::game::legal;
use crate::game::moves::Move;
use crate::game::strategy::Strategy;
use crate::model::board::{Board, MAX_SCORE, PlayOutcome};
use crate::model::deck::Deck;
use crate::model::hint::Hint;
use crate::model::knowledge::KnowledgeBase;
use crate::model::player::PlayerId;
use crate::model::tokens::Tokens;
use core::fmt;
use serde::{Deserialize, Serialize};

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 5;
pub const HAND_SIZE: usize = 5;

/// Linear lifecycle: `Starting -> Playing -> Won | Lost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    Starting,
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameState::Won | GameState::Lost)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            GameState::Starting => "starting",
            GameState::Playing => "playing",
            GameState::Won => "won",
            GameState::Lost => "lost",
        }
    }

    const fn can_become(self, next: GameState) -> bool {
        matches!(
            (self, next),
            (GameState::Starting, GameState::Playing)
                | (GameState::Playing, GameState::Won)
                | (GameState::Playing, GameState::Lost)
        )
    }
}

impl From<Terminal> for GameState {
    fn from(terminal: Terminal) -> Self {
        match terminal {
            Terminal::Won => GameState::Won,
            Terminal::Lost => GameState::Lost,
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final tally of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    pub state: GameState,
    /// Pile total for a win, zero for a loss.
    pub points: u8,
    pub score: u8,
    pub piles: [u8; 5],
    pub turns: u32,
    pub hint_tokens: u8,
    pub fuse_tokens: u8,
    pub perfect: bool,
}

/// The table: board, deck, every player's hand and knowledge, and turn order.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    board: Board,
    deck: Deck,
    players: Vec<KnowledgeBase>,
    current: PlayerId,
    turns: u32,
    last_round: Option<usize>,
    seed: Option<u64>,
}

impl Game {
    pub fn new(players: usize) -> Result<Self, GameError> {
        let seed: u64 = rand::random();
        Self::with_seed(players, seed)
    }

    pub fn with_seed(players: usize, seed: u64) -> Result<Self, GameError> {
        let mut game = Self::with_deck(players, Deck::shuffled_with_seed(seed))?;
        game.seed = Some(seed);
        Ok(game)
    }

    pub fn with_deck(players: usize, deck: Deck) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
            return Err(GameError::PlayerCount {
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
                found: players,
            });
        }
        Ok(Self {
            state: GameState::Starting,
            board: Board::new(),
            deck,
            players: (0..players).map(|_| KnowledgeBase::new()).collect(),
            current: PlayerId::new(0),
            turns: 0,
            last_round: None,
            seed: None,
        })
    }

    /// Replaces the token pool; intended for setting up positions before `start`.
    pub fn with_tokens(mut self, tokens: Tokens) -> Self {
        self.board = Board::with_tokens(tokens);
        self
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn player(&self, seat: PlayerId) -> Result<&KnowledgeBase, GameError> {
        self.players
            .get(seat.index())
            .ok_or(GameError::PlayerOutOfRange {
                seat,
                players: self.players.len(),
            })
    }

    pub fn players(&self) -> &[KnowledgeBase] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Every seat except `seat`, in turn order from seat zero.
    pub fn other_players(&self, seat: PlayerId) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.players.len()).filter(move |other| *other != seat)
    }

    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn is_last_round(&self) -> bool {
        self.last_round.is_some()
    }

    /// Turns left once the draw pile has run out.
    pub fn turns_left(&self) -> Option<usize> {
        self.last_round
    }

    pub fn score(&self) -> u8 {
        self.board.score()
    }

    pub fn points(&self) -> u8 {
        match self.state {
            GameState::Won => self.board.score(),
            _ => 0,
        }
    }

    pub fn legal_moves(&self, seat: PlayerId) -> Vec<Move> {
        legal::legal_moves(self, seat)
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        if !self.state.is_terminal() {
            return None;
        }
        let tokens = self.board.tokens();
        Some(GameOutcome {
            state: self.state,
            points: self.points(),
            score: self.board.score(),
            piles: *self.board.piles(),
            turns: self.turns,
            hint_tokens: tokens.hint_tokens(),
            fuse_tokens: tokens.fuse_tokens(),
            perfect: self.board.score() == MAX_SCORE,
        })
    }

    /// Deals a full hand to every seat and opens play.
    pub fn start(&mut self, sink: &mut dyn EventSink) -> Result<(), GameError> {
        self.transition(GameState::Playing)?;
        for seat in PlayerId::all(self.players.len()) {
            let cards = self.players[seat.index()].draw(&mut self.deck, HAND_SIZE)?;
            sink.emit(GameEvent::Dealt {
                player: seat,
                cards,
            });
        }
        Ok(())
    }

    /// Applies one move for `seat`.
    ///
    /// The move is validated before anything changes. A halting move also
    /// finishes the game, so the returned flow always matches [`Game::state`].
    pub fn apply(
        &mut self,
        seat: PlayerId,
        chosen: Move,
        sink: &mut dyn EventSink,
    ) -> Result<Flow, GameError> {
        if self.state != GameState::Playing {
            return Err(GameError::NotPlaying { state: self.state });
        }
        self.player(seat)?;

        let flow = match chosen {
            Move::Play { slot } => self.play(seat, slot, sink)?,
            Move::Discard { slot } => self.discard(seat, slot, sink)?,
            Move::Hint { target, hint } => self.hint(seat, target, hint, sink)?,
        };

        if let Flow::Halt(terminal) = flow {
            self.finish(terminal, sink)?;
        }
        Ok(flow)
    }

    /// Lets the current player's strategy act, then advances the last-round
    /// countdown and the turn order.
    pub fn play_turn(
        &mut self,
        strategy: &mut dyn Strategy,
        sink: &mut dyn EventSink,
    ) -> Result<Flow, GameError> {
        if self.state != GameState::Playing {
            return Err(GameError::NotPlaying { state: self.state });
        }
        let seat = self.current;
        if self.legal_moves(seat).is_empty() {
            return Err(GameError::NoLegalMoves { seat });
        }

        sink.emit(GameEvent::TurnStarted {
            turn: self.turns + 1,
            player: seat,
        });
        let chosen = strategy.choose_move(self, seat)?;
        sink.emit(GameEvent::MoveChosen {
            player: seat,
            chosen,
        });

        let flow = self.apply(seat, chosen, sink)?;
        self.turns += 1;
        if flow.is_halt() {
            return Ok(flow);
        }

        let flow = self.tick_last_round(sink);
        if let Flow::Halt(terminal) = flow {
            self.finish(terminal, sink)?;
        }
        self.current = seat.next(self.players.len());
        Ok(flow)
    }

    /// Plays a whole game with one strategy per seat, in seat order.
    pub fn run(
        &mut self,
        strategies: &mut [Box<dyn Strategy>],
        sink: &mut dyn EventSink,
    ) -> Result<GameOutcome, GameError> {
        if strategies.len() != self.players.len() {
            return Err(GameError::StrategyCount {
                players: self.players.len(),
                found: strategies.len(),
            });
        }

        self.start(sink)?;
        loop {
            let strategy = strategies[self.current.index()].as_mut();
            if self.play_turn(strategy, sink)?.is_halt() {
                break;
            }
        }

        let outcome = self
            .outcome()
            .ok_or(GameError::InvalidFinalState(self.state))?;
        for strategy in strategies.iter_mut() {
            strategy.observe_outcome(&outcome);
        }
        Ok(outcome)
    }

    fn play(
        &mut self,
        seat: PlayerId,
        slot: usize,
        sink: &mut dyn EventSink,
    ) -> Result<Flow, GameError> {
        let card = self.players[seat.index()].remove(slot)?;
        let report = self.board.play(card);
        sink.emit(GameEvent::CardPlayed {
            player: seat,
            card,
            success: matches!(report.outcome, PlayOutcome::Placed { .. }),
        });
        if let PlayOutcome::Misfired { fuses_left } = report.outcome {
            sink.emit(GameEvent::FuseLit { fuses_left });
        }
        if report.flow.is_halt() {
            return Ok(report.flow);
        }

        self.refill(seat, sink)?;
        Ok(Flow::Continue)
    }

    fn discard(
        &mut self,
        seat: PlayerId,
        slot: usize,
        sink: &mut dyn EventSink,
    ) -> Result<Flow, GameError> {
        let card = self.players[seat.index()].remove(slot)?;
        self.deck.discard(card);
        self.board.tokens_mut().reclaim_hint_token();
        sink.emit(GameEvent::CardDiscarded {
            player: seat,
            card,
            hint_tokens: self.board.tokens().hint_tokens(),
        });

        self.refill(seat, sink)?;
        Ok(Flow::Continue)
    }

    fn hint(
        &mut self,
        seat: PlayerId,
        target: PlayerId,
        hint: Hint,
        sink: &mut dyn EventSink,
    ) -> Result<Flow, GameError> {
        if target == seat {
            return Err(GameError::SelfHint { seat });
        }
        let holder = self.player(target)?;
        if self.board.tokens().hint_tokens() == 0 {
            return Err(GameError::NoHintTokens);
        }
        if !holder.hand().iter().any(|card| hint.matches(*card)) {
            return Err(GameError::HintMatchesNothing { target });
        }

        let slots = self.players[target.index()].reveal(hint);
        self.board.tokens_mut().use_hint_token();
        sink.emit(GameEvent::HintGiven {
            from: seat,
            to: target,
            hint,
            slots,
        });
        Ok(Flow::Continue)
    }

    fn refill(&mut self, seat: PlayerId, sink: &mut dyn EventSink) -> Result<(), GameError> {
        let drawn = self.players[seat.index()].draw(&mut self.deck, 1)?;
        if drawn > 0 {
            sink.emit(GameEvent::CardDrawn {
                player: seat,
                deck_left: self.deck.len(),
            });
        }
        Ok(())
    }

    /// The last round opens after the turn that empties the draw pile and
    /// lasts one further turn per player.
    fn tick_last_round(&mut self, sink: &mut dyn EventSink) -> Flow {
        match self.last_round {
            Some(left) => {
                let left = left.saturating_sub(1);
                self.last_round = Some(left);
                if left == 0 {
                    return Flow::Halt(Terminal::Won);
                }
            }
            None if self.deck.is_empty() => {
                let left = self.players.len();
                self.last_round = Some(left);
                sink.emit(GameEvent::LastRoundStarted { turns_left: left });
            }
            None => {}
        }
        Flow::Continue
    }

    fn finish(&mut self, terminal: Terminal, sink: &mut dyn EventSink) -> Result<(), GameError> {
        self.transition(GameState::from(terminal))?;
        sink.emit(GameEvent::Finished {
            state: self.state,
            score: self.board.score(),
            points: self.points(),
        });
        Ok(())
    }

    fn transition(&mut self, next: GameState) -> Result<(), GameError> {
        if !self.state.can_become(next) {
            return Err(GameError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}
