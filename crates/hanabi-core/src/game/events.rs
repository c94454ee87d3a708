//! Narration channel for everything that happens at the table.
//!
//! The state machine never prints. It emits [`GameEvent`]s into whatever
//! [`EventSink`] the caller passes in; renderers and loggers live elsewhere.

use crate::game::moves::Move;
use crate::game::state::GameState;
use crate::model::card::Card;
use crate::model::hint::Hint;
use crate::model::player::PlayerId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    Dealt {
        player: PlayerId,
        cards: usize,
    },
    TurnStarted {
        turn: u32,
        player: PlayerId,
    },
    MoveChosen {
        player: PlayerId,
        #[serde(rename = "move")]
        chosen: Move,
    },
    CardPlayed {
        player: PlayerId,
        card: Card,
        success: bool,
    },
    FuseLit {
        fuses_left: u8,
    },
    CardDiscarded {
        player: PlayerId,
        card: Card,
        hint_tokens: u8,
    },
    CardDrawn {
        player: PlayerId,
        deck_left: usize,
    },
    HintGiven {
        from: PlayerId,
        to: PlayerId,
        hint: Hint,
        slots: Vec<usize>,
    },
    LastRoundStarted {
        turns_left: usize,
    },
    Finished {
        state: GameState,
        score: u8,
        points: u8,
    },
}

pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}

#[cfg(test)]
mod tests {
    use super::{EventSink, GameEvent};
    use crate::model::player::PlayerId;

    #[test]
    fn vec_sink_collects_in_order() {
        let mut events: Vec<GameEvent> = Vec::new();
        events.emit(GameEvent::FuseLit { fuses_left: 2 });
        events.emit(GameEvent::CardDrawn {
            player: PlayerId::new(0),
            deck_left: 10,
        });
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], GameEvent::FuseLit { fuses_left: 2 });
    }

    #[test]
    fn events_serialize_with_tag() {
        let json = serde_json::to_value(GameEvent::LastRoundStarted { turns_left: 3 }).unwrap();
        assert_eq!(json["event"], "last_round_started");
        assert_eq!(json["turns_left"], 3);
    }
}
