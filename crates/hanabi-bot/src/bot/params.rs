/// Tunable weights for move scoring.
///
/// Defaults reproduce the plain heuristic; the fields exist so batch runs can
/// sweep them without touching the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotParams {
    /// Multiplier on a discard's value while hint tokens are capped (default: 0.0)
    pub discard_at_cap_weight: f64,

    /// Score given to a hint aimed at the acting player (default: -10.0)
    pub self_hint_penalty: f64,

    /// Value of discarding a card its pile has already passed (default: 1.0)
    pub discard_dead_bonus: f64,

    /// Value of discarding the last outstanding copy of a needed card (default: -1.0)
    pub discard_last_copy_penalty: f64,

    /// Value of discarding the only five of a colour (default: -2.0)
    pub discard_five_penalty: f64,
}

impl Default for BotParams {
    fn default() -> Self {
        Self {
            discard_at_cap_weight: 0.0,
            self_hint_penalty: -10.0,
            discard_dead_bonus: 1.0,
            discard_last_copy_penalty: -1.0,
            discard_five_penalty: -2.0,
        }
    }
}

impl BotParams {
    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub fn with_discard_at_cap_weight(mut self, weight: f64) -> Self {
        if weight.is_finite() {
            self.discard_at_cap_weight = weight;
        }
        self
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let discard_at_cap_weight = read("HANABI_DISCARD_AT_CAP_WEIGHT")
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .unwrap_or(0.0);

        Self {
            discard_at_cap_weight,
            ..Self::default()
        }
    }
}
