use std::io;

use hanabi_bot::{BotDifficulty, BotParams, HeuristicPolicy};
use hanabi_core::game::Strategy;
use thiserror::Error;

use crate::config::{AgentConfig, AgentKind};
use crate::console::ConsoleStrategy;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid heuristic parameter for agent '{name}': {message}")]
    InvalidHeuristicParam { name: String, message: String },
    #[error("agent '{name}' of kind {kind:?} takes no parameters")]
    UnexpectedParams { name: String, kind: AgentKind },
}

/// Recipe for a seat occupant; a fresh strategy is spawned for every game.
#[derive(Debug, Clone)]
pub struct AgentBlueprint {
    pub name: String,
    implementation: AgentImplementation,
}

#[derive(Debug, Clone)]
enum AgentImplementation {
    Heuristic(HeuristicOptions),
    Console,
}

impl AgentBlueprint {
    pub fn from_configs<'a, I>(configs: I) -> Result<Vec<Self>, AgentError>
    where
        I: IntoIterator<Item = &'a AgentConfig>,
    {
        configs.into_iter().map(Self::from_config).collect()
    }

    pub fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        let implementation = match config.kind {
            AgentKind::Heuristic => {
                let options = HeuristicOptions::from_params(&config.name, &config.params)?;
                AgentImplementation::Heuristic(options)
            }
            AgentKind::Console => {
                let empty = config.params.is_null()
                    || config.params.as_mapping().is_some_and(|map| map.is_empty());
                if !empty {
                    return Err(AgentError::UnexpectedParams {
                        name: config.name.clone(),
                        kind: config.kind,
                    });
                }
                AgentImplementation::Console
            }
        };

        Ok(Self {
            name: config.name.clone(),
            implementation,
        })
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self.implementation, AgentImplementation::Console)
    }

    pub fn spawn_strategy(&self) -> Box<dyn Strategy> {
        match &self.implementation {
            AgentImplementation::Heuristic(opts) => {
                Box::new(HeuristicPolicy::new(opts.difficulty).with_params(opts.params))
            }
            AgentImplementation::Console => {
                Box::new(ConsoleStrategy::new(io::stdin().lock(), io::stdout()))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct HeuristicOptions {
    difficulty: BotDifficulty,
    params: BotParams,
}

impl HeuristicOptions {
    fn from_params(name: &str, params: &serde_yaml::Value) -> Result<Self, AgentError> {
        let mut options = Self {
            difficulty: BotDifficulty::Normal,
            params: BotParams::default(),
        };

        if params.is_null() {
            return Ok(options);
        }

        let mapping = params
            .as_mapping()
            .ok_or_else(|| AgentError::InvalidHeuristicParam {
                name: name.to_string(),
                message: "expected mapping for heuristic params".to_string(),
            })?;

        for (key, value) in mapping {
            match key.as_str() {
                Some("difficulty") => {
                    let text = value
                        .as_str()
                        .ok_or_else(|| AgentError::InvalidHeuristicParam {
                            name: name.to_string(),
                            message: "difficulty must be a string".to_string(),
                        })?;
                    options.difficulty = BotDifficulty::parse(text).ok_or_else(|| {
                        AgentError::InvalidHeuristicParam {
                            name: name.to_string(),
                            message: format!("unknown difficulty '{text}'"),
                        }
                    })?;
                }
                Some("discard_at_cap_weight") => {
                    let weight = value
                        .as_f64()
                        .filter(|weight| weight.is_finite())
                        .ok_or_else(|| AgentError::InvalidHeuristicParam {
                            name: name.to_string(),
                            message: "discard_at_cap_weight must be a finite number".to_string(),
                        })?;
                    options.params = options.params.with_discard_at_cap_weight(weight);
                }
                other => {
                    return Err(AgentError::InvalidHeuristicParam {
                        name: name.to_string(),
                        message: format!("unknown parameter {other:?}"),
                    });
                }
            }
        }

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(kind: AgentKind, params: &str) -> AgentConfig {
        AgentConfig {
            name: "seat".to_string(),
            kind,
            params: serde_yaml::from_str(params).unwrap(),
        }
    }

    #[test]
    fn heuristic_params_are_parsed() {
        let blueprint = AgentBlueprint::from_config(&agent(
            AgentKind::Heuristic,
            "{difficulty: easy, discard_at_cap_weight: 0.5}",
        ))
        .unwrap();
        match blueprint.implementation {
            AgentImplementation::Heuristic(opts) => {
                assert_eq!(opts.difficulty, BotDifficulty::Easy);
                assert_eq!(opts.params.discard_at_cap_weight, 0.5);
            }
            AgentImplementation::Console => panic!("expected heuristic"),
        }
        assert!(!blueprint.is_interactive());
    }

    #[test]
    fn missing_params_mean_normal_difficulty() {
        let blueprint = AgentBlueprint::from_config(&agent(AgentKind::Heuristic, "~")).unwrap();
        assert!(matches!(
            blueprint.implementation,
            AgentImplementation::Heuristic(HeuristicOptions {
                difficulty: BotDifficulty::Normal,
                ..
            })
        ));
    }

    #[test]
    fn rejects_unknown_difficulty_and_keys() {
        let err = AgentBlueprint::from_config(&agent(AgentKind::Heuristic, "{difficulty: hard}"))
            .unwrap_err();
        assert!(err.to_string().contains("unknown difficulty 'hard'"));

        let err = AgentBlueprint::from_config(&agent(AgentKind::Heuristic, "{depth: 3}"))
            .unwrap_err();
        assert!(matches!(err, AgentError::InvalidHeuristicParam { .. }));
    }

    #[test]
    fn console_agents_take_no_params() {
        let blueprint = AgentBlueprint::from_config(&agent(AgentKind::Console, "{}")).unwrap();
        assert!(blueprint.is_interactive());
        assert!(AgentBlueprint::from_config(&agent(AgentKind::Console, "{speed: 1}")).is_err());
    }
}
