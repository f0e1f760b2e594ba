/// Frame loop and round lifecycle.
///
/// `Game` owns everything the loop mutates.  The host feeds it input events
/// between frames and calls `frame` once per tick while the round is running;
/// once `frame` reports `GameStatus::Over` the host stops ticking until a
/// restart.

use rand::Rng;
use tracing::info;

use crate::compute::{init_state, player_shoot, tick, RuleOptions};
use crate::display::{render, Surface};
use crate::entities::{GameState, GameStatus};
use crate::error::Result;
use crate::input::{Action, InputEvent, KeyState};

pub struct Game<R: Rng> {
    state: GameState,
    keys: KeyState,
    rng: R,
    options: RuleOptions,
}

impl<R: Rng> Game<R> {
    /// Start a round on a `width` × `height` surface.
    pub fn new(options: RuleOptions, width: i32, height: i32, rng: R) -> Self {
        info!(width, height, ?options, "round started");
        Game {
            state: init_state(width, height),
            keys: KeyState::new(),
            rng,
            options,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status.clone()
    }

    /// Record a key event and carry out the action it triggers, if any.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<Action> {
        let action = self.keys.apply(event)?;
        match action {
            Action::Fire => {
                self.state = player_shoot(&self.state);
                Some(action)
            }
            Action::Restart => {
                if self.restart() {
                    Some(action)
                } else {
                    None
                }
            }
        }
    }

    /// Reset ships and shots for a new round.  Only honoured once the
    /// current round is over; returns whether a restart happened.
    pub fn restart(&mut self) -> bool {
        if self.state.status != GameStatus::Over {
            return false;
        }
        self.state = init_state(self.state.width, self.state.height);
        info!("round restarted");
        true
    }

    /// Run one frame: rules, then drawing.  Does nothing once the round is
    /// over.
    pub fn frame<S: Surface>(&mut self, surface: &mut S) -> Result<GameStatus> {
        if self.state.status == GameStatus::Over {
            return Ok(GameStatus::Over);
        }

        self.state = tick(&self.state, &self.keys, &mut self.rng, &self.options);
        render(surface, &self.state)?;

        if let Some(outcome) = self.state.outcome {
            info!(
                ?outcome,
                frame = self.state.frame,
                player_health = self.state.player.health,
                enemy_health = self.state.enemy.health,
                "round over"
            );
        }
        Ok(self.state.status.clone())
    }
}
