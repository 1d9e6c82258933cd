//! Knock Out! game implementation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::core::{
    Die, GameConfig, GameError, KnockOutNumber, Player, PlayerId, RandomSource, Result,
    RollOutcome, UniformSource,
};
use crate::events::{GameEvent, GameObserver, ObserverRegistry};
use crate::rules::{DiceGame, GameOutcome};

/// Most players a game can seat (one per `PlayerId`).
pub const MAX_PLAYERS: usize = 256;

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Set up but not started.
    #[default]
    NotStarted,
    /// Turns are being played.
    InProgress,
    /// Terminal: no more turns.
    Finished,
}

/// What happened during one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Turn number, starting at 1.
    pub turn: u32,
    /// Who rolled.
    pub player: PlayerId,
    /// Face of each die.
    pub dice: [u32; 2],
    /// Sum of both dice.
    pub total: u32,
    /// Effect of the roll on the player.
    pub outcome: RollOutcome,
    /// The player's score after the turn.
    pub score: u32,
}

/// A game of Knock Out!.
pub struct KnockOutGame {
    config: GameConfig,
    players: Vec<Player>,
    dice: [Die; 2],
    phase: GamePhase,
    /// Index of the first player to consider for the next turn.
    cursor: usize,
    turn_number: u32,
    history: Vec<TurnReport>,
    outcome: Option<GameOutcome>,
    observers: ObserverRegistry,
}

/// Builder for creating a KnockOutGame.
///
/// Players are validated in [`KnockOutGameBuilder::build`], so a bad
/// knock-out number means no game is created at all.
#[derive(Default)]
pub struct KnockOutGameBuilder {
    config: GameConfig,
    players: Vec<(Option<String>, u8)>,
    source: Option<Arc<dyn RandomSource>>,
}

impl KnockOutGameBuilder {
    /// Create a builder with the default configuration and no players.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player with the given knock-out number.
    #[must_use]
    pub fn player(mut self, knock_out_number: u8) -> Self {
        self.players.push((None, knock_out_number));
        self
    }

    /// Add a named player.
    #[must_use]
    pub fn named_player(mut self, name: impl Into<String>, knock_out_number: u8) -> Self {
        self.players.push((Some(name.into()), knock_out_number));
        self
    }

    /// Add several players at once, in turn order.
    #[must_use]
    pub fn players(mut self, knock_out_numbers: impl IntoIterator<Item = u8>) -> Self {
        self.players
            .extend(knock_out_numbers.into_iter().map(|n| (None, n)));
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the number of sides on both dice.
    #[must_use]
    pub fn die_sides(mut self, sides: u32) -> Self {
        self.config.die_sides = sides;
        self
    }

    /// Set the score that ends the game.
    #[must_use]
    pub fn target_score(mut self, score: u32) -> Self {
        self.config.target_score = score;
        self
    }

    /// Seed for the default source. Has no effect with [`Self::source`].
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Inject the random source both dice draw from.
    #[must_use]
    pub fn source(mut self, source: Arc<dyn RandomSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Build the game.
    ///
    /// Fails with the first configuration, rule or setup error found.
    pub fn build(self) -> Result<KnockOutGame> {
        self.config.validate()?;

        if self.players.len() > MAX_PLAYERS {
            return Err(GameError::Setup(format!(
                "at most {MAX_PLAYERS} players supported, got {}",
                self.players.len()
            )));
        }

        let players = self
            .players
            .into_iter()
            .zip(PlayerId::all(MAX_PLAYERS))
            .map(|((name, n), id)| -> Result<Player> {
                let player = Player::with_number(id, KnockOutNumber::new(n)?);
                Ok(match name {
                    Some(name) => player.named(name),
                    None => player,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let source: Arc<dyn RandomSource> = match self.source {
            Some(source) => source,
            None => Arc::new(UniformSource::new(self.config.seed, self.config.source_range)?),
        };
        let dice = [
            Die::new(self.config.die_sides, Arc::clone(&source))?,
            Die::new(self.config.die_sides, source)?,
        ];

        debug!(players = players.len(), sides = self.config.die_sides, "Built game");

        Ok(KnockOutGame {
            config: self.config,
            players,
            dice,
            phase: GamePhase::NotStarted,
            cursor: 0,
            turn_number: 0,
            history: Vec::new(),
            outcome: None,
            observers: ObserverRegistry::new(),
        })
    }
}

impl KnockOutGame {
    /// Start building a game.
    #[must_use]
    pub fn builder() -> KnockOutGameBuilder {
        KnockOutGameBuilder::new()
    }

    /// Register an observer. Events reach observers in registration order.
    pub fn register_observer(&mut self, observer: impl GameObserver + 'static) {
        self.observers.register(observer);
    }

    /// Number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Players in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Players still in the game.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.is_knocked_out())
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Turns played so far.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Every turn played, oldest first.
    #[must_use]
    pub fn history(&self) -> &[TurnReport] {
        &self.history
    }

    /// The player who would roll next, if the game is in progress.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        if self.phase != GamePhase::InProgress {
            return None;
        }
        self.next_active_index().map(|i| self.players[i].id())
    }

    /// Next player in turn order from the cursor, skipping knocked-out ones.
    fn next_active_index(&self) -> Option<usize> {
        let n = self.players.len();
        (0..n)
            .map(|k| (self.cursor + k) % n)
            .find(|&i| !self.players[i].is_knocked_out())
    }

    /// Decide whether the turn just played ended the game.
    fn check_finished(&self, acting: usize) -> Option<GameOutcome> {
        if self.active_players().next().is_none() {
            return Some(GameOutcome::NoWinner);
        }
        let actor = &self.players[acting];
        if !actor.is_knocked_out() && actor.score() >= self.config.target_score {
            return Some(leaders(&self.players));
        }
        None
    }
}

/// All remaining players tied at the highest score.
fn leaders(players: &[Player]) -> GameOutcome {
    let best = players
        .iter()
        .filter(|p| !p.is_knocked_out())
        .map(Player::score)
        .max();

    match best {
        None => GameOutcome::NoWinner,
        Some(best) => GameOutcome::Winners(
            players
                .iter()
                .filter(|p| !p.is_knocked_out() && p.score() == best)
                .map(Player::id)
                .collect(),
        ),
    }
}

impl DiceGame for KnockOutGame {
    type Turn = TurnReport;

    fn dice(&self) -> &[Die] {
        &self.dice
    }

    fn start(&mut self) -> Result<()> {
        match self.phase {
            GamePhase::NotStarted => {}
            GamePhase::InProgress => {
                return Err(GameError::Setup("game already started".into()));
            }
            GamePhase::Finished => return Err(GameError::GameOver),
        }
        if self.players.is_empty() {
            return Err(GameError::Setup("at least one player is required".into()));
        }

        self.phase = GamePhase::InProgress;
        info!(
            players = self.players.len(),
            target = self.config.target_score,
            "Game started"
        );

        self.observers.dispatch(&GameEvent::GameStarted {
            players: self.players.clone(),
        })
    }

    fn is_started(&self) -> bool {
        self.phase != GamePhase::NotStarted
    }

    #[instrument(level = "debug", skip(self), fields(turn = self.turn_number + 1))]
    fn play_turn(&mut self) -> Result<TurnReport> {
        match self.phase {
            GamePhase::NotStarted => {
                return Err(GameError::Setup("game has not been started".into()));
            }
            GamePhase::Finished => return Err(GameError::GameOver),
            GamePhase::InProgress => {}
        }

        // InProgress always has someone left to roll
        let index = self.next_active_index().ok_or(GameError::GameOver)?;
        let faces = [self.dice[0].roll(), self.dice[1].roll()];
        let total = faces[0].checked_add(faces[1]).ok_or_else(|| {
            GameError::Configuration("dice total exceeds u32".into())
        })?;

        self.cursor = (index + 1) % self.players.len();
        self.turn_number += 1;

        let player = &mut self.players[index];
        let outcome = player.record_roll(total);
        let report = TurnReport {
            turn: self.turn_number,
            player: player.id(),
            dice: faces,
            total,
            outcome,
            score: player.score(),
        };
        debug!(
            player = %report.player,
            dice = ?faces,
            total,
            score = report.score,
            "Rolled"
        );
        self.history.push(report.clone());

        let finished = self.check_finished(index);
        if let Some(result) = &finished {
            self.phase = GamePhase::Finished;
            self.outcome = Some(result.clone());
            info!(turns = self.turn_number, outcome = %result, "Game over");
        }

        self.observers.dispatch(&GameEvent::TurnEnded {
            player: report.player,
            roll: total,
            new_score: report.score,
        })?;
        if outcome == RollOutcome::KnockedOut {
            info!(player = %report.player, total, "Player knocked out");
            self.observers.dispatch(&GameEvent::PlayerKnockedOut {
                player: report.player,
            })?;
        }
        if let Some(result) = finished {
            self.observers
                .dispatch(&GameEvent::GameEnded { outcome: result })?;
        }

        Ok(report)
    }

    fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }
}

impl std::fmt::Debug for KnockOutGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnockOutGame")
            .field("phase", &self.phase)
            .field("turn_number", &self.turn_number)
            .field("players", &self.players)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}
