//! Players and their knock-out numbers.
//!
//! ## PlayerId
//!
//! Type-safe player identifier, 0-based, doubling as the turn-order
//! position.
//!
//! ## Player
//!
//! Running score and elimination status. Once knocked out a player is
//! frozen: further rolls are ignored.

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};

/// Player identifier supporting up to 256 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use knockout_dice::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(256)).map(|i| PlayerId(i as u8))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A knock-out number: one of 6, 7, 8 or 9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct KnockOutNumber(u8);

impl KnockOutNumber {
    /// The numbers a player may choose.
    pub const ALLOWED: [u8; 4] = [6, 7, 8, 9];

    /// Validate a knock-out number.
    ///
    /// Fails with [`GameError::InvalidRule`] outside `{6, 7, 8, 9}`.
    pub fn new(n: u8) -> Result<Self> {
        if Self::ALLOWED.contains(&n) {
            Ok(Self(n))
        } else {
            Err(GameError::InvalidRule(n))
        }
    }

    /// The raw value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Does a two-dice total hit this number?
    #[must_use]
    pub fn matches(self, total: u32) -> bool {
        total == u32::from(self.0)
    }
}

impl TryFrom<u8> for KnockOutNumber {
    type Error = GameError;

    fn try_from(n: u8) -> Result<Self> {
        Self::new(n)
    }
}

impl From<KnockOutNumber> for u8 {
    fn from(n: KnockOutNumber) -> u8 {
        n.0
    }
}

impl std::fmt::Display for KnockOutNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a recorded roll did to a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollOutcome {
    /// The total was added to the score.
    Scored,
    /// The total matched the knock-out number; the score is unchanged.
    KnockedOut,
    /// The player was already out; nothing changed.
    Ignored,
}

/// A player in a Knock Out! game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: Option<String>,
    knock_out_number: KnockOutNumber,
    score: u32,
    knocked_out: bool,
}

impl Player {
    /// Create a player with a chosen knock-out number.
    ///
    /// Fails with [`GameError::InvalidRule`] if the number is not allowed.
    pub fn new(id: PlayerId, knock_out_number: u8) -> Result<Self> {
        Ok(Self::with_number(id, KnockOutNumber::new(knock_out_number)?))
    }

    /// Create a player from an already validated knock-out number.
    #[must_use]
    pub fn with_number(id: PlayerId, knock_out_number: KnockOutNumber) -> Self {
        Self {
            id,
            name: None,
            knock_out_number,
            score: 0,
            knocked_out: false,
        }
    }

    /// Set a display name (builder pattern).
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Display name, if one was given.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn knock_out_number(&self) -> KnockOutNumber {
        self.knock_out_number
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn is_knocked_out(&self) -> bool {
        self.knocked_out
    }

    /// Apply one turn's two-dice total.
    ///
    /// The knock-out check runs before scoring: a roll equal to the
    /// knock-out number eliminates the player and is not added.
    pub fn record_roll(&mut self, total: u32) -> RollOutcome {
        if self.knocked_out {
            return RollOutcome::Ignored;
        }
        if self.knock_out_number.matches(total) {
            self.knocked_out = true;
            return RollOutcome::KnockedOut;
        }
        self.score = self.score.saturating_add(total);
        RollOutcome::Scored
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "Player 0");
    }

    #[test]
    fn test_player_id_all() {
        let players: Vec<_> = PlayerId::all(4).collect();
        assert_eq!(players.len(), 4);
        assert_eq!(players[0], PlayerId::new(0));
        assert_eq!(players[3], PlayerId::new(3));
    }

    #[test]
    fn test_knock_out_number_validation() {
        for n in 6..=9 {
            assert_eq!(KnockOutNumber::new(n).unwrap().value(), n);
        }
        for n in [0, 1, 5, 10, 12, 255] {
            assert!(matches!(KnockOutNumber::new(n), Err(GameError::InvalidRule(v)) if v == n));
        }
    }

    #[test]
    fn test_knock_out_number_serde() {
        let n = KnockOutNumber::new(8).unwrap();
        assert_eq!(serde_json::to_string(&n).unwrap(), "8");
        assert_eq!(serde_json::from_str::<KnockOutNumber>("8").unwrap(), n);
        assert!(serde_json::from_str::<KnockOutNumber>("4").is_err());
    }

    #[test]
    fn test_new_player() {
        let player = Player::new(PlayerId::new(2), 7).unwrap();
        assert_eq!(player.id(), PlayerId::new(2));
        assert_eq!(player.knock_out_number().value(), 7);
        assert_eq!(player.score(), 0);
        assert!(!player.is_knocked_out());
        assert_eq!(player.to_string(), "Player 2");
    }

    #[test]
    fn test_invalid_player() {
        assert!(matches!(
            Player::new(PlayerId::new(0), 11),
            Err(GameError::InvalidRule(11))
        ));
    }

    #[test]
    fn test_named_player() {
        let player = Player::new(PlayerId::new(0), 6).unwrap().named("Ada");
        assert_eq!(player.name(), Some("Ada"));
        assert_eq!(player.to_string(), "Ada");
    }

    #[test]
    fn test_scoring() {
        let mut player = Player::new(PlayerId::new(0), 7).unwrap();

        assert_eq!(player.record_roll(5), RollOutcome::Scored);
        assert_eq!(player.record_roll(12), RollOutcome::Scored);
        assert_eq!(player.score(), 17);
    }

    #[test]
    fn test_knock_out_preempts_scoring() {
        let mut player = Player::new(PlayerId::new(0), 8).unwrap();
        player.record_roll(10);

        assert_eq!(player.record_roll(8), RollOutcome::KnockedOut);
        assert!(player.is_knocked_out());
        assert_eq!(player.score(), 10);
    }

    #[test]
    fn test_knocked_out_player_frozen() {
        let mut player = Player::new(PlayerId::new(0), 6).unwrap();
        player.record_roll(6);

        assert_eq!(player.record_roll(11), RollOutcome::Ignored);
        assert_eq!(player.record_roll(6), RollOutcome::Ignored);
        assert_eq!(player.score(), 0);
        assert!(player.is_knocked_out());
    }

    proptest! {
        #[test]
        fn prop_knock_out_is_permanent(
            number in 6u8..=9,
            before in proptest::collection::vec(2u32..=12, 0..10),
            after in proptest::collection::vec(2u32..=12, 0..20),
        ) {
            let mut player = Player::new(PlayerId::new(0), number).unwrap();
            for total in before {
                player.record_roll(total);
            }
            player.record_roll(u32::from(number));
            prop_assert!(player.is_knocked_out());

            let frozen = player.score();
            for total in after {
                prop_assert_eq!(player.record_roll(total), RollOutcome::Ignored);
                prop_assert!(player.is_knocked_out());
                prop_assert_eq!(player.score(), frozen);
            }
        }
    }
}
