//! Pluggable random number sources.
//!
//! A [`RandomSource`] yields integers drawn from a fixed inclusive range
//! `[1, N]`. Dice hold a shared reference to one, so the same source can
//! feed several dice (and, being `Send + Sync`, several games).
//!
//! ## Implementations
//!
//! - [`UniformSource`]: seeded ChaCha8 generator, the production source
//! - [`FixedSource`]: always the same value
//! - [`SequenceSource`]: a fixed sequence, cycling
//!
//! ```
//! use knockout_dice::core::{RandomSource, UniformSource};
//!
//! let source = UniformSource::one_through_ten(42);
//! let value = source.next();
//! assert!((1..=10).contains(&value));
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};

/// Upper bound of the reference generator.
pub const DEFAULT_SOURCE_RANGE: u32 = 10;

/// A source of uniformly distributed integers.
///
/// Implementations must be substitutable: the engine only ever calls
/// [`RandomSource::next`], so a deterministic fake can stand in for the
/// real generator in tests.
pub trait RandomSource: Send + Sync {
    /// Draw the next value.
    fn next(&self) -> u32;
}

/// Seeded generator drawing uniformly from `[1, upper]`.
///
/// Uses ChaCha8 so that the same seed always produces the same sequence.
/// Interior mutability lets the source be shared behind an `Arc`.
#[derive(Debug)]
pub struct UniformSource {
    inner: Mutex<ChaCha8Rng>,
    seed: u64,
    upper: u32,
}

impl UniformSource {
    /// Create a source over `[1, upper]`.
    ///
    /// Fails with [`GameError::Configuration`] when `upper` is zero.
    pub fn new(seed: u64, upper: u32) -> Result<Self> {
        if upper == 0 {
            return Err(GameError::Configuration(
                "random source range must be at least 1".into(),
            ));
        }
        Ok(Self {
            inner: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            seed,
            upper,
        })
    }

    /// The reference generator: uniform over `[1, 10]`.
    #[must_use]
    pub fn one_through_ten(seed: u64) -> Self {
        Self {
            inner: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            seed,
            upper: DEFAULT_SOURCE_RANGE,
        }
    }

    /// Upper bound of the range.
    #[must_use]
    pub fn upper(&self) -> u32 {
        self.upper
    }

    /// Capture the current position for later replay.
    #[must_use]
    pub fn state(&self) -> SourceState {
        SourceState {
            seed: self.seed,
            upper: self.upper,
            word_pos: self.rng().get_word_pos(),
        }
    }

    /// Restore a source from a captured state.
    pub fn from_state(state: &SourceState) -> Result<Self> {
        let source = Self::new(state.seed, state.upper)?;
        source.rng().set_word_pos(state.word_pos);
        Ok(source)
    }

    fn rng(&self) -> MutexGuard<'_, ChaCha8Rng> {
        // The generator holds no invariant a panicking holder could break.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RandomSource for UniformSource {
    fn next(&self) -> u32 {
        self.rng().gen_range(1..=self.upper)
    }
}

/// Serializable position of a [`UniformSource`].
///
/// ChaCha8's word position makes capture O(1) regardless of how many
/// values have been drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceState {
    /// Original seed.
    pub seed: u64,
    /// Upper bound of the range.
    pub upper: u32,
    /// ChaCha8 word position.
    pub word_pos: u128,
}

/// Source that always yields the same value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedSource(pub u32);

impl RandomSource for FixedSource {
    fn next(&self) -> u32 {
        self.0
    }
}

/// Source that replays a fixed sequence, wrapping at the end.
///
/// The cursor is atomic so the source can be shared like any other.
#[derive(Debug)]
pub struct SequenceSource {
    values: Vec<u32>,
    cursor: AtomicUsize,
}

impl SequenceSource {
    /// Create a source from a non-empty sequence.
    pub fn new(values: Vec<u32>) -> Result<Self> {
        if values.is_empty() {
            return Err(GameError::Configuration(
                "sequence source needs at least one value".into(),
            ));
        }
        Ok(Self {
            values,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Number of values drawn so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

impl RandomSource for SequenceSource {
    fn next(&self) -> u32 {
        let i = self.cursor.fetch_add(1, Ordering::SeqCst);
        self.values[i % self.values.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_determinism() {
        let a = UniformSource::one_through_ten(42);
        let b = UniformSource::one_through_ten(42);

        for _ in 0..100 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn test_different_seeds() {
        let a = UniformSource::one_through_ten(1);
        let b = UniformSource::one_through_ten(2);

        let seq1: Vec<_> = (0..20).map(|_| a.next()).collect();
        let seq2: Vec<_> = (0..20).map(|_| b.next()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_range_bounds() {
        let source = UniformSource::one_through_ten(7);
        let mut seen = [false; 11];

        for _ in 0..1000 {
            let v = source.next();
            assert!((1..=10).contains(&v));
            seen[v as usize] = true;
        }

        // Every face of the range should appear in 1000 draws
        assert!(seen[1..].iter().all(|&s| s));
    }

    #[test]
    fn test_zero_range_rejected() {
        assert!(matches!(
            UniformSource::new(1, 0),
            Err(GameError::Configuration(_))
        ));
    }

    #[test]
    fn test_state_restore() {
        let source = UniformSource::new(42, 20).unwrap();
        for _ in 0..50 {
            source.next();
        }

        let state = source.state();
        let expected: Vec<_> = (0..10).map(|_| source.next()).collect();

        let restored = UniformSource::from_state(&state).unwrap();
        let actual: Vec<_> = (0..10).map(|_| restored.next()).collect();

        assert_eq!(expected, actual);
        assert_eq!(restored.upper(), 20);
    }

    #[test]
    fn test_state_serde() {
        let state = SourceState {
            seed: 42,
            upper: 10,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: SourceState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }

    #[test]
    fn test_fixed_source() {
        let source = FixedSource(5);
        assert!((0..10).all(|_| source.next() == 5));
    }

    #[test]
    fn test_sequence_source_cycles() {
        let source = SequenceSource::new(vec![1, 2, 3]).unwrap();
        let drawn: Vec<_> = (0..7).map(|_| source.next()).collect();

        assert_eq!(drawn, vec![1, 2, 3, 1, 2, 3, 1]);
        assert_eq!(source.draws(), 7);
    }

    #[test]
    fn test_sequence_source_empty() {
        assert!(SequenceSource::new(vec![]).is_err());
    }

    #[test]
    fn test_shared_across_threads() {
        let source: Arc<dyn RandomSource> = Arc::new(UniformSource::one_through_ten(9));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let source = Arc::clone(&source);
                std::thread::spawn(move || (0..100).map(|_| source.next()).collect::<Vec<_>>())
            })
            .collect();

        for handle in handles {
            let values = handle.join().unwrap();
            assert!(values.iter().all(|v| (1..=10).contains(v)));
        }
    }
}
