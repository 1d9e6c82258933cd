//! Observer delivery tests.
//!
//! Verify that events reach every observer, in registration order, before
//! the call that produced them returns, and that observer failures reach
//! the caller.

use std::sync::{Arc, Mutex};

use knockout_dice::events::ObserverResult;
use knockout_dice::{
    DiceGame, EventLog, FixedSource, GameError, GameEvent, GameObserver, GameOutcome,
    GameTracker, KnockOutGame, PlayerId, RandomSource, SequenceSource,
};

type Deliveries = Arc<Mutex<Vec<(usize, GameEvent)>>>;

/// Records (observer id, event) pairs into a shared list.
struct Recorder {
    id: usize,
    deliveries: Deliveries,
}

impl GameObserver for Recorder {
    fn on_event(&mut self, event: &GameEvent) -> ObserverResult {
        self.deliveries
            .lock()
            .unwrap()
            .push((self.id, event.clone()));
        Ok(())
    }
}

/// Fails on the first turn notification.
struct FailOnTurn;

impl GameObserver for FailOnTurn {
    fn turn_ended(&mut self, _player: PlayerId, _roll: u32, _new_score: u32) -> ObserverResult {
        Err("scoreboard unavailable".into())
    }
}

fn always_seven() -> Arc<dyn RandomSource> {
    Arc::new(SequenceSource::new(vec![2, 3]).unwrap())
}

#[test]
fn test_three_observers_in_registration_order() {
    let deliveries: Deliveries = Arc::default();
    let mut game = KnockOutGame::builder()
        .players([7, 9])
        .source(always_seven())
        .build()
        .unwrap();
    for id in 0..3 {
        game.register_observer(Recorder {
            id,
            deliveries: Arc::clone(&deliveries),
        });
    }
    assert_eq!(game.observer_count(), 3);

    game.start().unwrap();
    assert_eq!(deliveries.lock().unwrap().len(), 3);

    // First turn: player 0 rolls 7 and is knocked out
    game.play_turn().unwrap();
    {
        let seen = deliveries.lock().unwrap();
        assert_eq!(seen.len(), 9);

        let turn = &seen[3..];
        let ids: Vec<_> = turn.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![0, 1, 2, 0, 1, 2]);

        for (_, event) in &turn[..3] {
            assert_eq!(
                *event,
                GameEvent::TurnEnded {
                    player: PlayerId::new(0),
                    roll: 7,
                    new_score: 0,
                }
            );
        }
        for (_, event) in &turn[3..] {
            assert_eq!(
                *event,
                GameEvent::PlayerKnockedOut {
                    player: PlayerId::new(0)
                }
            );
        }
    }

    game.play().unwrap();

    let seen = deliveries.lock().unwrap();
    // Events arrive in triples, one per observer, in order
    for chunk in seen.chunks(3) {
        let ids: Vec<_> = chunk.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(chunk.iter().all(|(_, e)| *e == chunk[0].1));
    }
    assert_eq!(
        seen.last().unwrap().1,
        GameEvent::GameEnded {
            outcome: GameOutcome::Winners(vec![PlayerId::new(1)])
        }
    );
}

#[test]
fn test_event_log_full_game() {
    let log = EventLog::new();
    let mut game = KnockOutGame::builder()
        .players([7, 9])
        .source(always_seven())
        .build()
        .unwrap();
    game.register_observer(log.clone());

    game.play().unwrap();

    let events = log.events();
    // start + (turn + knock-out) + 15 turns + end
    assert_eq!(events.len(), 1 + 2 + 15 + 1);
    assert!(matches!(&events[0], GameEvent::GameStarted { players } if players.len() == 2));

    let scores: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::TurnEnded {
                player, new_score, ..
            } if *player == PlayerId::new(1) => Some(*new_score),
            _ => None,
        })
        .collect();
    assert_eq!(scores, (1..=15).map(|n| n * 7).collect::<Vec<_>>());
}

#[test]
fn test_tracker_follows_game() {
    let tracker = GameTracker::new();
    let mut game = KnockOutGame::builder()
        .players([6, 9])
        .source(Arc::new(FixedSource(5)))
        .build()
        .unwrap();
    game.register_observer(tracker.clone());

    let outcome = game.play().unwrap();
    let stats = tracker.stats();

    assert_eq!(stats.players, 2);
    assert_eq!(stats.turns, game.turn_number());
    assert_eq!(stats.best_roll, 12);
    assert!(stats.knocked_out.is_empty());
    assert_eq!(stats.outcome, Some(outcome));
}

#[test]
fn test_observer_failure_propagates_after_mutation() {
    let log = EventLog::new();
    let mut game = KnockOutGame::builder()
        .player(9)
        .source(always_seven())
        .build()
        .unwrap();
    game.register_observer(log.clone());
    game.register_observer(FailOnTurn);

    game.start().unwrap();
    let err = game.play_turn().unwrap_err();

    assert!(matches!(err, GameError::Observer(_)));
    // The turn was applied before notification
    assert_eq!(game.turn_number(), 1);
    assert_eq!(game.players()[0].score(), 7);
    // The first observer saw the event before the failure
    assert_eq!(log.len(), 2);
}

#[test]
fn test_duplicate_registration_delivers_twice() {
    let log = EventLog::new();
    let mut game = KnockOutGame::builder()
        .player(6)
        .source(always_seven())
        .build()
        .unwrap();
    game.register_observer(log.clone());
    game.register_observer(log.clone());

    game.start().unwrap();

    assert_eq!(log.len(), 2);
}
