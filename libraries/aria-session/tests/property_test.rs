//! Property-based tests for the session
//!
//! Uses proptest to verify navigation and bookkeeping invariants across many
//! random collections, seeds and operation sequences.

use aria_session::{
    DriverEvent, LifecycleState, RepeatMode, Session, SessionError, Track,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

// ===== Helpers =====

fn create_tracks(n: usize) -> Vec<Track> {
    (0..n)
        .map(|i| Track::new(format!("t{}", i), format!("Track {}", i)))
        .collect()
}

fn repeat_mode() -> impl Strategy<Value = RepeatMode> {
    prop_oneof![
        Just(RepeatMode::None),
        Just(RepeatMode::One),
        Just(RepeatMode::All),
    ]
}

fn assert_invariants(session: &Session, len: usize) -> Result<(), TestCaseError> {
    if let Some(index) = session.current_index() {
        prop_assert!(index < len, "index {} out of range for {}", index, len);
    }

    let history = session.shuffle_history();
    prop_assert!(history.iter().all(|&i| i < len), "stale history {:?}", history);
    let unique: HashSet<_> = history.iter().collect();
    prop_assert_eq!(unique.len(), history.len(), "duplicate in history {:?}", history);
    if !session.is_shuffle_enabled() {
        prop_assert!(history.is_empty());
    }

    prop_assert!((0.0..=1.0).contains(&session.volume()));
    if session.lifecycle() == LifecycleState::Playing {
        prop_assert!(session.is_playing());
    }
    Ok(())
}

// ===== Property Tests =====

proptest! {
    /// Property: repeat-all visits every index once per period of N
    #[test]
    fn repeat_all_is_periodic(len in 1usize..40, start in 0usize..40, seed in any::<u64>()) {
        let tracks = create_tracks(len);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = Session::default();
        session.set_repeat_mode(RepeatMode::All);
        session.set_current_index(start % len, &tracks).unwrap();

        let first: Vec<usize> = (0..len).map(|_| session.next(&tracks, &mut rng).unwrap()).collect();
        let second: Vec<usize> = (0..len).map(|_| session.next(&tracks, &mut rng).unwrap()).collect();

        prop_assert_eq!(&first, &second);
        let covered: HashSet<_> = first.iter().copied().collect();
        prop_assert_eq!(covered.len(), len);
    }

    /// Property: repeat-one never moves in sequential mode
    #[test]
    fn repeat_one_is_fixed_point(len in 1usize..40, start in 0usize..40, steps in 1usize..20) {
        let tracks = create_tracks(len);
        let mut rng = StdRng::seed_from_u64(0);
        let mut session = Session::default();
        session.set_repeat_mode(RepeatMode::One);
        session.set_current_index(start % len, &tracks).unwrap();

        for _ in 0..steps {
            prop_assert_eq!(session.next(&tracks, &mut rng).unwrap(), start % len);
        }
    }

    /// Property: shuffle exhausts the collection before any repeat
    #[test]
    fn shuffle_exhausts_before_repeating(len in 2usize..40, start in 0usize..40, seed in any::<u64>()) {
        let tracks = create_tracks(len);
        let start = start % len;
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = Session::default();
        session.set_current_index(start, &tracks).unwrap();
        session.set_shuffle(true);

        let mut visited = HashSet::from([start]);
        for _ in 0..len - 1 {
            let index = session.next(&tracks, &mut rng).unwrap();
            prop_assert!(visited.insert(index), "repeat of {} before exhaustion", index);
        }
        prop_assert_eq!(session.shuffle_history().len(), len);

        let previous = session.current_index().unwrap();
        let index = session.next(&tracks, &mut rng).unwrap();
        prop_assert_ne!(index, previous);
        prop_assert_eq!(session.shuffle_history(), &[previous, index][..]);
    }

    /// Property: stepping back under shuffle retraces the forward path
    #[test]
    fn shuffle_previous_retraces_path(len in 2usize..30, steps in 1usize..10, seed in any::<u64>()) {
        let tracks = create_tracks(len);
        let steps = steps.min(len - 1);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = Session::default();
        session.set_current_index(0, &tracks).unwrap();
        session.set_shuffle(true);

        let mut path = vec![0];
        for _ in 0..steps {
            path.push(session.next(&tracks, &mut rng).unwrap());
        }

        path.pop();
        while let Some(expected) = path.pop() {
            prop_assert_eq!(session.previous(&tracks, &mut rng).unwrap(), expected);
        }
    }

    /// Property: volume is always clamped
    #[test]
    fn volume_always_in_unit_range(level in proptest::num::f32::ANY) {
        let mut session = Session::default();
        session.set_volume(level);
        prop_assert!((0.0..=1.0).contains(&session.volume()));
    }

    /// Property: invariants hold across random operation sequences,
    /// including collections that shrink and grow between calls
    #[test]
    fn invariants_hold_after_random_ops(
        ops in prop::collection::vec((0u8..12, 0usize..16), 1..200),
        mode in repeat_mode(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = Session::default();
        session.set_repeat_mode(mode);
        let mut len = 6;

        for (op, arg) in ops {
            let tracks = create_tracks(len);
            match op {
                0 => { session.next(&tracks, &mut rng).ok(); }
                1 => { session.previous(&tracks, &mut rng).ok(); }
                2 => session.toggle_shuffle(),
                3 => { session.cycle_repeat_mode(); }
                4 => session.toggle_play(),
                5 => session.set_volume(arg as f32 / 8.0 - 0.5),
                6 => { session.set_current_index(arg, &tracks).ok(); }
                7 => {
                    let in_playback = matches!(
                        session.lifecycle(),
                        LifecycleState::Playing | LifecycleState::Paused
                    );
                    let result = session.handle_driver_event(DriverEvent::Ended, &tracks, &mut rng);
                    if !in_playback {
                        prop_assert_eq!(result, Ok(()));
                    } else if len == 0 {
                        prop_assert_eq!(result, Err(SessionError::EmptyCollection));
                    }
                }
                8 => { session.handle_driver_event(DriverEvent::Ready, &tracks, &mut rng).ok(); }
                9 => {
                    // Library changed size
                    len = arg;
                    let tracks = create_tracks(len);
                    session.recover_index(&tracks).ok();
                }
                10 => session.seek(arg as f64 * 10.0),
                _ => session.reset(),
            }
            session.take_commands();

            let tracks = create_tracks(len);
            session.recover_index(&tracks).ok();
            assert_invariants(&session, len)?;
        }
    }
}
