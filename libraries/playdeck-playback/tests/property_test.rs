//! Property-based tests for the playback controller
//!
//! Uses proptest to verify navigation, seek and auto-advance invariants
//! across random playlists and positions.

use playdeck_playback::test_utils::{playlist, RecordingBackend};
use playdeck_playback::{progress_percent, PlaybackController};
use proptest::prelude::*;

// ===== Helpers =====

fn titles(len: usize) -> Vec<String> {
    (0..len).map(|i| format!("Track {i:03}")).collect()
}

/// Controller with `len` songs and `start` bound (paused)
fn controller_at(len: usize, start: usize) -> PlaybackController<RecordingBackend> {
    let names = titles(len);
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    PlaybackController::with_playlist(RecordingBackend::new(), playlist(&refs), Some(start))
        .unwrap()
}

/// Playlist length and a valid index into it
fn len_and_index() -> impl Strategy<Value = (usize, usize)> {
    (1usize..30).prop_flat_map(|len| (Just(len), 0..len))
}

fn seek_target() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1.0e6f64..1.0e6,
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

// ===== Property Tests =====

proptest! {
    /// Property: next() applied len times returns to the starting index
    #[test]
    fn next_is_cyclic((len, start) in len_and_index()) {
        let mut controller = controller_at(len, start);

        for _ in 0..len {
            controller.next().unwrap();
        }

        prop_assert_eq!(controller.current_index(), Some(start));
        prop_assert!(controller.is_playing());
    }

    /// Property: previous() undoes next() and vice versa
    #[test]
    fn previous_inverts_next((len, start) in len_and_index()) {
        let mut controller = controller_at(len, start);

        controller.next().unwrap();
        controller.previous().unwrap();
        prop_assert_eq!(controller.current_index(), Some(start));

        controller.previous().unwrap();
        controller.next().unwrap();
        prop_assert_eq!(controller.current_index(), Some(start));
    }

    /// Property: seek always lands inside [0, duration]
    #[test]
    fn seek_stays_within_duration(
        duration in 0.0f64..10_000.0,
        targets in prop::collection::vec(seek_target(), 1..20)
    ) {
        let mut controller = controller_at(1, 0);
        controller.backend().latest().metadata_loaded(duration);
        controller.poll_engine_events();

        for target in targets {
            controller.seek(target).unwrap();
            let time = controller.current_time();
            prop_assert!(time >= 0.0 && time <= controller.duration(), "time {} out of range", time);
        }
    }

    /// Property: progress is within [0, 100] and 0 without a duration
    #[test]
    fn progress_is_bounded(
        current_time in prop::num::f64::ANY,
        duration in prop::num::f64::ANY
    ) {
        let percent = progress_percent(current_time, duration);
        prop_assert!((0.0..=100.0).contains(&percent));
        if duration == 0.0 {
            prop_assert_eq!(percent, 0.0);
        }
    }

    /// Property: end-of-track advances by one and preserves play intent
    #[test]
    fn ended_preserves_play_intent((len, start) in len_and_index(), playing in any::<bool>()) {
        let mut controller = controller_at(len, start);
        if playing {
            controller.toggle_play_pause();
        }

        controller.backend().latest().ended();
        controller.poll_engine_events();

        prop_assert_eq!(controller.current_index(), Some((start + 1) % len));
        prop_assert_eq!(controller.is_playing(), playing);
    }

    /// Property: any selection sequence leaves exactly one subscribed engine
    #[test]
    fn one_active_engine_after_selections(
        len in 1usize..10,
        picks in prop::collection::vec(0usize..10, 1..15)
    ) {
        let names = titles(len);
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut controller =
            PlaybackController::with_playlist(RecordingBackend::new(), playlist(&refs), None)
                .unwrap();

        for pick in picks {
            let _ = controller.select_track(pick % len);
        }

        prop_assert_eq!(controller.backend().subscribed_count(), 1);
        prop_assert_eq!(controller.backend().producing_count(), 1);
    }
}
