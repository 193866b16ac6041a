//! Playback controller - core state machine
//!
//! Owns the current index, play/pause intent, duration and read head, and
//! mediates every transition against a single media engine instance.

use crate::{
    engine::{
        EngineError, EngineEvent, EngineEventKind, Generation, MediaBackend, MediaEngine,
        Subscription,
    },
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    types::{progress_percent, PlaybackSnapshot, PlaybackStatus},
};
use playdeck_core::Song;
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, trace, warn};

/// Sequential playlist playback
///
/// State transitions:
/// - `select_track(i)` / `next()` / `previous()`: move to a track and play
/// - `toggle_play_pause()`: flip playback intent (first toggle starts index 0)
/// - `seek(t)`: move the read head, clamped to `[0, duration]`
/// - engine events: metadata, time updates and end-of-track auto-advance
///
/// Whenever the current index changes, the previous engine instance is
/// paused and unsubscribed before a new one is created for the new track.
/// Events from superseded instances are dropped by generation.
pub struct PlaybackController<B: MediaBackend> {
    backend: B,
    playlist: Vec<Song>,

    // State
    current_index: Option<usize>,
    is_playing: bool,
    duration: f64,
    current_time: f64,

    // Engine binding
    engine: Option<B::Engine>,
    generation: Generation,
    event_tx: Sender<EngineEvent>,
    event_rx: Receiver<EngineEvent>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<B: MediaBackend> PlaybackController<B> {
    /// Create a controller with an empty playlist
    pub fn new(backend: B) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        Self {
            backend,
            playlist: Vec::new(),
            current_index: None,
            is_playing: false,
            duration: 0.0,
            current_time: 0.0,
            engine: None,
            generation: Generation::default(),
            event_tx,
            event_rx,
            pending_events: Vec::new(),
        }
    }

    /// Create a controller with a playlist and an optional initial selection
    ///
    /// An initial index binds an engine to that track without starting it.
    pub fn with_playlist(
        backend: B,
        playlist: Vec<Song>,
        initial_index: Option<usize>,
    ) -> Result<Self> {
        let mut controller = Self::new(backend);
        controller.playlist = playlist;

        if let Some(index) = initial_index {
            controller.check_index(index)?;
            controller.rebind(index);
        }

        Ok(controller)
    }

    // ===== Playback Control =====

    /// Select a track and start playing it
    ///
    /// Selecting the track that is already current resumes it without
    /// rebinding.
    pub fn select_track(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;

        if self.current_index == Some(index) {
            if self.set_playing_flag(true) {
                self.start_engine();
            }
            return Ok(());
        }

        self.set_playing_flag(true);
        self.rebind(index);
        Ok(())
    }

    /// Toggle between playing and paused
    ///
    /// With nothing selected, the first toggle selects index 0 and starts
    /// playback. With nothing selected and an empty playlist it does nothing.
    pub fn toggle_play_pause(&mut self) {
        if self.current_index.is_none() {
            if self.playlist.is_empty() {
                debug!("Toggle ignored: playlist is empty");
                return;
            }
            self.set_playing_flag(true);
            self.rebind(0);
            return;
        }

        let playing = !self.is_playing;
        self.set_playing_flag(playing);

        if playing {
            self.start_engine();
        } else if let Some(engine) = self.engine.as_mut() {
            engine.pause();
        }
    }

    /// Skip to the next track, wrapping at the end of the playlist
    pub fn next(&mut self) -> Result<()> {
        let len = self.playlist.len();
        if len == 0 {
            return Err(PlaybackError::PlaylistEmpty);
        }

        let target = self.current_index.map_or(0, |i| (i + 1) % len);
        let started = self.set_playing_flag(true);
        self.move_to(target, started);
        Ok(())
    }

    /// Go back to the previous track, wrapping at the start of the playlist
    pub fn previous(&mut self) -> Result<()> {
        let len = self.playlist.len();
        if len == 0 {
            return Err(PlaybackError::PlaylistEmpty);
        }

        let target = self.current_index.map_or(0, |i| (i + len - 1) % len);
        let started = self.set_playing_flag(true);
        self.move_to(target, started);
        Ok(())
    }

    /// Move the read head of the current track
    ///
    /// The target is clamped to `[0, duration]` and applied to the state
    /// immediately, ahead of any engine confirmation.
    pub fn seek(&mut self, seconds: f64) -> Result<()> {
        if self.current_track().is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }

        let target = clamp_time(seconds, self.duration);
        if let Some(engine) = self.engine.as_mut() {
            engine.seek_to(target);
        }
        self.current_time = target;
        self.emit_position_changed();
        Ok(())
    }

    // ===== Playlist =====

    /// Replace the playlist wholesale
    ///
    /// - The current song is followed to its new index when its audio URL
    ///   is still present (no rebind).
    /// - Otherwise an empty playlist clears the selection and pauses.
    /// - Otherwise an index still in range rebinds to the song now there.
    /// - Otherwise the index is clamped to the last song and playback pauses.
    pub fn set_playlist(&mut self, songs: Vec<Song>) {
        let previous_url = self.current_track().map(|song| song.audio_url.clone());
        self.playlist = songs;
        self.pending_events.push(PlaybackEvent::PlaylistReplaced {
            len: self.playlist.len(),
        });

        let Some(index) = self.current_index else {
            return;
        };

        if let Some(url) = previous_url {
            if let Some(new_index) = self.playlist.iter().position(|s| s.audio_url == url) {
                if new_index != index {
                    debug!(from = index, to = new_index, "Current song moved in playlist");
                    self.current_index = Some(new_index);
                    self.emit_track_changed(new_index);
                }
                return;
            }
        }

        let len = self.playlist.len();
        if len == 0 {
            debug!("Playlist emptied, clearing current track");
            self.release_engine();
            self.current_index = None;
            self.set_playing_flag(false);
            self.duration = 0.0;
            self.current_time = 0.0;
            self.pending_events.push(PlaybackEvent::TrackCleared);
        } else if index < len {
            self.rebind(index);
        } else {
            debug!(index, len, "Current index past end of new playlist, clamping");
            self.set_playing_flag(false);
            self.rebind(len - 1);
        }
    }

    // ===== Engine Events =====

    /// Apply one engine event
    ///
    /// Returns false when the event came from a superseded engine instance
    /// and was dropped.
    pub fn handle_engine_event(&mut self, event: EngineEvent) -> bool {
        if event.generation != self.generation || self.engine.is_none() {
            trace!(
                event_generation = %event.generation,
                current_generation = %self.generation,
                "Dropping stale engine event"
            );
            return false;
        }

        match event.kind {
            EngineEventKind::MetadataLoaded {
                duration,
                current_time,
            } => {
                self.duration = sanitize_duration(duration);
                self.current_time = clamp_time(current_time, self.duration);
                self.emit_position_changed();
            }
            EngineEventKind::TimeUpdated { current_time } => {
                self.current_time = clamp_time(current_time, self.duration);
                self.emit_position_changed();
            }
            EngineEventKind::Ended => self.advance_after_end(),
            EngineEventKind::StartRejected(error) => log_start_error(&error),
        }

        true
    }

    /// Apply every engine event delivered since the last poll
    ///
    /// Returns the number of events applied (stale ones excluded).
    pub fn poll_engine_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            if self.handle_engine_event(event) {
                applied += 1;
            }
        }
        applied
    }

    // ===== State =====

    pub fn playlist(&self) -> &[Song] {
        &self.playlist
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.current_time, self.duration)
    }

    pub fn current_track(&self) -> Option<&Song> {
        self.current_index.and_then(|i| self.playlist.get(i))
    }

    pub fn status(&self) -> PlaybackStatus {
        match (self.current_index, self.is_playing) {
            (None, _) => PlaybackStatus::Idle,
            (Some(_), false) => PlaybackStatus::Paused,
            (Some(_), true) => PlaybackStatus::Playing,
        }
    }

    /// Read-only snapshot for rendering
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            current_index: self.current_index,
            is_playing: self.is_playing,
            duration: self.duration,
            current_time: self.current_time,
            progress_percent: self.progress_percent(),
            current_track: self.current_track().cloned(),
        }
    }

    /// Generation of the currently bound engine instance
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Currently bound engine instance
    pub fn engine(&self) -> Option<&B::Engine> {
        self.engine.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// The presentation layer calls this before re-rendering.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.playlist.len() {
            Ok(())
        } else {
            Err(PlaybackError::IndexOutOfBounds {
                index,
                len: self.playlist.len(),
            })
        }
    }

    /// Set playback intent; returns true if it changed
    fn set_playing_flag(&mut self, playing: bool) -> bool {
        if self.is_playing == playing {
            return false;
        }
        self.is_playing = playing;
        self.pending_events
            .push(PlaybackEvent::StateChanged { is_playing: playing });
        true
    }

    /// Navigate to `target` with `is_playing` already decided
    ///
    /// Landing on the current index (single-song playlist) rewinds the bound
    /// engine instead of rebuilding it; `start` says whether that engine
    /// still needs a start command.
    fn move_to(&mut self, target: usize, start: bool) {
        if self.current_index == Some(target) {
            self.rewind();
            if start {
                self.start_engine();
            }
        } else {
            self.rebind(target);
        }
    }

    /// End-of-track: advance without touching playback intent
    fn advance_after_end(&mut self) {
        let len = self.playlist.len();
        let Some(index) = self.current_index else {
            return;
        };
        if len == 0 {
            return;
        }

        let target = (index + 1) % len;
        debug!(from = index, to = target, "Track ended, advancing");
        // Ended engines are stopped; restart after rewinding.
        self.move_to(target, self.is_playing);
    }

    /// Release the current engine and bind a new one to `playlist[index]`
    fn rebind(&mut self, index: usize) {
        self.release_engine();
        self.generation = self.generation.next();

        let audio_url = self.playlist[index].audio_url.clone();
        let mut engine = self.backend.create(&audio_url);
        engine.subscribe(Subscription::new(self.generation, self.event_tx.clone()));

        debug!(
            index,
            generation = %self.generation,
            url = %audio_url,
            "Bound media engine"
        );

        self.engine = Some(engine);
        self.current_index = Some(index);
        self.duration = 0.0;
        self.current_time = 0.0;
        self.emit_track_changed(index);

        if self.is_playing {
            self.start_engine();
        }
    }

    /// Pause, unsubscribe and drop the current engine
    fn release_engine(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.pause();
            engine.unsubscribe();
            trace!(generation = %self.generation, "Released media engine");
        }
    }

    fn start_engine(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if let Err(error) = engine.play() {
            log_start_error(&error);
        }
    }

    fn rewind(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.seek_to(0.0);
        }
        self.current_time = 0.0;
        self.emit_position_changed();
    }

    fn emit_track_changed(&mut self, index: usize) {
        let audio_url = self.playlist[index].audio_url.clone();
        self.pending_events
            .push(PlaybackEvent::TrackChanged { index, audio_url });
    }

    fn emit_position_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::PositionChanged {
            current_time: self.current_time,
            duration: self.duration,
        });
    }
}

/// A superseded start is an expected race; everything else is logged
fn log_start_error(error: &EngineError) {
    match error {
        EngineError::Aborted => trace!("Start request superseded, ignoring"),
        EngineError::Failed(_) => warn!(error = %error, "Error playing audio"),
    }
}

/// Non-finite or negative durations count as unknown
fn sanitize_duration(duration: f64) -> f64 {
    if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        0.0
    }
}

/// Clamp a read head position to `[0, duration]`
fn clamp_time(seconds: f64, duration: f64) -> f64 {
    if seconds.is_nan() {
        0.0
    } else {
        seconds.clamp(0.0, duration)
    }
}
