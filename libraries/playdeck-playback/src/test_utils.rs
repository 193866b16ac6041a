//! Recording media backend for tests
//!
//! [`RecordingBackend`] hands out [`RecordingEngine`]s that log every
//! command they receive. Tests keep inspecting them through
//! [`PlaybackController::backend`](crate::PlaybackController::backend) and
//! drive engine events through [`EngineProbe`].

use crate::engine::{
    EngineError, EngineEventKind, Generation, MediaBackend, MediaEngine, Subscription,
};
use playdeck_core::{uploads_url_path, Song, SongId};
use std::cell::RefCell;
use std::rc::Rc;

/// Command received by a recording engine
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Play,
    Pause,
    SeekTo(f64),
    Subscribe(Generation),
    Unsubscribe,
}

#[derive(Debug)]
struct EngineState {
    url: String,
    calls: Vec<EngineCall>,
    subscription: Option<Subscription>,
    subscribed: bool,
    playing: bool,
}

/// Engine that records commands instead of producing audio
#[derive(Debug)]
pub struct RecordingEngine {
    state: Rc<RefCell<EngineState>>,
    play_error: Option<EngineError>,
}

impl RecordingEngine {
    pub fn url(&self) -> String {
        self.state.borrow().url.clone()
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.state.borrow().calls.clone()
    }

    pub fn is_subscribed(&self) -> bool {
        self.state.borrow().subscribed
    }

    pub fn is_producing_audio(&self) -> bool {
        self.state.borrow().playing
    }
}

impl MediaEngine for RecordingEngine {
    fn play(&mut self) -> Result<(), EngineError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(EngineCall::Play);
        match &self.play_error {
            Some(error) => Err(error.clone()),
            None => {
                state.playing = true;
                Ok(())
            }
        }
    }

    fn pause(&mut self) {
        let mut state = self.state.borrow_mut();
        state.calls.push(EngineCall::Pause);
        state.playing = false;
    }

    fn seek_to(&mut self, seconds: f64) {
        self.state.borrow_mut().calls.push(EngineCall::SeekTo(seconds));
    }

    fn subscribe(&mut self, subscription: Subscription) {
        let mut state = self.state.borrow_mut();
        state
            .calls
            .push(EngineCall::Subscribe(subscription.generation()));
        state.subscription = Some(subscription);
        state.subscribed = true;
    }

    fn unsubscribe(&mut self) {
        let mut state = self.state.borrow_mut();
        state.calls.push(EngineCall::Unsubscribe);
        state.subscribed = false;
    }
}

/// Backend that keeps a handle on every engine it created
#[derive(Debug, Default)]
pub struct RecordingBackend {
    engines: Vec<Rc<RefCell<EngineState>>>,
    play_error: Option<EngineError>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose engines reject every start command with `error`
    pub fn rejecting_play(error: EngineError) -> Self {
        Self {
            engines: Vec::new(),
            play_error: Some(error),
        }
    }

    /// Number of engines created so far
    pub fn created_count(&self) -> usize {
        self.engines.len()
    }

    /// URLs of all created engines, in creation order
    pub fn created_urls(&self) -> Vec<String> {
        self.engines.iter().map(|e| e.borrow().url.clone()).collect()
    }

    /// Engines still subscribed to the controller
    pub fn subscribed_count(&self) -> usize {
        self.engines.iter().filter(|e| e.borrow().subscribed).count()
    }

    /// Engines currently producing audio
    pub fn producing_count(&self) -> usize {
        self.engines.iter().filter(|e| e.borrow().playing).count()
    }

    /// Probe for the `n`th created engine
    pub fn engine(&self, n: usize) -> EngineProbe {
        EngineProbe {
            state: Rc::clone(&self.engines[n]),
        }
    }

    /// Probe for the most recently created engine
    pub fn latest(&self) -> EngineProbe {
        self.engine(self.engines.len() - 1)
    }
}

impl MediaBackend for RecordingBackend {
    type Engine = RecordingEngine;

    fn create(&mut self, audio_url: &str) -> RecordingEngine {
        let state = Rc::new(RefCell::new(EngineState {
            url: audio_url.to_string(),
            calls: Vec::new(),
            subscription: None,
            subscribed: false,
            playing: false,
        }));
        self.engines.push(Rc::clone(&state));

        RecordingEngine {
            state,
            play_error: self.play_error.clone(),
        }
    }
}

/// Test-side view of a recorded engine
#[derive(Debug, Clone)]
pub struct EngineProbe {
    state: Rc<RefCell<EngineState>>,
}

impl EngineProbe {
    pub fn url(&self) -> String {
        self.state.borrow().url.clone()
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.state.borrow().calls.clone()
    }

    pub fn count(&self, call: &EngineCall) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| *c == call)
            .count()
    }

    pub fn is_subscribed(&self) -> bool {
        self.state.borrow().subscribed
    }

    pub fn is_producing_audio(&self) -> bool {
        self.state.borrow().playing
    }

    /// Stop producing audio on its own, as a finished source does
    pub fn finish(&self) {
        self.state.borrow_mut().playing = false;
    }

    /// Deliver an event while subscribed; returns false if unsubscribed
    pub fn emit(&self, kind: EngineEventKind) -> bool {
        let state = self.state.borrow();
        match (&state.subscription, state.subscribed) {
            (Some(subscription), true) => subscription.emit(kind),
            _ => false,
        }
    }

    /// Deliver an event that was already in flight when the engine was
    /// released
    pub fn emit_in_flight(&self, kind: EngineEventKind) -> bool {
        self.state
            .borrow()
            .subscription
            .as_ref()
            .is_some_and(|subscription| subscription.emit(kind))
    }

    pub fn metadata_loaded(&self, duration: f64) -> bool {
        self.emit(EngineEventKind::MetadataLoaded {
            duration,
            current_time: 0.0,
        })
    }

    pub fn time_updated(&self, current_time: f64) -> bool {
        self.emit(EngineEventKind::TimeUpdated { current_time })
    }

    /// Finish the source and report the end of the track
    pub fn ended(&self) -> bool {
        self.finish();
        self.emit(EngineEventKind::Ended)
    }
}

/// Uploaded-song fixture: `/uploads/{title}.mp3`
pub fn song(id: SongId, title: &str) -> Song {
    Song {
        id,
        title: title.to_string(),
        artist: Some("Unknown Artist".to_string()),
        album_art_url: None,
        audio_url: uploads_url_path(&format!("{title}.mp3")),
    }
}

/// Playlist fixture with ids starting at 1
pub fn playlist(titles: &[&str]) -> Vec<Song> {
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| song(i as SongId + 1, title))
        .collect()
}
