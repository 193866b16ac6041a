//! Media engine capability boundary
//!
//! The controller never touches audio directly. It asks a [`MediaBackend`]
//! for one engine instance per selected track and talks to that instance
//! through [`MediaEngine`]. Engines report progress by sending
//! [`EngineEvent`]s through the [`Subscription`] they were handed; every
//! event carries the generation of the instance that produced it so the
//! controller can drop anything coming from a superseded instance.

use std::fmt;
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Engine instance generation
///
/// Bumped by the controller on every rebind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors reported by a media engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A start request was pre-empted by a newer request (pause or rebind)
    #[error("Start request aborted by a newer request")]
    Aborted,

    /// Any other engine failure (unsupported source, decode error, ...)
    #[error("Engine failure: {0}")]
    Failed(String),
}

impl EngineError {
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}

/// What happened inside an engine instance
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEventKind {
    /// Metadata is available; duration and read head are known
    MetadataLoaded { duration: f64, current_time: f64 },

    /// The read head moved
    TimeUpdated { current_time: f64 },

    /// The source played through to its end
    Ended,

    /// A start command was rejected after `play()` returned
    StartRejected(EngineError),
}

/// Event tagged with the generation of the engine instance that emitted it
#[derive(Debug, Clone, PartialEq)]
pub struct EngineEvent {
    pub generation: Generation,
    pub kind: EngineEventKind,
}

/// Handle an engine uses to deliver its events to the controller
#[derive(Debug, Clone)]
pub struct Subscription {
    generation: Generation,
    sender: Sender<EngineEvent>,
}

impl Subscription {
    pub(crate) fn new(generation: Generation, sender: Sender<EngineEvent>) -> Self {
        Self { generation, sender }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Send an event; returns false if the controller is gone
    pub fn emit(&self, kind: EngineEventKind) -> bool {
        self.sender
            .send(EngineEvent {
                generation: self.generation,
                kind,
            })
            .is_ok()
    }

    pub fn metadata_loaded(&self, duration: f64, current_time: f64) -> bool {
        self.emit(EngineEventKind::MetadataLoaded {
            duration,
            current_time,
        })
    }

    pub fn time_updated(&self, current_time: f64) -> bool {
        self.emit(EngineEventKind::TimeUpdated { current_time })
    }

    pub fn ended(&self) -> bool {
        self.emit(EngineEventKind::Ended)
    }

    pub fn start_rejected(&self, error: EngineError) -> bool {
        self.emit(EngineEventKind::StartRejected(error))
    }
}

/// One engine instance, bound to a single audio source
///
/// Implementations must stop delivering events once [`unsubscribe`] has
/// been called.
///
/// [`unsubscribe`]: MediaEngine::unsubscribe
pub trait MediaEngine {
    /// Start or resume producing audio
    ///
    /// Returns `Err(EngineError::Aborted)` when the request was superseded
    /// before it could take effect.
    fn play(&mut self) -> Result<(), EngineError>;

    /// Stop producing audio, keeping the read head
    fn pause(&mut self);

    /// Move the read head (seconds from the start)
    fn seek_to(&mut self, seconds: f64);

    /// Start delivering metadata, time and end events
    fn subscribe(&mut self, subscription: Subscription);

    /// Stop delivering events
    fn unsubscribe(&mut self);
}

/// Factory for engine instances
///
/// Creating an engine binds it to `audio_url` and begins loading; it does
/// not start playback.
pub trait MediaBackend {
    type Engine: MediaEngine;

    fn create(&mut self, audio_url: &str) -> Self::Engine;
}
