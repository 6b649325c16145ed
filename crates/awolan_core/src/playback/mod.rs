//! Audio playback seam between core state and the platform decoder.
//!
//! # Responsibility
//! - Define the engine/handle contracts the host implements natively.
//! - Define the discrete status events delivered back to the state machine.
//!
//! # Invariants
//! - Handles are created paused; playback starts only on an explicit `play`.
//! - Dropping a handle releases the underlying media resource.
//! - Every event is tagged with the play session it belongs to; consumers
//!   discard events whose session is no longer live.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type EngineResult<T> = Result<T, EngineError>;

/// Monotonic token identifying one `play_track` lifetime.
///
/// Bumped on every track change, so completions from an abandoned load can
/// never clobber the state of the track that replaced it.
pub type PlaySession = u64;

/// Media-engine failure. Callers log these and degrade to a safe idle
/// state; they are never surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    Load { uri: String, message: String },
    Transport { op: &'static str, message: String },
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load { uri, message } => write!(f, "failed to load media `{uri}`: {message}"),
            Self::Transport { op, message } => write!(f, "media {op} failed: {message}"),
        }
    }
}

impl Error for EngineError {}

/// Playback status update from the engine, delivered as a discrete event
/// to one transition handler instead of ad hoc completion callbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// Media is fully loaded and ready to start.
    Loaded,
    /// Periodic position report while playing.
    Progress { position_ms: u64 },
    /// Natural end of the media.
    Finished,
    /// The engine gave up on this handle.
    Error { message: String },
}

/// Platform audio decoder. Implemented natively by the host; core only
/// ever talks to this trait.
pub trait AudioEngine: Send + Sync {
    /// Creates a paused handle for a media reference (`asset:` uri or
    /// device-local path).
    fn load(&self, uri: &str) -> EngineResult<Box<dyn AudioHandle>>;
}

/// One loaded piece of media. Dropping the handle releases it.
pub trait AudioHandle: Send {
    fn play(&mut self) -> EngineResult<()>;
    fn pause(&mut self) -> EngineResult<()>;
    fn stop(&mut self) -> EngineResult<()>;
    fn set_volume(&mut self, volume: f64) -> EngineResult<()>;
}

/// Engine that accepts every request and plays nothing.
///
/// Stands in wherever no platform decoder is wired: tests, the CLI smoke
/// binary, and host setups that drive audio fully natively while still
/// letting core own the transport state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEngine;

impl AudioEngine for NullEngine {
    fn load(&self, _uri: &str) -> EngineResult<Box<dyn AudioHandle>> {
        Ok(Box::new(NullHandle))
    }
}

struct NullHandle;

impl AudioHandle for NullHandle {
    fn play(&mut self) -> EngineResult<()> {
        Ok(())
    }

    fn pause(&mut self) -> EngineResult<()> {
        Ok(())
    }

    fn stop(&mut self) -> EngineResult<()> {
        Ok(())
    }

    fn set_volume(&mut self, _volume: f64) -> EngineResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AudioEngine, EngineError, NullEngine};

    #[test]
    fn null_engine_loads_and_transports_without_error() {
        let engine = NullEngine;
        let mut handle = engine.load("asset:music/peaceful_melody.mp3").unwrap();
        handle.set_volume(0.5).unwrap();
        handle.play().unwrap();
        handle.pause().unwrap();
        handle.stop().unwrap();
    }

    #[test]
    fn engine_errors_render_their_context() {
        let load = EngineError::Load {
            uri: "/files/gone.mp3".to_string(),
            message: "no such file".to_string(),
        };
        assert!(load.to_string().contains("/files/gone.mp3"));

        let transport = EngineError::Transport {
            op: "play",
            message: "device busy".to_string(),
        };
        assert!(transport.to_string().contains("play"));
    }
}
