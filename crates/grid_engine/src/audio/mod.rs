//! Audio collaborator
//!
//! Entities ask for sounds through the scene context; what actually plays
//! them is up to the application.

/// Sound output used by entities
pub trait AudioPlayer {
    /// Play the sound at `source`, optionally looping, at `volume` in `0.0..=1.0`
    fn play_sound(&mut self, source: &str, looped: bool, volume: f32);
}

/// Player that only logs what it was asked to play
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioPlayer for SilentAudio {
    fn play_sound(&mut self, source: &str, looped: bool, volume: f32) {
        log::debug!("Sound '{}' requested (looped: {}, volume: {:.2})", source, looped, volume);
    }
}

/// A sound request captured by [`QueuedAudio`]
#[derive(Debug, Clone, PartialEq)]
pub struct SoundRequest {
    /// Sound source
    pub source: String,
    /// Loop until stopped
    pub looped: bool,
    /// Volume, clamped to `0.0..=1.0`
    pub volume: f32,
}

/// Player that queues requests for a backend to drain once per frame
#[derive(Debug, Default, Clone)]
pub struct QueuedAudio {
    requests: Vec<SoundRequest>,
}

impl QueuedAudio {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests queued so far
    pub fn requests(&self) -> &[SoundRequest] {
        &self.requests
    }

    /// Hand over the queued requests
    pub fn drain(&mut self) -> Vec<SoundRequest> {
        std::mem::take(&mut self.requests)
    }
}

impl AudioPlayer for QueuedAudio {
    fn play_sound(&mut self, source: &str, looped: bool, volume: f32) {
        self.requests.push(SoundRequest {
            source: source.to_owned(),
            looped,
            volume: volume.clamp(0.0, 1.0),
        });
    }
}
