use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Volume of the player's laser sound
const LASER_VOLUME: f32 = 0.05;

/// Audio manager for playing sound effects
pub struct AudioManager {
    output: Option<(OutputStream, OutputStreamHandle)>,
    /// Pre-loaded and buffered laser sound (None if loading failed)
    laser_sound: Option<Buffered<Decoder<BufReader<File>>>>,
}

impl AudioManager {
    /// Opens the default output device and pre-loads the laser sound
    pub fn new(sound_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let (stream, stream_handle) = OutputStream::try_default()?;

        let file = File::open(sound_path)?;
        let source = Decoder::new(BufReader::new(file))?;

        Ok(Self {
            output: Some((stream, stream_handle)),
            laser_sound: Some(source.buffered()),
        })
    }

    /// An audio manager that never makes a sound
    pub fn silent() -> Self {
        Self {
            output: None,
            laser_sound: None,
        }
    }

    /// Like [`AudioManager::new`], but falls back to silence on failure
    pub fn new_or_silent(sound_path: &Path) -> Self {
        Self::new(sound_path).unwrap_or_else(|err| {
            log::warn!(
                "Failed to initialize audio from {}: {}; continuing without sound",
                sound_path.display(),
                err
            );
            Self::silent()
        })
    }

    pub fn play_laser(&self) {
        self.play_laser_volume(LASER_VOLUME);
    }

    pub fn play_laser_volume(&self, volume: f32) {
        if let (Some((_, handle)), Some(sound)) = (&self.output, &self.laser_sound) {
            // Playback errors never stop the game
            if let Ok(sink) = Sink::try_new(handle) {
                sink.set_volume(volume);
                sink.append(sound.clone());
                sink.detach();
            }
        }
    }
}
