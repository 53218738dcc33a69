//! Completion alert playback

use std::{
    fmt::Debug,
    io::{self, Write},
    path::Path,
    sync::Arc,
};
use tracing::{info, warn};

/// One-shot action fired when a countdown reaches zero
pub trait Alert: Debug + Send + Sync {
    fn play(&self);
}

/// Rings the terminal bell on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl Alert for TerminalBell {
    fn play(&self) {
        let mut stdout = io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
            warn!("Failed to ring terminal bell: {}", e);
        }
    }
}

#[cfg(feature = "audio")]
pub use sound::Sound;

#[cfg(feature = "audio")]
mod sound {
    use std::{
        fmt::Debug,
        io::{self, Cursor, Read},
        path::Path,
        sync::Arc,
    };
    use tracing::{debug, warn};

    use super::Alert;

    /// An audio asset held in memory so every playback decodes a fresh cursor
    #[derive(Debug, Clone)]
    pub struct Sound(Arc<[u8]>);

    impl AsRef<[u8]> for Sound {
        fn as_ref(&self) -> &[u8] {
            &self.0
        }
    }

    impl Sound {
        pub fn load<P>(path: P) -> io::Result<Sound>
        where
            P: AsRef<Path> + Debug,
        {
            let mut buf = Vec::new();
            std::fs::File::open(path)?.read_to_end(&mut buf)?;
            Ok(Sound(Arc::from(buf)))
        }

        fn play_blocking(&self) -> anyhow::Result<()> {
            let decoder = rodio::Decoder::new(Cursor::new(self.clone()))?;
            let (_stream, handle) = rodio::OutputStream::try_default()?;
            let sink = rodio::Sink::try_new(&handle)?;
            sink.append(decoder);
            sink.sleep_until_end();
            Ok(())
        }
    }

    impl Alert for Sound {
        fn play(&self) {
            let sound = self.clone();
            tokio::task::spawn_blocking(move || {
                if let Err(e) = sound.play_blocking() {
                    warn!("Failed to play alert sound: {}", e);
                }
            });
            debug!("Alert sound dispatched");
        }
    }
}

/// Pick the alert backend for an optional asset path
pub fn load_alert(sound_file: Option<&Path>) -> io::Result<Arc<dyn Alert>> {
    match sound_file {
        #[cfg(feature = "audio")]
        Some(path) => {
            let sound = Sound::load(path)?;
            info!("Loaded alert sound from {}", path.display());
            Ok(Arc::new(sound))
        }
        #[cfg(not(feature = "audio"))]
        Some(path) => {
            warn!(
                "Built without the audio feature, ignoring {} and using the terminal bell",
                path.display()
            );
            Ok(Arc::new(TerminalBell))
        }
        None => {
            info!("No alert sound configured, using the terminal bell");
            Ok(Arc::new(TerminalBell))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_bell_without_a_file() {
        let alert = load_alert(None).unwrap();
        assert_eq!(format!("{:?}", alert), "TerminalBell");
    }

    #[cfg(feature = "audio")]
    #[test]
    fn missing_sound_file_is_an_error() {
        assert!(load_alert(Some(Path::new("/nonexistent/alert.opus"))).is_err());
    }
}
