pub mod chime;
pub mod throttle;

pub use chime::AlertChime;
pub use throttle::AlertThrottle;

use log::warn;
use rodio::{OutputStream, Sink};
use std::sync::{
    mpsc::{self, Sender},
    Arc, Mutex,
};
use std::thread;

enum AudioCommand {
    PlayCue,
    Shutdown,
}

struct PlayerInner {
    tx: Mutex<Option<Sender<AudioCommand>>>,
}

impl Drop for PlayerInner {
    fn drop(&mut self) {
        let guard = match self.tx.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(tx) = guard.as_ref() {
            let _ = tx.send(AudioCommand::Shutdown);
        }
    }
}

/// Fire-and-forget playback of the distraction cue.
///
/// A dedicated thread owns the non-Send rodio objects; the thread is spawned
/// lazily on the first cue and told to exit on [`AlertPlayer::shutdown`] or
/// when the last handle drops. A missing or broken audio device is logged
/// and swallowed, never surfaced into session accounting.
#[derive(Clone)]
pub struct AlertPlayer {
    inner: Arc<PlayerInner>,
}

impl AlertPlayer {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(PlayerInner {
                tx: Mutex::new(None),
            }),
        }
    }

    fn ensure_thread(&self) -> Result<Sender<AudioCommand>, String> {
        let mut guard = self.inner.tx.lock().map_err(|e| e.to_string())?;
        if let Some(tx) = guard.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<AudioCommand>();

        // Dedicated thread holding the output stream and sink.
        thread::Builder::new()
            .name("focus-alerts".to_string())
            .spawn(move || {
                let mut _stream: Option<OutputStream> = None;
                let mut sink: Option<Sink> = None;

                fn ensure_sink(
                    stream: &mut Option<OutputStream>,
                    sink: &mut Option<Sink>,
                ) -> Result<(), String> {
                    if sink.is_none() {
                        let (s, handle) = OutputStream::try_default()
                            .map_err(|e| format!("failed to open audio output: {}", e))?;
                        let new_sink = Sink::try_new(&handle)
                            .map_err(|e| format!("failed to create audio sink: {}", e))?;
                        *stream = Some(s);
                        *sink = Some(new_sink);
                    }
                    Ok(())
                }

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        AudioCommand::PlayCue => {
                            if let Err(err) = ensure_sink(&mut _stream, &mut sink) {
                                warn!("distraction cue skipped: {err}");
                                continue;
                            }
                            if let Some(ref s) = sink {
                                s.append(AlertChime::new());
                            }
                        }
                        AudioCommand::Shutdown => {
                            if let Some(s) = sink.take() {
                                s.stop();
                            }
                            break;
                        }
                    }
                }
            })
            .map_err(|e| e.to_string())?;

        let tx_clone = tx.clone();
        *guard = Some(tx);
        Ok(tx_clone)
    }

    /// Queue the multi-tone cue. Playback errors on the audio thread are
    /// logged there; this only fails if the thread cannot be reached.
    pub fn play_cue(&self) -> Result<(), String> {
        let tx = self.ensure_thread()?;
        tx.send(AudioCommand::PlayCue).map_err(|e| e.to_string())
    }

    /// Tell the audio thread to stop any queued cues and exit.
    pub fn shutdown(&self) {
        if let Ok(mut guard) = self.inner.tx.lock() {
            if let Some(tx) = guard.take() {
                let _ = tx.send(AudioCommand::Shutdown);
            }
        }
    }
}

impl Default for AlertPlayer {
    fn default() -> Self {
        Self::new()
    }
}
