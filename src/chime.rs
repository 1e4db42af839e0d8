use std::cell::RefCell;
use std::io::Write;
use std::process::{Child, Command, Stdio};
use thiserror::Error;

use crate::config::{ChimeKind, Config};

#[derive(Debug, Error)]
pub enum ChimeError {
    #[error("Audio device unavailable: {0}")]
    Unavailable(String),
    #[error("Chime command not configured")]
    NoCommand,
}

/// A short tone request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub duration_ms: u32,
    pub frequency_hz: u32,
}

impl Tone {
    /// The cue played when a reminder becomes due
    pub const DUE: Tone = Tone {
        duration_ms: 600,
        frequency_hz: 880,
    };
}

/// Something that can make a sound. Callers treat failures as non-fatal.
pub trait Chime {
    fn play(&self, tone: Tone) -> Result<(), ChimeError>;
}

/// Rings the terminal bell on stdout
pub struct BellChime;

impl Chime for BellChime {
    fn play(&self, _tone: Tone) -> Result<(), ChimeError> {
        let mut stdout = std::io::stdout();
        stdout
            .write_all(b"\x07")
            .and_then(|_| stdout.flush())
            .map_err(|e| ChimeError::Unavailable(e.to_string()))
    }
}

/// Runs an external player, e.g. `["paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"]`.
///
/// Players run in the background. Finished ones are reaped on the next play
/// and when the chime is dropped.
pub struct CommandChime {
    argv: Vec<String>,
    players: RefCell<Vec<Child>>,
}

impl CommandChime {
    pub fn new(argv: Vec<String>) -> Self {
        Self {
            argv,
            players: RefCell::new(Vec::new()),
        }
    }

    /// Collect exited players and return how many are still running
    pub fn reap(&self) -> usize {
        let mut players = self.players.borrow_mut();
        players.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                if !status.success() {
                    tracing::debug!(%status, "chime player exited with failure");
                }
                false
            }
            Ok(None) => true,
            Err(e) => {
                tracing::debug!(error = %e, "could not poll chime player");
                false
            }
        });
        players.len()
    }
}

impl Chime for CommandChime {
    fn play(&self, tone: Tone) -> Result<(), ChimeError> {
        self.reap();
        let (program, args) = self.argv.split_first().ok_or(ChimeError::NoCommand)?;
        let child = Command::new(program)
            .args(args)
            .env("MEDITRAK_TONE_MS", tone.duration_ms.to_string())
            .env("MEDITRAK_TONE_HZ", tone.frequency_hz.to_string())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ChimeError::Unavailable(format!("{}: {}", program, e)))?;
        self.players.borrow_mut().push(child);
        Ok(())
    }
}

impl Drop for CommandChime {
    fn drop(&mut self) {
        let running = self.reap();
        if running > 0 {
            tracing::debug!(running, "chime players still running at shutdown");
        }
    }
}

pub struct SilentChime;

impl Chime for SilentChime {
    fn play(&self, _tone: Tone) -> Result<(), ChimeError> {
        Ok(())
    }
}

/// Build the chime selected in the config
pub fn from_config(config: &Config) -> Box<dyn Chime> {
    match config.chime {
        ChimeKind::Bell => Box::new(BellChime),
        ChimeKind::Command => Box::new(CommandChime::new(config.chime_command.clone())),
        ChimeKind::Off => Box::new(SilentChime),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_is_an_error() {
        let chime = CommandChime::new(Vec::new());
        assert!(matches!(chime.play(Tone::DUE), Err(ChimeError::NoCommand)));
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let chime = CommandChime::new(vec!["meditrak-no-such-player-binary".to_string()]);
        assert!(matches!(chime.play(Tone::DUE), Err(ChimeError::Unavailable(_))));
    }

    /// Exited children of this process that nobody has waited on
    #[cfg(target_os = "linux")]
    fn zombie_children() -> usize {
        let me = std::process::id().to_string();
        let Ok(entries) = std::fs::read_dir("/proc") else {
            return 0;
        };
        entries
            .filter_map(|e| e.ok())
            .filter_map(|e| std::fs::read_to_string(e.path().join("stat")).ok())
            .filter(|stat| {
                // "pid (comm) state ppid ..."; comm may contain spaces
                let Some(rest) = stat.rfind(')').map(|i| &stat[i + 1..]) else {
                    return false;
                };
                let mut fields = rest.split_whitespace();
                fields.next() == Some("Z") && fields.next() == Some(me.as_str())
            })
            .count()
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_finished_players_are_reaped() {
        let chime = CommandChime::new(vec!["true".to_string()]);
        for _ in 0..5 {
            chime.play(Tone::DUE).unwrap();
        }

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while chime.reap() > 0 && std::time::Instant::now() < deadline {
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        assert_eq!(chime.reap(), 0);
        assert_eq!(zombie_children(), 0);
    }

    #[test]
    fn test_from_config_off_is_silent() {
        let mut config = Config::default();
        config.chime = ChimeKind::Off;
        assert!(from_config(&config).play(Tone::DUE).is_ok());
    }
}
