use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("no text-to-speech program is available")]
    Unavailable,
    #[error("speech is turned off")]
    Disabled,
    #[error("could not start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Fire-and-forget text-to-speech.
pub trait Speaker {
    /// Cancel anything still playing, then start announcing `text`.
    /// Must not wait for playback to finish.
    fn speak(&mut self, text: &str, language: &str) -> Result<(), SpeechError>;

    /// Reap a finished utterance. Called on every tick.
    fn poll(&mut self) {}
}

/// Known command-line synthesizers, in detection order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Engine {
    EspeakNg,
    Espeak,
    SpdSay,
    Say,
    /// User-configured program: receives the text as its last argument and
    /// the language tag in `SENTDRILL_TTS_LANG`.
    Custom,
}

impl Engine {
    const DETECT: [(Engine, &'static str); 4] = [
        (Engine::EspeakNg, "espeak-ng"),
        (Engine::Espeak, "espeak"),
        (Engine::SpdSay, "spd-say"),
        (Engine::Say, "say"),
    ];

    fn args(self, text: &str, language: &str) -> Vec<String> {
        let primary = language.split(['-', '_']).next().unwrap_or(language);
        match self {
            Engine::EspeakNg | Engine::Espeak => vec![
                "-v".to_string(),
                language.to_ascii_lowercase(),
                text.to_string(),
            ],
            Engine::SpdSay => vec![
                "-l".to_string(),
                primary.to_ascii_lowercase(),
                text.to_string(),
            ],
            Engine::Say | Engine::Custom => vec![text.to_string()],
        }
    }
}

/// Speaks by spawning an external synthesizer process.
pub struct CommandSpeaker {
    engine: Engine,
    program: PathBuf,
    current: Option<Child>,
}

impl CommandSpeaker {
    /// Use `command` when given, otherwise the first known synthesizer on `PATH`.
    pub fn detect(command: Option<&str>) -> Option<Self> {
        if let Some(command) = command {
            let program = resolve(command)?;
            return Some(Self::new(Engine::Custom, program));
        }
        Engine::DETECT
            .iter()
            .find_map(|(engine, name)| find_in_path(name).map(|p| Self::new(*engine, p)))
    }

    pub fn new(engine: Engine, program: PathBuf) -> Self {
        Self {
            engine,
            program,
            current: None,
        }
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.current.take() {
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&mut self, text: &str, language: &str) -> Result<(), SpeechError> {
        self.cancel();
        let child = Command::new(&self.program)
            .args(self.engine.args(text, language))
            .env("SENTDRILL_TTS_LANG", language)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SpeechError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;
        tracing::debug!(program = %self.program.display(), language, "speaking");
        self.current = Some(child);
        Ok(())
    }

    fn poll(&mut self) {
        if let Some(child) = self.current.as_mut()
            && !matches!(child.try_wait(), Ok(None))
        {
            self.current = None;
        }
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Stand-in when no synthesizer exists or speech was switched off.
pub struct NoSpeaker {
    disabled: bool,
}

impl NoSpeaker {
    pub fn unavailable() -> Self {
        Self { disabled: false }
    }

    pub fn disabled() -> Self {
        Self { disabled: true }
    }
}

impl Speaker for NoSpeaker {
    fn speak(&mut self, _text: &str, _language: &str) -> Result<(), SpeechError> {
        if self.disabled {
            Err(SpeechError::Disabled)
        } else {
            Err(SpeechError::Unavailable)
        }
    }
}

/// Pick the speaker for this run.
pub fn from_settings(enabled: bool, command: Option<&str>) -> Box<dyn Speaker> {
    if !enabled {
        return Box::new(NoSpeaker::disabled());
    }
    match CommandSpeaker::detect(command) {
        Some(speaker) => {
            tracing::info!(
                engine = ?speaker.engine(),
                program = %speaker.program.display(),
                "text-to-speech available"
            );
            Box::new(speaker)
        }
        None => {
            tracing::info!("no text-to-speech program found");
            Box::new(NoSpeaker::unavailable())
        }
    }
}

fn resolve(command: &str) -> Option<PathBuf> {
    let path = Path::new(command);
    if path.components().count() > 1 {
        return path.is_file().then(|| path.to_path_buf());
    }
    find_in_path(command)
}

fn find_in_path(name: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn espeak_gets_lowercase_voice() {
        let args = Engine::EspeakNg.args("Hello.", "en-US");
        assert_eq!(args, vec!["-v", "en-us", "Hello."]);
    }

    #[test]
    fn spd_say_gets_primary_subtag() {
        let args = Engine::SpdSay.args("Hello.", "en-US");
        assert_eq!(args, vec!["-l", "en", "Hello."]);
    }

    #[test]
    fn say_and_custom_get_text_only() {
        assert_eq!(Engine::Say.args("Hi", "en-US"), vec!["Hi"]);
        assert_eq!(Engine::Custom.args("Hi", "en-US"), vec!["Hi"]);
    }

    #[test]
    fn disabled_speaker_reports_disabled() {
        let mut speaker = from_settings(false, None);
        assert!(matches!(speaker.speak("hi", "en-US"), Err(SpeechError::Disabled)));
    }

    #[test]
    fn unavailable_speaker_reports_unavailable() {
        let mut speaker = NoSpeaker::unavailable();
        assert!(matches!(speaker.speak("hi", "en-US"), Err(SpeechError::Unavailable)));
    }

    #[test]
    fn missing_custom_command_is_not_detected() {
        assert!(CommandSpeaker::detect(Some("/definitely/not/a/tts-binary")).is_none());
        assert!(CommandSpeaker::detect(Some("sentdrill-no-such-tts")).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn new_utterance_cancels_the_previous_one() {
        let Some(sleep) = find_in_path("sleep") else {
            return;
        };
        let mut speaker = CommandSpeaker::new(Engine::Custom, sleep);
        speaker.speak("30", "en-US").unwrap();
        let first = speaker.current.as_ref().map(Child::id);
        speaker.speak("30", "en-US").unwrap();
        let second = speaker.current.as_ref().map(Child::id);
        assert_ne!(first, second);
        speaker.cancel();
        assert!(speaker.current.is_none());
    }
}
