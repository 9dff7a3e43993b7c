use anyhow::Result;
use crossterm::event::KeyEvent;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rust_i18n::t;

use crate::bank::{SentenceBank, SentenceItem};
use crate::config::Config;
use crate::engine::grader;
use crate::engine::stats::StatsStore;
use crate::session::mode::PracticeMode;
use crate::session::state::SessionState;
use crate::speech::{self, SpeechError, Speaker};
use crate::store::json_store::JsonStore;
use crate::store::memory::MemoryStore;
use crate::store::StatsPort;
use crate::ui::line_input::{InputResult, LineInput};
use crate::ui::theme::Theme;

/// Owns the one mutable [`SessionState`] and wires it to stats, speech and input.
pub struct App {
    pub bank: SentenceBank,
    pub session: SessionState,
    pub stats: StatsStore,
    pub config: Config,
    pub theme: &'static Theme,
    pub line_input: LineInput,
    /// Highlighted chip in click and drag modes.
    pub token_cursor: usize,
    pub notice: Option<String>,
    pub should_quit: bool,
    speaker: Box<dyn Speaker>,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let bank = SentenceBank::builtin()?;
        let loaded_theme = Theme::load(&config.theme).unwrap_or_else(|| {
            tracing::warn!(
                theme = %config.theme,
                available = ?Theme::available_themes(),
                "unknown theme, using the default"
            );
            Theme::default()
        });
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let port: Box<dyn StatsPort> = match JsonStore::new() {
            Ok(store) => Box::new(store),
            Err(err) => {
                tracing::warn!(error = %err, "stats directory unavailable, keeping stats in memory");
                Box::new(MemoryStore::default())
            }
        };
        let stats = StatsStore::open(port);
        let speaker = speech::from_settings(config.speech_enabled, config.speech_command.as_deref());

        Ok(Self::with_parts(
            bank,
            stats,
            speaker,
            config,
            theme,
            SmallRng::from_entropy(),
        ))
    }

    pub fn with_parts(
        bank: SentenceBank,
        stats: StatsStore,
        speaker: Box<dyn Speaker>,
        config: Config,
        theme: &'static Theme,
        mut rng: SmallRng,
    ) -> Self {
        let session = SessionState::new(&bank, config.default_mode, 0, config.gap_policy, &mut rng);
        let mut app = Self {
            bank,
            session,
            stats,
            config,
            theme,
            line_input: LineInput::default(),
            token_cursor: 0,
            notice: None,
            should_quit: false,
            speaker,
            rng,
        };
        app.on_new_surface();
        app
    }

    pub fn current(&self) -> &SentenceItem {
        self.session.current(&self.bank)
    }

    pub fn mode(&self) -> PracticeMode {
        self.session.mode
    }

    /// Switch modes. Choosing the active mode again restarts it.
    pub fn select_mode(&mut self, mode: PracticeMode) {
        let gap_policy = self.config.gap_policy;
        self.session = self
            .session
            .clone()
            .with_mode(mode, &self.bank, gap_policy, &mut self.rng);
        tracing::debug!(mode = %mode, "mode selected");
        self.on_new_surface();
    }

    pub fn cycle_mode(&mut self, forward: bool) {
        let mode = if forward {
            self.mode().next()
        } else {
            self.mode().prev()
        };
        self.select_mode(mode);
    }

    pub fn next_sentence(&mut self) {
        let gap_policy = self.config.gap_policy;
        self.session = self
            .session
            .clone()
            .advance(&self.bank, gap_policy, &mut self.rng);
        self.on_new_surface();
    }

    /// Grade the current draft and record the attempt.
    pub fn submit(&mut self) {
        let item = self.bank.get(self.session.index);
        let verdict = grader::submit(self.session.mode, &self.session.draft(), item, &mut self.stats);
        self.session = self.session.clone().with_feedback(verdict);
    }

    /// Read the current target sentence aloud. Problems become a notice.
    pub fn speak(&mut self) {
        let language = self
            .config
            .speech_language
            .as_deref()
            .unwrap_or_else(|| self.bank.target_language());
        let text = &self.bank.get(self.session.index).target_text;

        self.notice = match self.speaker.speak(text, language) {
            Ok(()) => None,
            Err(SpeechError::Unavailable) => Some(t!("notice.speech_unavailable").to_string()),
            Err(SpeechError::Disabled) => Some(t!("notice.speech_disabled").to_string()),
            Err(err) => {
                tracing::warn!(error = %err, "speech failed");
                Some(t!("notice.speech_failed", error = err.to_string()).to_string())
            }
        };
    }

    pub fn move_token_cursor(&mut self, forward: bool) {
        let len = self.session.surface.tokens().len();
        if len == 0 {
            return;
        }
        self.token_cursor = if forward {
            (self.token_cursor + 1) % len
        } else {
            (self.token_cursor + len - 1) % len
        };
    }

    /// Pick (click) or send to the end (drag) the chip under the cursor.
    pub fn activate_token(&mut self) {
        self.activate_slot(self.token_cursor);
    }

    pub fn activate_slot(&mut self, slot: usize) {
        match self.mode() {
            PracticeMode::Click => {
                self.session = self.session.clone().pick_token(slot);
                self.token_cursor = self.next_unpicked(slot);
            }
            PracticeMode::Drag => {
                self.session = self.session.clone().move_token_to_end(slot);
            }
            _ => {}
        }
    }

    /// Feed a key to the answer box. Returns false when the box ignores it.
    pub fn handle_text_key(&mut self, key: KeyEvent) -> bool {
        let result = self.line_input.handle(key);
        self.apply_input(result)
    }

    /// Paste into the answer box; ignored in the token modes.
    pub fn paste(&mut self, text: &str) {
        if self.mode().uses_text() {
            let result = self.line_input.insert_str(text);
            self.apply_input(result);
        }
    }

    fn apply_input(&mut self, result: InputResult) -> bool {
        match result {
            InputResult::Edited => {
                self.session = self.session.clone().with_answer(self.line_input.value());
                true
            }
            InputResult::Moved => true,
            InputResult::Submit => {
                self.submit();
                true
            }
            InputResult::Cancel => false,
        }
    }

    pub fn tick(&mut self) {
        self.speaker.poll();
    }

    pub fn status_line(&self) -> String {
        let id = &self.current().id;
        let entry = self.stats.entry(id);
        t!(
            "status.current",
            attempts = entry.attempts,
            accuracy = self.stats.accuracy_for(id)
        )
        .to_string()
    }

    pub fn totals_line(&self) -> String {
        let summary = self.stats.summary();
        t!(
            "status.totals",
            practiced = summary.practiced,
            total = self.bank.size(),
            accuracy = summary.accuracy_label()
        )
        .to_string()
    }

    /// Key hints for the footer, most important first.
    pub fn hints(&self) -> Vec<String> {
        let mut hints = vec![t!("hint.submit"), t!("hint.next"), t!("hint.speak")];
        match self.mode() {
            PracticeMode::Click => hints.push(t!("hint.pick")),
            PracticeMode::Drag => hints.push(t!("hint.reorder")),
            _ => hints.push(t!("hint.edit")),
        }
        hints.push(t!("hint.modes"));
        hints.push(t!("hint.quit"));
        hints.into_iter().map(|h| h.to_string()).collect()
    }

    /// Reset per-surface UI state after the session was rebuilt.
    fn on_new_surface(&mut self) {
        self.line_input.clear();
        self.token_cursor = 0;
        self.notice = None;
        if self.mode() == PracticeMode::Dictation {
            self.speak();
        }
    }

    fn next_unpicked(&self, from: usize) -> usize {
        let len = self.session.surface.tokens().len();
        (1..=len)
            .map(|step| (from + step) % len.max(1))
            .find(|&slot| !self.session.surface.is_picked(slot))
            .unwrap_or(from)
    }
}
