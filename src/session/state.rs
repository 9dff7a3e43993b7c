use rand::Rng;

use crate::bank::{SentenceBank, SentenceItem};
use crate::engine::grader::Verdict;
use crate::session::mode::PracticeMode;
use crate::session::surface::{Draft, GapPolicy, Surface};

/// Everything the practice screen shows that is not persisted.
///
/// Transitions consume the old value and return the new one; the random
/// source and the bank are passed in so every rebuild is explicit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub mode: PracticeMode,
    pub index: usize,
    pub surface: Surface,
    pub feedback: Option<Verdict>,
}

impl SessionState {
    pub fn new<R: Rng + ?Sized>(
        bank: &SentenceBank,
        mode: PracticeMode,
        index: usize,
        gap_policy: GapPolicy,
        rng: &mut R,
    ) -> Self {
        let index = index % bank.size();
        Self {
            mode,
            index,
            surface: Surface::build(mode, bank.get(index), gap_policy, rng),
            feedback: None,
        }
    }

    /// Switch to `mode`, discarding the draft and feedback. Selecting the
    /// active mode again restarts it with a fresh shuffle.
    pub fn with_mode<R: Rng + ?Sized>(
        self,
        mode: PracticeMode,
        bank: &SentenceBank,
        gap_policy: GapPolicy,
        rng: &mut R,
    ) -> Self {
        Self::new(bank, mode, self.index, gap_policy, rng)
    }

    /// Move to the next sentence in the bank, wrapping at the end.
    pub fn advance<R: Rng + ?Sized>(
        self,
        bank: &SentenceBank,
        gap_policy: GapPolicy,
        rng: &mut R,
    ) -> Self {
        Self::new(bank, self.mode, bank.next(self.index), gap_policy, rng)
    }

    pub fn pick_token(mut self, slot: usize) -> Self {
        self.surface.pick(slot);
        self
    }

    pub fn move_token_to_end(mut self, pos: usize) -> Self {
        self.surface.move_to_end(pos);
        self
    }

    pub fn with_answer(mut self, text: &str) -> Self {
        self.surface.set_answer(text);
        self
    }

    pub fn with_feedback(mut self, verdict: Verdict) -> Self {
        self.feedback = Some(verdict);
        self
    }

    pub fn current<'b>(&self, bank: &'b SentenceBank) -> &'b SentenceItem {
        bank.get(self.index)
    }

    pub fn draft(&self) -> Draft {
        self.surface.draft()
    }

    /// Dictation keeps the target text hidden until an answer was graded.
    pub fn reveals_target(&self) -> bool {
        self.mode != PracticeMode::Dictation || self.feedback.is_some()
    }
}
