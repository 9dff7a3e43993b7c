use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bank::SentenceItem;
use crate::engine::normalize::normalize;
use crate::engine::shuffle::shuffled;
use crate::session::mode::PracticeMode;

pub const BLANK: &str = "____";

/// Which token the gap mode hides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GapPolicy {
    /// The token before the last one, i.e. the last word when the sentence
    /// ends in a punctuation token.
    #[default]
    SecondToLast,
    /// Uniformly random among tokens that are not pure punctuation.
    Random,
}

impl GapPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            GapPolicy::SecondToLast => "second-to-last",
            GapPolicy::Random => "random",
        }
    }

    pub fn pick<R: Rng + ?Sized>(self, words: &[String], rng: &mut R) -> usize {
        match self {
            GapPolicy::SecondToLast => words.len().saturating_sub(2),
            GapPolicy::Random => {
                let candidates: Vec<usize> = words
                    .iter()
                    .enumerate()
                    .filter(|(_, w)| !normalize(w).is_empty())
                    .map(|(i, _)| i)
                    .collect();
                if candidates.is_empty() {
                    return if words.is_empty() { 0 } else { rng.gen_range(0..words.len()) };
                }
                candidates[rng.gen_range(0..candidates.len())]
            }
        }
    }
}

/// The learner's ungraded answer, in the shape its mode collects it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Draft {
    Tokens(Vec<String>),
    Text(String),
    Blank { index: usize, answer: String },
}

impl Draft {
    /// The answer as one string; token drafts are joined with spaces.
    pub fn as_text(&self) -> String {
        match self {
            Draft::Tokens(tokens) => tokens.join(" "),
            Draft::Text(text) => text.clone(),
            Draft::Blank { answer, .. } => answer.clone(),
        }
    }
}

/// Presentation state for the active mode together with the draft it collects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Surface {
    Click { tokens: Vec<String>, picked: Vec<usize> },
    Drag { order: Vec<String> },
    Gap { hidden: usize, answer: String },
    Input { answer: String },
    Dictation { answer: String },
}

impl Surface {
    /// Fresh surface for `item`: reshuffles tokens or reselects the blank.
    pub fn build<R: Rng + ?Sized>(
        mode: PracticeMode,
        item: &SentenceItem,
        gap_policy: GapPolicy,
        rng: &mut R,
    ) -> Self {
        match mode {
            PracticeMode::Click => Surface::Click {
                tokens: shuffled(&item.target_words, rng),
                picked: Vec::new(),
            },
            PracticeMode::Drag => Surface::Drag {
                order: shuffled(&item.target_words, rng),
            },
            PracticeMode::Gap => Surface::Gap {
                hidden: gap_policy.pick(&item.target_words, rng),
                answer: String::new(),
            },
            PracticeMode::Input => Surface::Input {
                answer: String::new(),
            },
            PracticeMode::Dictation => Surface::Dictation {
                answer: String::new(),
            },
        }
    }

    pub fn draft(&self) -> Draft {
        match self {
            Surface::Click { tokens, picked } => {
                Draft::Tokens(picked.iter().map(|&slot| tokens[slot].clone()).collect())
            }
            Surface::Drag { order } => Draft::Tokens(order.clone()),
            Surface::Gap { hidden, answer } => Draft::Blank {
                index: *hidden,
                answer: answer.clone(),
            },
            Surface::Input { answer } | Surface::Dictation { answer } => {
                Draft::Text(answer.clone())
            }
        }
    }

    /// Tokens in presentation order (click and drag only).
    pub fn tokens(&self) -> &[String] {
        match self {
            Surface::Click { tokens, .. } => tokens,
            Surface::Drag { order } => order,
            _ => &[],
        }
    }

    pub fn is_picked(&self, slot: usize) -> bool {
        matches!(self, Surface::Click { picked, .. } if picked.contains(&slot))
    }

    /// Appends the token at `slot` to a click draft. Returns false when the
    /// slot is out of range or was already picked.
    pub fn pick(&mut self, slot: usize) -> bool {
        match self {
            Surface::Click { tokens, picked } if slot < tokens.len() && !picked.contains(&slot) => {
                picked.push(slot);
                true
            }
            _ => false,
        }
    }

    /// Moves the drag token at `pos` to the end of the row.
    pub fn move_to_end(&mut self, pos: usize) -> bool {
        match self {
            Surface::Drag { order } if pos < order.len() => {
                let token = order.remove(pos);
                order.push(token);
                true
            }
            _ => false,
        }
    }

    /// Replaces the typed answer (gap, input and dictation only).
    pub fn set_answer(&mut self, text: &str) -> bool {
        match self {
            Surface::Gap { answer, .. }
            | Surface::Input { answer }
            | Surface::Dictation { answer } => {
                text.clone_into(answer);
                true
            }
            _ => false,
        }
    }

    pub fn answer(&self) -> Option<&str> {
        match self {
            Surface::Gap { answer, .. }
            | Surface::Input { answer }
            | Surface::Dictation { answer } => Some(answer),
            _ => None,
        }
    }

    /// The sentence with the hidden token replaced by [`BLANK`].
    pub fn blanked_line(&self, item: &SentenceItem) -> Option<String> {
        let Surface::Gap { hidden, .. } = self else {
            return None;
        };
        let line = item
            .target_words
            .iter()
            .enumerate()
            .map(|(i, w)| if i == *hidden { BLANK } else { w.as_str() })
            .collect::<Vec<_>>()
            .join(" ");
        Some(line)
    }
}
