use rust_i18n::t;

use crate::bank::SentenceItem;
use crate::engine::normalize::equivalent;
use crate::engine::stats::StatsStore;
use crate::session::mode::PracticeMode;
use crate::session::surface::Draft;

/// Outcome of grading one draft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub correct: bool,
    /// The answer the draft was compared against: the full sentence, or the
    /// hidden word in gap mode.
    pub expected: String,
    pub message: String,
}

/// What `draft` has to match for `item`.
pub fn expected_answer<'a>(draft: &Draft, item: &'a SentenceItem) -> &'a str {
    match draft {
        Draft::Blank { index, .. } => item
            .target_words
            .get(*index)
            .map(String::as_str)
            .unwrap_or_default(),
        Draft::Tokens(_) | Draft::Text(_) => &item.target_text,
    }
}

/// Compare `draft` against `item` without touching any stats.
pub fn grade(mode: PracticeMode, draft: &Draft, item: &SentenceItem) -> Verdict {
    let expected = expected_answer(draft, item);
    let correct = equivalent(&draft.as_text(), expected);

    let message = if correct {
        t!("feedback.correct").to_string()
    } else if matches!(draft, Draft::Blank { .. }) {
        t!("feedback.wrong_word", answer = expected).to_string()
    } else {
        t!("feedback.wrong_sentence", answer = expected).to_string()
    };

    tracing::debug!(mode = %mode, sentence = %item.id, correct, "graded");

    Verdict {
        correct,
        expected: expected.to_string(),
        message,
    }
}

/// Grade `draft` and record the attempt for `item` in `stats`.
pub fn submit(
    mode: PracticeMode,
    draft: &Draft,
    item: &SentenceItem,
    stats: &mut StatsStore,
) -> Verdict {
    let verdict = grade(mode, draft, item);
    stats.record(&item.id, verdict.correct);
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::normalize::normalize;
    use crate::store::memory::MemoryStore;

    fn driver() -> SentenceItem {
        SentenceItem::new("driver-no-change", "司机不找零。", "The driver doesn't give change.")
    }

    fn busy() -> SentenceItem {
        SentenceItem::new("busy-morning", "今天早上我很忙。", "I was very busy this morning.")
    }

    fn gap(answer: &str) -> Draft {
        Draft::Blank {
            index: 5,
            answer: answer.to_string(),
        }
    }

    #[test]
    fn input_ignores_case_and_trailing_period() {
        let draft = Draft::Text("the driver doesn't give change".into());
        let v = grade(PracticeMode::Input, &draft, &driver());
        assert!(v.correct);
        assert_eq!(v.expected, "The driver doesn't give change.");
    }

    #[test]
    fn gap_compares_hidden_word_only() {
        let item = busy();
        assert!(grade(PracticeMode::Gap, &gap("Morning"), &item).correct);
        assert!(grade(PracticeMode::Gap, &gap("morning!"), &item).correct);
        assert!(grade(PracticeMode::Gap, &gap("  MORNING  "), &item).correct);
        assert!(!grade(PracticeMode::Gap, &gap("evening"), &item).correct);
        assert!(!grade(PracticeMode::Gap, &gap("this morning"), &item).correct);
    }

    #[test]
    fn wrong_gap_message_names_hidden_word() {
        let v = grade(PracticeMode::Gap, &gap("evening"), &busy());
        assert!(!v.correct);
        assert_eq!(v.expected, "morning");
        assert!(v.message.contains("morning"), "message: {}", v.message);
    }

    #[test]
    fn wrong_sentence_message_contains_full_answer() {
        let v = grade(PracticeMode::Input, &Draft::Text("the driver".into()), &driver());
        assert!(!v.correct);
        assert!(v.message.contains("The driver doesn't give change."));
    }

    #[test]
    fn tokens_are_joined_before_comparison() {
        let words = driver().target_words.clone();
        let v = grade(PracticeMode::Click, &Draft::Tokens(words), &driver());
        assert!(v.correct);

        let mut shuffled = driver().target_words.clone();
        shuffled.swap(0, 1);
        assert!(!grade(PracticeMode::Drag, &Draft::Tokens(shuffled), &driver()).correct);
    }

    #[test]
    fn empty_draft_is_graded_not_rejected() {
        let v = grade(PracticeMode::Input, &Draft::Text(String::new()), &driver());
        assert!(!v.correct);
        let v = grade(PracticeMode::Click, &Draft::Tokens(Vec::new()), &driver());
        assert!(!v.correct);
    }

    #[test]
    fn correct_iff_normalized_forms_match() {
        let item = driver();
        let drafts = [
            "The driver doesn't give change.",
            "THE DRIVER DOESN'T GIVE CHANGE",
            "the   driver doesn't give change!!",
            "the driver doesnt give change",
            "driver the doesn't give change",
            "",
        ];
        for d in drafts {
            let v = grade(PracticeMode::Input, &Draft::Text(d.into()), &item);
            assert_eq!(v.correct, normalize(d) == normalize(&item.target_text), "draft {d:?}");
        }
    }

    #[test]
    fn submit_records_every_attempt() {
        let item = busy();
        let mut stats = StatsStore::open(Box::new(MemoryStore::default()));
        submit(PracticeMode::Gap, &gap("Morning"), &item, &mut stats);
        submit(PracticeMode::Gap, &gap("noon"), &item, &mut stats);
        let entry = stats.entry("busy-morning");
        assert_eq!(entry.attempts, 2);
        assert_eq!(entry.correct, 1);
        assert!(entry.correct <= entry.attempts);
    }

    #[test]
    fn out_of_range_blank_expects_empty() {
        let draft = Draft::Blank {
            index: 99,
            answer: "x".into(),
        };
        assert_eq!(expected_answer(&draft, &busy()), "");
    }
}
