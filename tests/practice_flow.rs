use std::fs;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use regex::Regex;
use tempfile::TempDir;

use sentdrill::bank::SentenceBank;
use sentdrill::engine::grader;
use sentdrill::engine::stats::StatsStore;
use sentdrill::session::mode::PracticeMode;
use sentdrill::session::state::SessionState;
use sentdrill::session::surface::{Draft, GapPolicy, Surface};
use sentdrill::store::StatsPort;
use sentdrill::store::json_store::JsonStore;
use sentdrill::store::schema::STATS_KEY;

fn open_stats(dir: &TempDir) -> StatsStore {
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    StatsStore::open(Box::new(store))
}

/// Pick click chips in the order that rebuilds the target sentence.
fn solve_click(state: SessionState, target: &[String]) -> SessionState {
    let mut state = state;
    for word in target {
        let slot = state
            .surface
            .tokens()
            .iter()
            .enumerate()
            .position(|(slot, token)| token == word && !state.surface.is_picked(slot))
            .unwrap();
        state = state.pick_token(slot);
    }
    state
}

#[test]
fn a_full_round_through_every_mode_is_persisted() {
    let dir = TempDir::new().unwrap();
    let bank = SentenceBank::builtin().unwrap();
    let mut stats = open_stats(&dir);
    let mut rng = SmallRng::seed_from_u64(2024);
    let policy = GapPolicy::SecondToLast;

    let mut state = SessionState::new(&bank, PracticeMode::Click, 0, policy, &mut rng);
    let item = state.current(&bank).clone();

    state = solve_click(state, &item.target_words);
    let verdict = grader::submit(state.mode, &state.draft(), &item, &mut stats);
    assert!(verdict.correct, "{}", verdict.message);

    state = state.with_mode(PracticeMode::Gap, &bank, policy, &mut rng);
    let hidden = item.target_words[item.target_words.len() - 2].to_uppercase();
    state = state.with_answer(&hidden);
    assert!(grader::submit(state.mode, &state.draft(), &item, &mut stats).correct);

    state = state.with_mode(PracticeMode::Input, &bank, policy, &mut rng);
    state = state.with_answer("something else entirely");
    let verdict = grader::submit(state.mode, &state.draft(), &item, &mut stats);
    assert!(!verdict.correct);
    assert!(verdict.message.contains(&item.target_text));

    state = state.with_mode(PracticeMode::Dictation, &bank, policy, &mut rng);
    state = state.with_answer(&item.target_text.to_lowercase());
    assert!(grader::submit(state.mode, &state.draft(), &item, &mut stats).correct);

    assert_eq!(stats.entry(&item.id).attempts, 4);
    assert_eq!(stats.accuracy_for(&item.id), "75%");
    drop(stats);

    let reopened = open_stats(&dir);
    let entry = reopened.entry(&item.id);
    assert_eq!((entry.attempts, entry.correct), (4, 3));
    assert!(entry.last_practiced.is_some());
    assert_eq!(reopened.summary().practiced, 1);
}

#[test]
fn drag_draft_is_graded_in_presented_order() {
    let bank = SentenceBank::builtin().unwrap();
    let dir = TempDir::new().unwrap();
    let mut stats = open_stats(&dir);
    let mut rng = SmallRng::seed_from_u64(9);
    let index = bank.position("missed-last-bus").unwrap();
    let item = bank.get(index).clone();

    let mut state = SessionState::new(&bank, PracticeMode::Drag, index, GapPolicy::default(), &mut rng);
    // Sending every target word to the end, in order, leaves the row sorted.
    for word in &item.target_words {
        let pos = state.surface.tokens().iter().position(|t| t == word).unwrap();
        state = state.move_token_to_end(pos);
    }
    let Surface::Drag { order } = &state.surface else {
        panic!("drag surface expected");
    };
    assert_eq!(order, &item.target_words);
    assert!(grader::submit(state.mode, &state.draft(), &item, &mut stats).correct);
}

#[test]
fn legacy_bare_stats_file_is_read() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(format!("{STATS_KEY}.json")),
        r#"{"busy-morning": {"times": 3, "correct": 2}, "bring-umbrella": {"times": 1, "correct": 5}}"#,
    )
    .unwrap();

    let stats = open_stats(&dir);
    assert_eq!(stats.accuracy_for("busy-morning"), "67%");
    assert_eq!(stats.accuracy_for("bring-umbrella"), "100%");
    assert_eq!(stats.accuracy_for("missed-last-bus"), "-");
}

#[test]
fn corrupt_stats_file_starts_empty_and_is_replaced_on_next_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(format!("{STATS_KEY}.json"));
    fs::write(&path, "[1, 2, 3]").unwrap();

    let mut stats = open_stats(&dir);
    assert!(stats.entries().is_empty());
    stats.record("busy-morning", true);

    let written = fs::read_to_string(&path).unwrap();
    let version = Regex::new(r#""schema_version":\s*1"#).unwrap();
    assert!(version.is_match(&written), "{written}");

    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    assert_eq!(store.load().unwrap()["busy-morning"].attempts, 1);
}

#[test]
fn empty_draft_counts_as_an_attempt() {
    let bank = SentenceBank::builtin().unwrap();
    let dir = TempDir::new().unwrap();
    let mut stats = open_stats(&dir);
    let item = bank.get(0);

    let verdict = grader::submit(PracticeMode::Input, &Draft::Text(String::new()), item, &mut stats);
    assert!(!verdict.correct);
    assert_eq!(stats.entry(&item.id).attempts, 1);
    assert_eq!(stats.accuracy_for(&item.id), "0%");
}
