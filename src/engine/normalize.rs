use icu_normalizer::ComposingNormalizerBorrowed;

const NFKC: ComposingNormalizerBorrowed<'static> = ComposingNormalizerBorrowed::new_nfkc();

/// Canonical form used for answer comparison.
///
/// Folds compatibility characters (full-width letters and punctuation typed
/// through an IME become ASCII), lowercases, keeps only alphanumerics and
/// apostrophes, and collapses whitespace to single spaces with no leading or
/// trailing space. Apostrophes are kept so `doesn't` and `doesnt` stay
/// distinct; typographic quotes are folded to `'` first.
pub fn normalize(text: &str) -> String {
    // Dropping punctuation can leave a base and a combining mark adjacent,
    // which the next fold composes. Repeat until the form is stable.
    let mut current = fold_once(text);
    for _ in 0..MAX_FOLDS {
        let next = fold_once(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

const MAX_FOLDS: usize = 4;

fn fold_once(text: &str) -> String {
    let folded = NFKC.normalize(text);
    let mut out = String::with_capacity(folded.len());
    let mut pending_space = false;

    for ch in folded.chars().flat_map(char::to_lowercase) {
        let ch = fold_apostrophe(ch);
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else if ch.is_alphanumeric() || ch == '\'' {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }

    out
}

fn fold_apostrophe(ch: char) -> char {
    match ch {
        '\u{2018}' | '\u{2019}' | '\u{02BC}' | '\u{FF07}' => '\'',
        _ => ch,
    }
}

/// True when both strings share the same normalized form.
pub fn equivalent(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}
