use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PracticeMode {
    Click,
    Drag,
    Gap,
    Input,
    Dictation,
}

impl PracticeMode {
    pub const ALL: [PracticeMode; 5] = [
        PracticeMode::Click,
        PracticeMode::Drag,
        PracticeMode::Gap,
        PracticeMode::Input,
        PracticeMode::Dictation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PracticeMode::Click => "click",
            PracticeMode::Drag => "drag",
            PracticeMode::Gap => "gap",
            PracticeMode::Input => "input",
            PracticeMode::Dictation => "dictation",
        }
    }

    pub fn position(self) -> usize {
        Self::ALL.iter().position(|m| *m == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }

    /// Modes whose draft is built from the shuffled word tokens.
    pub fn uses_tokens(self) -> bool {
        matches!(self, PracticeMode::Click | PracticeMode::Drag)
    }

    /// Modes whose draft is typed free text.
    pub fn uses_text(self) -> bool {
        !self.uses_tokens()
    }
}

impl fmt::Display for PracticeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PracticeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown practice mode `{s}`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_all_modes() {
        let mut mode = PracticeMode::Click;
        for _ in 0..PracticeMode::ALL.len() {
            mode = mode.next();
        }
        assert_eq!(mode, PracticeMode::Click);
        assert_eq!(PracticeMode::Click.prev(), PracticeMode::Dictation);
    }

    #[test]
    fn parses_names() {
        assert_eq!("Gap".parse::<PracticeMode>(), Ok(PracticeMode::Gap));
        assert_eq!(" dictation ".parse::<PracticeMode>(), Ok(PracticeMode::Dictation));
        assert!("listen".parse::<PracticeMode>().is_err());
    }

    #[test]
    fn token_and_text_modes_partition() {
        for mode in PracticeMode::ALL {
            assert_ne!(mode.uses_tokens(), mode.uses_text());
        }
    }
}
