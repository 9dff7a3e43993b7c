use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::bank::SentenceItem;
use crate::session::mode::PracticeMode;
use crate::session::state::SessionState;
use crate::ui::theme::Theme;

pub fn prompt(mode: PracticeMode) -> String {
    match mode {
        PracticeMode::Click => t!("prompt.click"),
        PracticeMode::Drag => t!("prompt.drag"),
        PracticeMode::Gap => t!("prompt.gap"),
        PracticeMode::Input => t!("prompt.input"),
        PracticeMode::Dictation => t!("prompt.dictation"),
    }
    .to_string()
}

/// Source sentence plus whatever the mode shows of the target.
pub struct SentenceCard<'a> {
    item: &'a SentenceItem,
    state: &'a SessionState,
    theme: &'a Theme,
}

impl<'a> SentenceCard<'a> {
    pub fn new(item: &'a SentenceItem, state: &'a SessionState, theme: &'a Theme) -> Self {
        Self { item, state, theme }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;
        let mut lines = vec![
            Line::from(Span::styled(
                self.item.source_text.as_str(),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                prompt(self.state.mode),
                Style::default().fg(colors.muted()),
            )),
        ];

        if let Some(blanked) = self.state.surface.blanked_line(self.item) {
            lines.push(Line::from(Span::styled(
                blanked,
                Style::default().fg(colors.accent()),
            )));
        } else if self.state.mode == PracticeMode::Dictation {
            let line = if self.state.reveals_target() {
                Span::styled(
                    self.item.target_text.as_str(),
                    Style::default().fg(colors.accent()),
                )
            } else {
                Span::styled(
                    t!("prompt.hidden").to_string(),
                    Style::default()
                        .fg(colors.muted())
                        .add_modifier(Modifier::ITALIC),
                )
            };
            lines.push(Line::from(line));
        }
        lines
    }
}

impl Widget for SentenceCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.lines())
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::bank::SentenceBank;
    use crate::engine::grader;
    use crate::session::surface::GapPolicy;

    fn text_of(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn gap_card_shows_blank_instead_of_hidden_word() {
        let bank = SentenceBank::builtin().unwrap();
        let index = bank.position("busy-morning").unwrap();
        let state = SessionState::new(
            &bank,
            PracticeMode::Gap,
            index,
            GapPolicy::SecondToLast,
            &mut SmallRng::seed_from_u64(1),
        );
        let theme = Theme::default();
        let text = text_of(&SentenceCard::new(bank.get(index), &state, &theme).lines());
        assert!(text.contains("I was very busy this ____ ."));
        assert!(!text.contains("morning"));
    }

    #[test]
    fn dictation_card_reveals_target_only_after_grading() {
        let bank = SentenceBank::builtin().unwrap();
        let item = bank.get(0);
        let state = SessionState::new(
            &bank,
            PracticeMode::Dictation,
            0,
            GapPolicy::default(),
            &mut SmallRng::seed_from_u64(1),
        );
        let theme = Theme::default();
        let hidden = text_of(&SentenceCard::new(item, &state, &theme).lines());
        assert!(!hidden.contains(&item.target_text));

        let verdict = grader::grade(state.mode, &state.draft(), item);
        let state = state.with_feedback(verdict);
        let shown = text_of(&SentenceCard::new(item, &state, &theme).lines());
        assert!(shown.contains(&item.target_text));
    }
}
