use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::session::surface::{Draft, Surface};
use crate::ui::theme::Theme;

/// Word chips for the click and drag modes, with the keyboard cursor on one chip.
pub struct TokenBoard<'a> {
    surface: &'a Surface,
    cursor: usize,
    theme: &'a Theme,
}

impl<'a> TokenBoard<'a> {
    pub fn new(surface: &'a Surface, cursor: usize, theme: &'a Theme) -> Self {
        Self {
            surface,
            cursor,
            theme,
        }
    }

    fn chip_text(slot: usize, token: &str) -> String {
        if slot < 9 {
            format!(" {}:{token} ", slot + 1)
        } else {
            format!(" {token} ")
        }
    }

    /// Chips packed greedily into rows no wider than `width`.
    fn chip_lines(&self, width: u16) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let width = usize::from(width.max(1));
        let mut lines = Vec::new();
        let mut row: Vec<Span<'static>> = Vec::new();
        let mut used = 0;

        for (slot, token) in self.surface.tokens().iter().enumerate() {
            let text = Self::chip_text(slot, token);
            let len = text.chars().count() + 1;
            if used > 0 && used + len > width {
                lines.push(Line::from(std::mem::take(&mut row)));
                used = 0;
            }
            let style = if slot == self.cursor {
                Style::default()
                    .fg(colors.token_cursor_fg())
                    .bg(colors.token_cursor_bg())
                    .add_modifier(Modifier::BOLD)
            } else if self.surface.is_picked(slot) {
                Style::default()
                    .fg(colors.token_used())
                    .bg(colors.token_bg())
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(colors.token_fg()).bg(colors.token_bg())
            };
            row.push(Span::styled(text, style));
            row.push(Span::raw(" "));
            used += len;
        }
        if !row.is_empty() {
            lines.push(Line::from(row));
        }
        lines
    }

    /// The click draft built so far, or a placeholder before the first pick.
    fn draft_line(&self) -> Option<Line<'static>> {
        let colors = &self.theme.colors;
        let Surface::Click { .. } = self.surface else {
            return None;
        };
        let line = match self.surface.draft() {
            Draft::Tokens(tokens) if !tokens.is_empty() => Line::from(Span::styled(
                tokens.join(" "),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            )),
            _ => Line::from(Span::styled(
                t!("prompt.click_empty").to_string(),
                Style::default()
                    .fg(colors.muted())
                    .add_modifier(Modifier::ITALIC),
            )),
        };
        Some(line)
    }
}

impl Widget for TokenBoard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let chips = self.chip_lines(inner.width);
        let draft = self.draft_line();

        let chip_height = chips.len() as u16;
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(chip_height),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        Paragraph::new(chips).render(layout[0], buf);

        if let Some(draft) = draft {
            let answer_block = Block::bordered()
                .title(format!(" {} ", t!("prompt.answer")))
                .border_style(Style::default().fg(colors.accent()));
            let answer_inner = answer_block.inner(layout[2]);
            answer_block.render(layout[2], buf);
            Paragraph::new(draft)
                .wrap(Wrap { trim: false })
                .render(answer_inner, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(tokens: &[&str], picked: Vec<usize>) -> Surface {
        Surface::Click {
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            picked,
        }
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn chips_are_numbered_and_wrap() {
        let theme = Theme::default();
        let surface = click(&["busy", "I", "was", "."], vec![]);
        let board = TokenBoard::new(&surface, 0, &theme);

        let wide = board.chip_lines(80);
        assert_eq!(wide.len(), 1);
        assert_eq!(line_text(&wide[0]), " 1:busy   2:I   3:was   4:.  ");

        let narrow = board.chip_lines(16);
        assert!(narrow.len() > 1);
    }

    #[test]
    fn cursor_and_picked_chips_are_styled() {
        let theme = Theme::default();
        let surface = click(&["busy", "I"], vec![1]);
        let board = TokenBoard::new(&surface, 0, &theme);
        let lines = board.chip_lines(80);
        let spans = &lines[0].spans;
        assert_eq!(spans[0].style.bg, Some(theme.colors.token_cursor_bg()));
        assert!(spans[2].style.add_modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn click_draft_line_shows_picked_words() {
        let theme = Theme::default();
        let empty = click(&["busy", "I"], vec![]);
        let placeholder = TokenBoard::new(&empty, 0, &theme).draft_line().unwrap();
        assert_eq!(line_text(&placeholder), t!("prompt.click_empty"));

        let built = click(&["busy", "I"], vec![1, 0]);
        let line = TokenBoard::new(&built, 0, &theme).draft_line().unwrap();
        assert_eq!(line_text(&line), "I busy");
    }

    #[test]
    fn drag_board_has_no_separate_draft() {
        let theme = Theme::default();
        let surface = Surface::Drag {
            order: vec!["I".into(), "was".into()],
        };
        assert!(TokenBoard::new(&surface, 0, &theme).draft_line().is_none());
    }
}
