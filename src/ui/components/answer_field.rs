use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

/// Bordered text box for the gap, input and dictation answers.
pub struct AnswerField<'a> {
    input: &'a LineInput,
    theme: &'a Theme,
}

impl<'a> AnswerField<'a> {
    pub fn new(input: &'a LineInput, theme: &'a Theme) -> Self {
        Self { input, theme }
    }

    fn line(&self) -> Line<'a> {
        let colors = &self.theme.colors;
        let text_style = Style::default().fg(colors.fg());
        let cursor_style = Style::default()
            .fg(colors.token_cursor_fg())
            .bg(colors.token_cursor_bg());

        let (before, at, after) = self.input.render_parts();
        let cursor = at.map_or_else(|| " ".to_string(), |ch| ch.to_string());
        Line::from(vec![
            Span::styled(before, text_style),
            Span::styled(cursor, cursor_style),
            Span::styled(after, text_style),
        ])
    }
}

impl Widget for AnswerField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(Span::styled(
                format!(" {} ", t!("prompt.answer")),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.line())
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_at_end_renders_as_trailing_block() {
        let theme = Theme::default();
        let input = LineInput::new("morning");
        let line = AnswerField::new(&input, &theme).line();
        assert_eq!(line.spans[0].content, "morning");
        assert_eq!(line.spans[1].content, " ");
        assert_eq!(line.spans[1].style.bg, Some(theme.colors.token_cursor_bg()));
        assert_eq!(line.spans[2].content, "");
    }
}
