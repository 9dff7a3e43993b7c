use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget, Wrap};

use crate::engine::grader::Verdict;
use crate::ui::theme::Theme;

/// Grading result, with any transient notice (speech problems) underneath.
pub struct FeedbackBanner<'a> {
    verdict: Option<&'a Verdict>,
    notice: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> FeedbackBanner<'a> {
    pub fn new(verdict: Option<&'a Verdict>, notice: Option<&'a str>, theme: &'a Theme) -> Self {
        Self {
            verdict,
            notice,
            theme,
        }
    }

    /// Rows needed to show everything at full width.
    pub fn height(&self) -> u16 {
        u16::from(self.verdict.is_some()) + u16::from(self.notice.is_some())
    }
}

impl Widget for FeedbackBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let mut lines = Vec::new();

        if let Some(verdict) = self.verdict {
            let color = if verdict.correct {
                colors.success()
            } else {
                colors.error()
            };
            lines.push(Line::from(Span::styled(
                verdict.message.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }
        if let Some(notice) = self.notice {
            lines.push(Line::from(Span::styled(
                notice,
                Style::default().fg(colors.warning()),
            )));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
