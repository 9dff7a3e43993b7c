use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::session::mode::PracticeMode;
use crate::ui::theme::Theme;

pub fn mode_label(mode: PracticeMode) -> String {
    match mode {
        PracticeMode::Click => t!("mode.click"),
        PracticeMode::Drag => t!("mode.drag"),
        PracticeMode::Gap => t!("mode.gap"),
        PracticeMode::Input => t!("mode.input"),
        PracticeMode::Dictation => t!("mode.dictation"),
    }
    .to_string()
}

/// Title row with one tab per practice mode; exactly one is highlighted.
pub struct ModeTabs<'a> {
    active: PracticeMode,
    totals: String,
    theme: &'a Theme,
}

impl<'a> ModeTabs<'a> {
    pub fn new(active: PracticeMode, totals: String, theme: &'a Theme) -> Self {
        Self {
            active,
            totals,
            theme,
        }
    }
}

impl Widget for ModeTabs<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(Span::styled(
                format!(" {} ", t!("app.title")),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(Span::styled(
                format!(" {} ", self.totals),
                Style::default().fg(colors.muted()),
            )))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.header_bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = Vec::new();
        for (i, mode) in PracticeMode::ALL.iter().enumerate() {
            let is_active = *mode == self.active;
            let text = format!(" F{} {} ", i + 1, mode_label(*mode));
            let style = if is_active {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.header_fg()).bg(colors.header_bg())
            };
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
