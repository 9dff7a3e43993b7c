use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};
use rust_i18n::t;

use crate::ui::theme::Theme;

/// Position within the sentence bank, counted from 1.
pub struct ProgressBar<'a> {
    current: usize,
    total: usize,
    theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(index: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            current: (index + 1).min(total.max(1)),
            total: total.max(1),
            theme,
        }
    }

    pub fn ratio(&self) -> f64 {
        self.current as f64 / self.total as f64
    }

    fn label(&self) -> String {
        t!(
            "status.progress",
            current = self.current,
            total = self.total
        )
        .to_string()
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered().border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled_width = (self.ratio() * inner.width as f64).round() as u16;
        let label = self.label();

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label_width = label.chars().count() as u16;
        let label_x = inner.x + (inner.width.saturating_sub(label_width)) / 2;
        buf.set_stringn(
            label_x,
            inner.y,
            &label,
            usize::from(inner.width),
            Style::default().fg(colors.fg()),
        );
    }
}
