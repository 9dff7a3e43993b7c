use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::bank::SentenceBank;
use crate::engine::stats::{StatsEntry, StatsStore};
use crate::ui::theme::Theme;

/// Per-sentence attempt counts and accuracy for the whole bank.
pub struct StatsSidebar<'a> {
    bank: &'a SentenceBank,
    stats: &'a StatsStore,
    current: usize,
    theme: &'a Theme,
}

impl<'a> StatsSidebar<'a> {
    pub fn new(
        bank: &'a SentenceBank,
        stats: &'a StatsStore,
        current: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            bank,
            stats,
            current,
            theme,
        }
    }

    fn accuracy_color(&self, entry: &StatsEntry) -> Color {
        let colors = &self.theme.colors;
        match entry.accuracy_percent() {
            None => colors.muted(),
            Some(pct) if pct >= 80 => colors.success(),
            Some(pct) if pct >= 50 => colors.warning(),
            Some(_) => colors.error(),
        }
    }
}

impl Widget for StatsSidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .bank
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let entry = self.stats.entry(&item.id);
                let marker = if i == self.current { ">" } else { " " };
                let name_style = if i == self.current {
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.fg())
                };
                Line::from(vec![
                    Span::styled(format!("{marker} {:>2}. ", i + 1), name_style),
                    Span::styled(
                        format!("{:>4}", entry.accuracy_label()),
                        Style::default().fg(self.accuracy_color(&entry)),
                    ),
                    Span::styled(
                        format!("  ×{:<3}", entry.attempts),
                        Style::default().fg(colors.muted()),
                    ),
                    Span::styled(item.source_text.as_str(), name_style),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
