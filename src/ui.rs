use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::sprint::SESSION_MS;
use crate::stats::{Summary, Tally};
use crate::surface::Surface;
use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// Terminal presentation surface. Owns the display buffers the core writes
/// through [`Surface`]; rendering reads only these buffers.
#[derive(Debug)]
pub struct Screen {
    ms_remaining: u64,
    assigned: Vec<String>,
    preview: Vec<Option<String>>,
    trail: Vec<(String, bool)>,
    tally: Tally,
    ended: bool,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            ms_remaining: SESSION_MS,
            assigned: vec![],
            preview: vec![],
            trail: vec![],
            tally: Tally::default(),
            ended: false,
        }
    }

    /// Whole seconds left, rounded up like a countdown should be.
    pub fn seconds_left(&self) -> u64 {
        (self.ms_remaining + 999) / 1000
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    fn ensure_trail(&mut self, slot: usize) {
        while self.trail.len() <= slot {
            self.trail.push((String::new(), false));
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for Screen {
    fn update_clock(&mut self, ms_remaining: u64) {
        self.ms_remaining = ms_remaining;
    }

    fn append_word(&mut self, slot: usize, word: &str) {
        debug_assert_eq!(slot, self.assigned.len());
        self.assigned.push(word.to_string());
        self.preview.push(Some(word.to_string()));
    }

    fn trim_preview(&mut self, slot: usize, hidden: usize) {
        if let Some(Some(rest)) = self.preview.get_mut(slot) {
            *rest = self.assigned[slot].chars().skip(hidden).collect();
        }
    }

    fn remove_preview(&mut self, slot: usize) {
        if let Some(entry) = self.preview.get_mut(slot) {
            *entry = None;
        }
    }

    fn echo_char(&mut self, slot: usize, c: char) {
        self.ensure_trail(slot);
        self.trail[slot].0.push(c);
    }

    fn truncate_typed(&mut self, slot: usize, len: usize) {
        self.ensure_trail(slot);
        let typed = &mut self.trail[slot].0;
        *typed = typed.chars().take(len).collect();
    }

    fn mark_word(&mut self, slot: usize, correct: bool) {
        self.ensure_trail(slot);
        self.trail[slot].1 = correct;
    }

    fn update_statistics(&mut self, tally: &Tally) {
        self.tally = *tally;
    }

    fn enable_end_state(&mut self) {
        self.ended = true;
    }

    fn reset_to_defaults(&mut self) {
        *self = Screen::new();
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let screen = &self.screen;

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let underlined_dim_bold_style = Style::default()
            .patch(dim_bold_style)
            .add_modifier(Modifier::UNDERLINED);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(1), // countdown
                    Constraint::Length(1), // time gauge
                    Constraint::Length(1), // padding
                    Constraint::Min(1),    // word stream / end banner
                    Constraint::Length(1), // statistics
                ]
                .as_ref(),
            )
            .split(area);

        let countdown = Paragraph::new(Span::styled(
            screen.seconds_left().to_string(),
            dim_bold_style,
        ))
        .alignment(Alignment::Center);
        countdown.render(chunks[0], buf);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta))
            .ratio(screen.ms_remaining as f64 / SESSION_MS as f64)
            .label("");
        gauge.render(chunks[1], buf);

        if screen.ended {
            let banner = Paragraph::new(vec![
                Line::from(Span::styled("time!", bold_style)),
                Line::from(""),
                Line::from(Span::styled("(r)estart (esc)ape", italic_style)),
            ])
            .alignment(Alignment::Center);
            banner.render(chunks[3], buf);
        } else {
            let mut spans: Vec<Span> = vec![];

            // Finished and in-progress words, colored by correctness.
            for (idx, (typed, correct)) in screen.trail.iter().enumerate() {
                let style = if *correct {
                    green_bold_style
                } else {
                    red_bold_style
                };
                spans.push(Span::styled(typed.clone(), style));
                let finished = screen.preview.get(idx).map_or(true, Option::is_none);
                if finished {
                    spans.push(Span::raw(" "));
                }
            }

            // Remaining letters of the active word, then the upcoming words.
            let mut live = screen.preview.iter().flatten();
            if let Some(active_rest) = live.next() {
                spans.push(Span::styled(active_rest.clone(), underlined_dim_bold_style));
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(live.join(" "), dim_bold_style));

            let stream_width: usize = screen
                .trail
                .iter()
                .map(|(typed, _)| typed.width() + 1)
                .chain(screen.preview.iter().flatten().map(|w| w.width() + 1))
                .sum();
            let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);

            let widget = Paragraph::new(Line::from(spans))
                .alignment(if stream_width <= max_chars_per_line as usize {
                    // when the stream fits on one line, centering the text
                    // gives a nice zen feeling
                    Alignment::Center
                } else {
                    Alignment::Left
                })
                .wrap(Wrap { trim: true });
            widget.render(chunks[3], buf);
        }

        let summary = Summary::from(&screen.tally);
        let acc = summary
            .accuracy
            .map_or_else(|| "--".to_string(), |a| format!("{a}%"));
        let stats = Paragraph::new(Span::styled(
            format!("{} wpm   {} cpm   {} acc", summary.wpm, summary.cpm, acc),
            bold_style,
        ))
        .alignment(Alignment::Center);
        stats.render(chunks[4], buf);
    }
}
