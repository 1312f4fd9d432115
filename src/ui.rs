use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{difficulty::Difficulty, util::format_wpm, App};

const HORIZONTAL_MARGIN: u16 = 5;
const INPUT_HEIGHT: u16 = 3;
const STATS_HEIGHT: u16 = 2;

/// Rows the wrapped paragraph needs at the given width
fn paragraph_lines(text: &str, max_width: u16) -> u16 {
    if max_width == 0 {
        return 1;
    }
    let width = text.width() as f64;
    // one spare row for words pushed down by wrapping
    match (width / max_width as f64).ceil() as u16 {
        0 | 1 => 1,
        n => n + 1,
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        let palette = self.theme.palette();

        let max_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
        let prompt_lines = paragraph_lines(session.difficulty().paragraph(), max_width);
        let content_height = 1 + 1 + prompt_lines + 1 + INPUT_HEIGHT + STATS_HEIGHT + 1 + 1;
        let padding = area.height.saturating_sub(content_height) / 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(padding),
                    Constraint::Length(1), // difficulty selector
                    Constraint::Length(1),
                    Constraint::Length(prompt_lines),
                    Constraint::Length(1),
                    Constraint::Length(INPUT_HEIGHT),
                    Constraint::Length(STATS_HEIGHT),
                    Constraint::Length(1),
                    Constraint::Length(1), // key hints
                    Constraint::Min(0),
                ]
                .as_ref(),
            )
            .split(area);

        let mut selector = vec![Span::styled("Difficulty: ", palette.title)];
        for level in Difficulty::ALL {
            let style = if level == session.difficulty() {
                palette.selected
            } else {
                palette.untyped
            };
            selector.push(Span::styled(level.to_string(), style));
            selector.push(Span::raw("  "));
        }
        Paragraph::new(Line::from(selector)).render(chunks[1], buf);

        let words = session
            .words()
            .iter()
            .zip_eq(session.word_states())
            .flat_map(|(word, state)| {
                [
                    Span::styled(word.clone(), palette.word(state)),
                    Span::raw(" "),
                ]
            })
            .collect::<Vec<Span>>();
        Paragraph::new(Line::from(words))
            .alignment(if prompt_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true })
            .render(chunks[3], buf);

        let field = if self.input_disabled() {
            Line::from(Span::styled("completed - enter: restart", palette.hint))
        } else {
            Line::from(vec![
                Span::raw(session.current_input().to_string()),
                Span::styled("_", palette.hint),
            ])
        };
        Paragraph::new(field)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(palette.input_border(session.input_status())),
            )
            .render(chunks[5], buf);

        Paragraph::new(vec![
            Line::from(Span::styled(
                format!("WPM: {}", format_wpm(session.wpm())),
                palette.stats,
            )),
            Line::from(Span::styled(
                format!("Accuracy: {:.2}%", session.accuracy()),
                palette.stats,
            )),
        ])
        .render(chunks[6], buf);

        Paragraph::new(Span::styled(
            "(tab) difficulty   (esc) quit",
            palette.hint,
        ))
        .alignment(Alignment::Center)
        .render(chunks[8], buf);
    }
}
