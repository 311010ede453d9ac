use std::rc::Rc;

use ratatui::{
    prelude::*,
    widgets::{block::*, *},
};

use crate::game::letter::Verdict;
use crate::game::word::{Word, WORD_LENGTH};
use crate::game::ScoredAttempt;

use super::{App, Message, MessageKind};

const KEY_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = self.create_border();

        let board_height = self.session.config().max_attempts as u16 * 3;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Length(2),
                Constraint::Length(board_height),
                Constraint::Length(1),
                Constraint::Length(KEY_ROWS.len() as u16 * 3),
                Constraint::Fill(1),
            ])
            .split(border.inner(area));

        self.render_message(rows[0], buf);
        self.render_board(rows[1], buf);
        self.render_keyboard(rows[3], buf);

        border.render(area, buf);
    }
}

impl App {
    fn create_border(&self) -> Block<'_> {
        let title = Title::from(" Woofle ".bold());
        let mut keys = vec![" Quit ".into(), "<Esc> ".blue().bold()];
        if self.session.state().is_over() && self.revealed == WORD_LENGTH {
            keys.push(" Play again ".into());
            keys.push("<Enter> ".blue().bold());
        } else {
            keys.push(" Guess ".into());
            keys.push("<Enter> ".blue().bold());
            keys.push(" Delete ".into());
            keys.push("<Backspace> ".blue().bold());
        }
        let instructions = Title::from(Line::from(keys));
        Block::default()
            .title(title.alignment(Alignment::Center))
            .title(
                instructions
                    .alignment(Alignment::Center)
                    .position(Position::Bottom),
            )
            .borders(Borders::ALL)
            .border_set(symbols::border::PLAIN)
    }

    fn render_message(&self, area: Rect, buf: &mut Buffer) {
        let Some(message) = &self.message else { return };
        let style = match message.kind {
            MessageKind::Warning | MessageKind::Lost => Style::new().red().bold(),
            MessageKind::Won => Style::new().light_green().bold(),
        };
        Paragraph::new(message.text.as_str())
            .style(style)
            .centered()
            .render(area, buf);
    }

    fn render_board(&self, area: Rect, buf: &mut Buffer) {
        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(3); self.session.config().max_attempts])
            .split(area);

        let history = self.session.history();
        let flash = matches!(
            self.message,
            Some(Message {
                kind: MessageKind::Warning,
                ..
            })
        );

        for (i, &row_area) in row_areas.iter().enumerate() {
            if let Some(scored) = history.get(i) {
                let revealed = if i + 1 == history.len() {
                    self.revealed
                } else {
                    WORD_LENGTH
                };
                render_scored_row(scored, revealed, row_area, buf);
            } else if !self.session.state().is_over() && i == self.session.row() {
                render_attempt_row(self.session.attempt(), flash, row_area, buf);
            } else {
                render_empty_row(row_area, buf);
            }
        }
    }

    fn render_keyboard(&self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(3); KEY_ROWS.len()])
            .split(area);

        for (keys, &row_area) in KEY_ROWS.iter().zip(rows.iter()) {
            let key_areas = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Length(5); keys.len()])
                .flex(layout::Flex::Center)
                .split(row_area);
            for (key, &key_area) in keys.chars().zip(key_areas.iter()) {
                let style = match self.keyboard_view.verdict(key) {
                    None => Style::default(),
                    Some(Verdict::Absent) => Style::new().dark_gray(),
                    Some(Verdict::Present) => Style::new().light_yellow(),
                    Some(Verdict::Correct) => Style::new().light_green().bold(),
                };
                render_key(key, style, key_area, buf);
            }
        }
    }
}

fn tile_areas(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(7); WORD_LENGTH])
        .flex(layout::Flex::Center)
        .split(area)
}

fn render_scored_row(scored: &ScoredAttempt, revealed: usize, area: Rect, buf: &mut Buffer) {
    let areas = tile_areas(area);
    for i in 0..WORD_LENGTH {
        let letter = scored.word.letter(i);
        if i < revealed {
            let (border_style, text_style) = verdict_styles(scored.verdicts[i]);
            render_tile(letter, border_style, text_style, areas[i], buf);
        } else {
            // still face down
            render_tile(letter, Style::new().dark_gray(), Style::default(), areas[i], buf);
        }
    }
}

fn verdict_styles(verdict: Verdict) -> (Style, Style) {
    match verdict {
        Verdict::Absent => (Style::new().dark_gray(), Style::new().dark_gray()),
        Verdict::Present => (Style::new().light_yellow(), Style::new().light_yellow()),
        Verdict::Correct => (
            Style::new().light_green(),
            Style::new().light_green().bold(),
        ),
    }
}

fn render_attempt_row(attempt: &Word, flash: bool, area: Rect, buf: &mut Buffer) {
    let areas = tile_areas(area);
    let cursor = attempt.len();
    let border_style = if flash {
        Style::new().red()
    } else {
        Style::new().white()
    };
    for i in 0..WORD_LENGTH {
        // the next free tile gets the double border
        let border_type = if i == cursor {
            BorderType::Double
        } else {
            BorderType::Rounded
        };
        render_tile_with(
            attempt.letter(i),
            border_style,
            Style::default(),
            border_type,
            areas[i],
            buf,
        );
    }
}

fn render_empty_row(area: Rect, buf: &mut Buffer) {
    let areas = tile_areas(area);
    for i in 0..WORD_LENGTH {
        render_tile(None, Style::new().dark_gray(), Style::default(), areas[i], buf);
    }
}

fn render_tile(
    letter: Option<char>,
    border_style: Style,
    text_style: Style,
    area: Rect,
    buf: &mut Buffer,
) {
    render_tile_with(
        letter,
        border_style,
        text_style,
        BorderType::Rounded,
        area,
        buf,
    );
}

fn render_tile_with(
    letter: Option<char>,
    border_style: Style,
    text_style: Style,
    border_type: BorderType,
    area: Rect,
    buf: &mut Buffer,
) {
    let block = Block::new()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);
    let letter = match letter {
        Some(letter) => Text::styled(letter.to_uppercase().to_string(), text_style),
        None => Text::raw(""),
    };
    Paragraph::new(letter)
        .bold()
        .centered()
        .block(block)
        .render(area, buf);
}

fn render_key(key: char, style: Style, area: Rect, buf: &mut Buffer) {
    let block = Block::new().borders(Borders::ALL).border_style(style);
    Paragraph::new(key.to_uppercase().to_string())
        .style(style)
        .centered()
        .block(block)
        .render(area, buf);
}
