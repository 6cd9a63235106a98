use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{App, OptionRow, SelectionMode, GRID_COLUMNS},
    game::{AnswerMode, GameStatus},
    kana::ScriptFilter,
    scoring::{format_time, summarize_session, Performance},
    timer::Countdown,
};

use super::{
    bold, dim_bold, green_bold, italic, on_off, red_bold, HORIZONTAL_MARGIN, VERTICAL_MARGIN,
};

/// Terminal columns per selection grid cell; yōon glyphs take four
const GRID_CELL_WIDTH: usize = 6;

/// A UI screen boundary: one per game status
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

pub struct StartScreen;

impl Screen for StartScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Length(2),
                Constraint::Length(4),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        Paragraph::new(Span::styled("かな flash", bold().fg(Color::Magenta)))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let current = app.state.options.script_filter;
        let lines: Vec<Line> = [
            ('h', ScriptFilter::Hiragana),
            ('k', ScriptFilter::Katakana),
            ('b', ScriptFilter::Both),
        ]
        .into_iter()
        .map(|(key, filter)| {
            let style = if filter == current {
                green_bold()
            } else {
                dim_bold()
            };
            Line::from(Span::styled(format!("({key}) {}", filter.display_name()), style))
        })
        .collect();

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        legend("(h/k/b) pick a script / (enter) keep current / (q)uit").render(chunks[4], buf);
    }
}

pub struct OptionsScreen;

impl OptionsScreen {
    fn row_text(app: &App, row: OptionRow) -> String {
        let o = &app.state.options;
        match row {
            OptionRow::Yoon => format!("Include yōon: {}", on_off(o.include_yoon)),
            OptionRow::Dakuten => format!(
                "Include dakuten / handakuten: {}",
                on_off(o.include_dakuten_handakuten)
            ),
            OptionRow::CharacterCount => format!("Characters: {}", o.character_count),
            OptionRow::SessionTimer => format!("Session timer: {}", on_off(o.use_timer)),
            OptionRow::SessionDuration => {
                format!("Session length: {}", format_time(o.timer_duration))
            }
            OptionRow::AnswerMode => format!("Answer mode: {}", o.answer_mode),
        }
    }
}

impl Screen for OptionsScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(OptionRow::ALL.len() as u16),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        Paragraph::new(Span::styled(
            format!("{} options", app.state.options.script_filter.display_name()),
            bold(),
        ))
        .render(chunks[0], buf);

        let lines: Vec<Line> = OptionRow::ALL
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let text = Self::row_text(app, *row);
                if idx == app.option_cursor {
                    Line::from(Span::styled(format!("> {text}"), green_bold()))
                } else {
                    Line::from(Span::raw(format!("  {text}")))
                }
            })
            .collect();
        Paragraph::new(lines).render(chunks[1], buf);

        legend("(↑/↓) move / (←/→) change / (enter) characters / (esc) back").render(chunks[3], buf);
    }
}

pub struct SelectionScreen;

impl Screen for SelectionScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let characters = app.selectable_characters();
        let rows = characters.len().div_ceil(GRID_COLUMNS) as u16;
        let o = &app.state.options;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(rows.min(3)),
                Constraint::Length(2),
                Constraint::Length(1),
            ])
            .split(area);

        let header = match app.selection_mode {
            SelectionMode::Random => format!(
                "Random: {} of {} characters",
                o.character_count.min(characters.len()),
                characters.len()
            ),
            SelectionMode::Manual => format!("Manual: {} selected", app.manual_selection.len()),
        };
        Paragraph::new(Span::styled(header, bold())).render(chunks[0], buf);

        let manual = app.selection_mode == SelectionMode::Manual;
        let lines: Vec<Line> = characters
            .chunks(GRID_COLUMNS)
            .enumerate()
            .map(|(row, chunk)| {
                let spans: Vec<Span> = chunk
                    .iter()
                    .enumerate()
                    .map(|(col, k)| {
                        let idx = row * GRID_COLUMNS + col;
                        let pad = GRID_CELL_WIDTH.saturating_sub(k.glyph.width());
                        let text = format!("{}{}", k.glyph, " ".repeat(pad));

                        let mut style = if !manual {
                            Style::default().add_modifier(Modifier::DIM)
                        } else if app.manual_selection.contains(k) {
                            green_bold()
                        } else {
                            Style::default()
                        };
                        if manual && idx == app.grid_cursor {
                            style = style.add_modifier(Modifier::REVERSED);
                        }
                        Span::styled(text, style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();
        Paragraph::new(lines).render(chunks[1], buf);

        let card_timer = if o.character_timer {
            format!("ON ({}s)", o.character_timer_duration)
        } else {
            String::from("OFF")
        };
        Paragraph::new(Span::styled(
            format!(
                "Card timer: {} | Shuffle: {} | Mode: {}",
                card_timer,
                on_off(o.shuffle_manual_selection),
                o.answer_mode
            ),
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        ))
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

        legend("(tab) random/manual / (space) pick / (a)ll / (t)imer / (d)uration / (s)huffle / (enter) start / (esc) back")
            .render(chunks[3], buf);
    }
}

pub struct PlayingScreen;

impl PlayingScreen {
    fn gauge(label: &str, countdown: &Countdown, color: Color) -> Gauge<'static> {
        Gauge::default()
            .gauge_style(Style::default().fg(color))
            .ratio(countdown.fraction_remaining().clamp(0.0, 1.0))
            .label(format!("{label} {}", format_time(countdown.remaining_secs())))
    }

    fn status_line(app: &App) -> String {
        let state = &app.state;
        let answered = state.current_index.min(state.character_sequence.len());
        let so_far = summarize_session(
            &state.character_sequence[..answered],
            &state.user_answers[..answered.min(state.user_answers.len())],
            state.start_time,
            None,
        );
        let position = if state.character_sequence.is_empty() {
            String::from("No cards")
        } else {
            format!("Card {}/{}", answered + 1, state.character_sequence.len())
        };
        if answered == 0 {
            position
        } else {
            format!("{position}   {:.0}% acc", so_far.accuracy_percent)
        }
    }

    fn feedback_line(app: &App) -> Line<'static> {
        match &app.feedback {
            Some(f) if f.correct => Line::from(Span::styled(
                format!("✓ {} = {}", f.character.glyph, f.character.romaji),
                green_bold(),
            )),
            Some(f) if f.answer.trim().is_empty() => Line::from(Span::styled(
                format!("✗ {} = {} (skipped)", f.character.glyph, f.character.romaji),
                red_bold(),
            )),
            Some(f) => Line::from(Span::styled(
                format!(
                    "✗ {} = {} (you typed {})",
                    f.character.glyph,
                    f.character.romaji,
                    f.answer.trim()
                ),
                red_bold(),
            )),
            None => Line::default(),
        }
    }

    fn answer_lines(app: &App) -> Vec<Line<'static>> {
        match app.state.options.answer_mode {
            AnswerMode::Typing => vec![Line::from(vec![
                Span::styled("> ", dim_bold()),
                Span::styled(app.input.clone(), bold()),
                Span::styled("_", dim_bold().add_modifier(Modifier::SLOW_BLINK)),
            ])],
            AnswerMode::MultipleChoice => app
                .choices
                .iter()
                .enumerate()
                .map(|(idx, choice)| {
                    let text = format!("({}) {}", idx + 1, choice);
                    if idx == app.choice_cursor {
                        Line::from(Span::styled(text, green_bold()))
                    } else {
                        Line::from(Span::raw(text))
                    }
                })
                .collect(),
        }
    }
}

impl Screen for PlayingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let answer_lines = Self::answer_lines(app);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(1)
            .constraints([
                Constraint::Length(1), // progress
                Constraint::Length(1), // session timer
                Constraint::Length(1), // card timer
                Constraint::Min(1),
                Constraint::Length(1), // glyph
                Constraint::Length(1), // hint
                Constraint::Length(1),
                Constraint::Length(answer_lines.len() as u16),
                Constraint::Length(1), // feedback
                Constraint::Min(1),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(Self::status_line(app), dim_bold()))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        if let Some(countdown) = app.timers.session() {
            Self::gauge("session", countdown, Color::Cyan).render(chunks[1], buf);
        }
        if let Some(countdown) = app.timers.character() {
            Self::gauge("card", countdown, Color::Yellow).render(chunks[2], buf);
        }

        match app.state.current_character() {
            Some(character) => {
                Paragraph::new(Span::styled(character.glyph, bold()))
                    .alignment(Alignment::Center)
                    .render(chunks[4], buf);
                if app.show_hint {
                    Paragraph::new(Span::styled(character.romaji, italic()))
                        .alignment(Alignment::Center)
                        .render(chunks[5], buf);
                }
            }
            None => Paragraph::new(Span::styled("No characters to practice", italic()))
                .alignment(Alignment::Center)
                .render(chunks[4], buf),
        }

        Paragraph::new(answer_lines)
            .alignment(Alignment::Center)
            .render(chunks[7], buf);

        Paragraph::new(Self::feedback_line(app))
            .alignment(Alignment::Center)
            .render(chunks[8], buf);

        let keys = match app.state.options.answer_mode {
            AnswerMode::Typing => "(enter) submit / (tab) skip / (?) hint / (esc) quit session",
            AnswerMode::MultipleChoice => {
                "(1-3 or ↑/↓ enter) choose / (tab) skip / (?) hint / (esc) quit session"
            }
        };
        legend(keys).render(chunks[10], buf);
    }
}

pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let result = app.state.result();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2), // headline
                Constraint::Length(2), // stats
                Constraint::Min(1),    // incorrect list
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            Performance::from_accuracy(result.accuracy_percent).to_string(),
            bold().fg(Color::Magenta),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        Paragraph::new(Span::styled(
            format!(
                "{}/{} correct   {:.0}% acc   {}",
                result.correct.len(),
                result.total(),
                result.accuracy_percent,
                format_time(result.elapsed_seconds as u64)
            ),
            bold(),
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        let missed: Vec<Line> = result
            .incorrect
            .iter()
            .map(|k| {
                Line::from(vec![
                    Span::styled(k.glyph, red_bold()),
                    Span::raw(format!(" = {}", k.romaji)),
                ])
            })
            .collect();
        if !missed.is_empty() {
            let mut lines = vec![Line::from(Span::styled("To review:", italic()))];
            lines.extend(missed);
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(chunks[2], buf);
        }

        let keys = if result.incorrect.is_empty() {
            "(r)estart / (n)ew / (q)uit"
        } else {
            "(r)estart / (i) retry incorrect / (n)ew / (q)uit"
        };
        legend(keys).render(chunks[3], buf);
    }
}

fn legend(text: &str) -> Paragraph<'_> {
    Paragraph::new(Span::styled(text, italic())).wrap(Wrap { trim: true })
}

/// Helper to construct the screen for the current game status
pub fn current_screen(status: GameStatus) -> Box<dyn Screen> {
    match status {
        GameStatus::Start => Box::new(StartScreen),
        GameStatus::Options => Box::new(OptionsScreen),
        GameStatus::CharacterSelection => Box::new(SelectionScreen),
        GameStatus::Playing => Box::new(PlayingScreen),
        GameStatus::Results => Box::new(ResultsScreen),
    }
}
