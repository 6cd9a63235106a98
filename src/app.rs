use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, SystemTime};
use tracing::{debug, info};

use crate::game::{reduce, Action, AnswerMode, GameOptions, GameState, GameStatus};
use crate::kana::{all_characters_of_script, KanaCharacter, ScriptFilter};
use crate::scoring::is_answer_correct;
use crate::selection::multiple_choice_options;
use crate::timer::Timers;

pub const CHARACTER_COUNT_PRESETS: [usize; 6] = [5, 10, 15, 20, 30, 46];
pub const SESSION_TIMER_PRESETS: [u64; 4] = [60, 120, 180, 300];
pub const CHARACTER_TIMER_PRESETS: [u64; 4] = [5, 10, 15, 20];
pub const GRID_COLUMNS: usize = 10;
/// Distractors offered next to the right answer in multiple-choice mode
pub const DISTRACTORS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionRow {
    Yoon,
    Dakuten,
    CharacterCount,
    SessionTimer,
    SessionDuration,
    AnswerMode,
}

impl OptionRow {
    pub const ALL: [OptionRow; 6] = [
        OptionRow::Yoon,
        OptionRow::Dakuten,
        OptionRow::CharacterCount,
        OptionRow::SessionTimer,
        OptionRow::SessionDuration,
        OptionRow::AnswerMode,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Random,
    Manual,
}

/// Verdict on the card just answered, shown over the next one
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub character: KanaCharacter,
    pub answer: String,
    pub correct: bool,
}

/// Holds the game state and everything the screens need between key presses.
#[derive(Debug)]
pub struct App {
    pub state: GameState,
    pub timers: Timers,
    pub input: String,
    pub show_hint: bool,
    pub feedback: Option<Feedback>,
    pub choices: Vec<String>,
    pub choice_cursor: usize,
    pub option_cursor: usize,
    pub grid_cursor: usize,
    pub selection_mode: SelectionMode,
    pub manual_selection: Vec<KanaCharacter>,
    pub should_quit: bool,
    choices_for: Option<(Option<SystemTime>, usize)>,
    rng: StdRng,
}

impl App {
    pub fn new(options: GameOptions) -> Self {
        Self::with_rng(options, StdRng::from_entropy())
    }

    pub fn with_rng(options: GameOptions, rng: StdRng) -> Self {
        let selection_mode = if options.selected_characters.is_empty() {
            SelectionMode::Random
        } else {
            SelectionMode::Manual
        };
        Self {
            manual_selection: options.selected_characters.clone(),
            state: GameState::new(options),
            timers: Timers::new(),
            input: String::new(),
            show_hint: false,
            feedback: None,
            choices: Vec::new(),
            choice_cursor: 0,
            option_cursor: 0,
            grid_cursor: 0,
            selection_mode,
            should_quit: false,
            choices_for: None,
            rng,
        }
    }

    /// Apply one action and bring the timers and the choice buttons along
    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action, SystemTime::now(), &mut self.rng);
        self.timers.sync(&self.state);
        self.refresh_choices();
    }

    /// The characters the selection grid offers under the current filters
    pub fn selectable_characters(&self) -> Vec<KanaCharacter> {
        let o = &self.state.options;
        all_characters_of_script(o.script_filter, o.include_yoon, o.include_dakuten_handakuten)
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        for action in self.timers.on_tick(elapsed, &self.state) {
            match action {
                Action::SubmitAnswer(answer) => self.submit(answer),
                other => self.dispatch(other),
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            info!("quit requested");
            self.should_quit = true;
            return;
        }

        match self.state.status {
            GameStatus::Start => self.on_start_key(key.code),
            GameStatus::Options => self.on_options_key(key.code),
            GameStatus::CharacterSelection => self.on_selection_key(key.code),
            GameStatus::Playing => self.on_playing_key(key.code),
            GameStatus::Results => self.on_results_key(key.code),
        }
    }

    fn on_start_key(&mut self, code: KeyCode) {
        let filter = match code {
            KeyCode::Char('h') | KeyCode::Char('1') => ScriptFilter::Hiragana,
            KeyCode::Char('k') | KeyCode::Char('2') => ScriptFilter::Katakana,
            KeyCode::Char('b') | KeyCode::Char('3') => ScriptFilter::Both,
            KeyCode::Enter => self.state.options.script_filter,
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            _ => return,
        };
        self.dispatch(Action::SetKanaType(filter));
        self.dispatch(Action::SetGameStatus(GameStatus::Options));
    }

    fn on_options_key(&mut self, code: KeyCode) {
        let rows = OptionRow::ALL.len();
        match code {
            KeyCode::Up => self.option_cursor = (self.option_cursor + rows - 1) % rows,
            KeyCode::Down => self.option_cursor = (self.option_cursor + 1) % rows,
            KeyCode::Left => self.change_option(false),
            KeyCode::Right | KeyCode::Char(' ') => self.change_option(true),
            KeyCode::Enter => {
                self.grid_cursor = 0;
                self.dispatch(Action::SetGameStatus(GameStatus::CharacterSelection));
            }
            KeyCode::Esc => self.dispatch(Action::SetGameStatus(GameStatus::Start)),
            _ => {}
        }
    }

    fn change_option(&mut self, forward: bool) {
        let o = &self.state.options;
        let action = match OptionRow::ALL[self.option_cursor] {
            OptionRow::Yoon => Action::SetIncludeYoon(!o.include_yoon),
            OptionRow::Dakuten => Action::SetIncludeDakutenHandakuten(!o.include_dakuten_handakuten),
            OptionRow::CharacterCount => Action::SetCharacterCount(cycle_preset(
                &CHARACTER_COUNT_PRESETS,
                o.character_count,
                forward,
            )),
            OptionRow::SessionTimer => Action::SetUseTimer(!o.use_timer),
            OptionRow::SessionDuration => Action::SetTimerDuration(cycle_preset(
                &SESSION_TIMER_PRESETS,
                o.timer_duration,
                forward,
            )),
            OptionRow::AnswerMode => Action::SetAnswerMode(match o.answer_mode {
                AnswerMode::Typing => AnswerMode::MultipleChoice,
                AnswerMode::MultipleChoice => AnswerMode::Typing,
            }),
        };
        self.dispatch(action);
    }

    fn on_selection_key(&mut self, code: KeyCode) {
        let grid_len = self.selectable_characters().len();
        let character_timer = self.state.options.character_timer;
        let character_timer_duration = self.state.options.character_timer_duration;
        let shuffle = self.state.options.shuffle_manual_selection;
        match code {
            KeyCode::Tab => {
                self.selection_mode = match self.selection_mode {
                    SelectionMode::Random => SelectionMode::Manual,
                    SelectionMode::Manual => SelectionMode::Random,
                };
            }
            KeyCode::Left if self.grid_cursor > 0 => self.grid_cursor -= 1,
            KeyCode::Right if self.grid_cursor + 1 < grid_len => self.grid_cursor += 1,
            KeyCode::Up if self.grid_cursor >= GRID_COLUMNS => self.grid_cursor -= GRID_COLUMNS,
            KeyCode::Down if self.grid_cursor + GRID_COLUMNS < grid_len => {
                self.grid_cursor += GRID_COLUMNS
            }
            KeyCode::Char(' ') if self.selection_mode == SelectionMode::Manual => {
                self.toggle_selected()
            }
            KeyCode::Char('a') if self.selection_mode == SelectionMode::Manual => {
                if self.manual_selection.len() == grid_len {
                    self.manual_selection.clear();
                } else {
                    self.manual_selection = self.selectable_characters();
                }
            }
            KeyCode::Char('t') => self.dispatch(Action::SetCharacterTimer(!character_timer)),
            KeyCode::Char('d') => {
                let secs = cycle_preset(&CHARACTER_TIMER_PRESETS, character_timer_duration, true);
                self.dispatch(Action::SetCharacterTimerDuration(secs));
            }
            KeyCode::Char('s') => self.dispatch(Action::SetShuffleManualSelection(!shuffle)),
            KeyCode::Enter => self.start_game(),
            KeyCode::Esc => self.dispatch(Action::SetGameStatus(GameStatus::Options)),
            _ => {}
        }
    }

    fn toggle_selected(&mut self) {
        let Some(character) = self.selectable_characters().get(self.grid_cursor).copied() else {
            return;
        };
        if let Some(pos) = self.manual_selection.iter().position(|c| *c == character) {
            self.manual_selection.remove(pos);
        } else {
            self.manual_selection.push(character);
        }
    }

    fn start_game(&mut self) {
        self.feedback = None;
        self.input.clear();
        let manual = self.selection_mode == SelectionMode::Manual && !self.manual_selection.is_empty();
        if manual {
            debug!(chosen = self.manual_selection.len(), "starting with manual selection");
            self.dispatch(Action::StartGame {
                selected_characters: self.manual_selection.clone(),
            });
        } else {
            // a random draw must not fall back to a selection made earlier
            self.dispatch(Action::SetSelectedCharacters(Vec::new()));
            self.dispatch(Action::start_game());
        }
    }

    fn on_playing_key(&mut self, code: KeyCode) {
        match (self.state.options.answer_mode, code) {
            (_, KeyCode::Esc) => {
                self.feedback = None;
                self.dispatch(Action::ResetGame);
            }
            (_, KeyCode::Tab) => self.submit(String::new()),
            (_, KeyCode::Char('?')) => self.show_hint = !self.show_hint,

            (AnswerMode::Typing, KeyCode::Char(c)) => self.input.push(c),
            (AnswerMode::Typing, KeyCode::Backspace) => {
                self.input.pop();
            }
            (AnswerMode::Typing, KeyCode::Enter) => {
                if !self.input.trim().is_empty() {
                    let answer = std::mem::take(&mut self.input);
                    self.submit(answer);
                }
            }

            (AnswerMode::MultipleChoice, KeyCode::Up | KeyCode::Left) => {
                self.choice_cursor = self.choice_cursor.saturating_sub(1)
            }
            (AnswerMode::MultipleChoice, KeyCode::Down | KeyCode::Right) => {
                if self.choice_cursor + 1 < self.choices.len() {
                    self.choice_cursor += 1;
                }
            }
            (AnswerMode::MultipleChoice, KeyCode::Char(c)) => {
                if let Some(idx) = c.to_digit(10).and_then(|d| (d as usize).checked_sub(1)) {
                    if let Some(choice) = self.choices.get(idx).cloned() {
                        self.submit(choice);
                    }
                }
            }
            (AnswerMode::MultipleChoice, KeyCode::Enter) => {
                if let Some(choice) = self.choices.get(self.choice_cursor).cloned() {
                    self.submit(choice);
                }
            }
            _ => {}
        }
    }

    fn on_results_key(&mut self, code: KeyCode) {
        self.feedback = None;
        match code {
            KeyCode::Char('r') => self.dispatch(Action::restart(false)),
            KeyCode::Char('i') => self.dispatch(Action::restart(true)),
            KeyCode::Char('n') | KeyCode::Esc => self.dispatch(Action::ResetGame),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    /// Record `answer` for the current card; an empty answer is a skip.
    fn submit(&mut self, answer: String) {
        if let Some(character) = self.state.current_character().copied() {
            self.feedback = Some(Feedback {
                character,
                correct: is_answer_correct(&answer, character.romaji),
                answer: answer.clone(),
            });
        }
        self.input.clear();
        self.show_hint = false;
        self.dispatch(Action::SubmitAnswer(answer));
    }

    fn refresh_choices(&mut self) {
        let playing = self.state.status == GameStatus::Playing
            && self.state.options.answer_mode == AnswerMode::MultipleChoice;
        let Some(character) = self.state.current_character().copied().filter(|_| playing) else {
            self.choices.clear();
            self.choices_for = None;
            return;
        };

        let key = (self.state.start_time, self.state.current_index);
        if self.choices_for == Some(key) {
            return;
        }

        let mut pool = self.selectable_characters();
        pool.extend(self.state.character_sequence.iter().copied());
        self.choices = multiple_choice_options(character.romaji, &pool, DISTRACTORS, &mut self.rng);
        self.choice_cursor = 0;
        self.choices_for = Some(key);
    }
}

/// Step to the neighbouring preset; an off-preset value snaps to the first one
fn cycle_preset<T: Copy + PartialEq>(presets: &[T], current: T, forward: bool) -> T {
    match presets.iter().position(|p| *p == current) {
        Some(i) if forward => presets[(i + 1) % presets.len()],
        Some(i) => presets[(i + presets.len() - 1) % presets.len()],
        None => presets[0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kana::resolve_glyphs;

    fn app() -> App {
        App::with_rng(GameOptions::default(), StdRng::seed_from_u64(11))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn manual_app(glyphs: &str) -> App {
        let options = GameOptions {
            selected_characters: resolve_glyphs(glyphs).unwrap(),
            shuffle_manual_selection: false,
            ..GameOptions::default()
        };
        App::with_rng(options, StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_cycle_preset() {
        assert_eq!(cycle_preset(&CHARACTER_COUNT_PRESETS, 10, true), 15);
        assert_eq!(cycle_preset(&CHARACTER_COUNT_PRESETS, 46, true), 5);
        assert_eq!(cycle_preset(&CHARACTER_COUNT_PRESETS, 5, false), 46);
        assert_eq!(cycle_preset(&SESSION_TIMER_PRESETS, 7, true), 60);
    }

    #[test]
    fn test_start_screen_picks_script() {
        let mut app = app();
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.state.options.script_filter, ScriptFilter::Katakana);
        assert_eq!(app.state.status, GameStatus::Options);
    }

    #[test]
    fn test_options_navigation() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char(' ')); // yōon
        assert!(app.state.options.include_yoon);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right); // count 10 -> 15
        assert_eq!(app.state.options.character_count, 15);

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up); // wraps to answer mode
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.state.options.answer_mode, AnswerMode::MultipleChoice);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.status, GameStatus::CharacterSelection);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.status, GameStatus::Options);
    }

    #[test]
    fn test_random_game_through_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Enter); // start -> options
        press(&mut app, KeyCode::Enter); // options -> selection
        press(&mut app, KeyCode::Enter); // random start
        assert_eq!(app.state.status, GameStatus::Playing);
        assert_eq!(app.state.character_sequence.len(), 10);

        for _ in 0..10 {
            let romaji = app.state.current_character().unwrap().romaji;
            type_str(&mut app, romaji);
            press(&mut app, KeyCode::Enter);
        }
        assert_eq!(app.state.status, GameStatus::Results);
        assert_eq!(app.state.result().accuracy_percent, 100.0);
    }

    #[test]
    fn test_manual_selection_grid() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.selection_mode, SelectionMode::Manual);

        press(&mut app, KeyCode::Char(' ')); // あ
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' ')); // grid index 10: さ
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char(' ')); // し
        press(&mut app, KeyCode::Char(' ')); // し again, unselect
        let glyphs: Vec<_> = app.manual_selection.iter().map(|k| k.glyph).collect();
        assert_eq!(glyphs, vec!["あ", "さ"]);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.character_sequence.len(), 2);
    }

    #[test]
    fn test_enter_on_empty_input_does_nothing() {
        let mut app = manual_app("あ い");
        app.dispatch(Action::start_game());
        type_str(&mut app, "  ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.current_index, 0);
    }

    #[test]
    fn test_typing_feedback_and_backspace() {
        let mut app = manual_app("か き");
        app.dispatch(Action::start_game());
        type_str(&mut app, "kx");
        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "a");
        press(&mut app, KeyCode::Enter);

        let feedback = app.feedback.clone().unwrap();
        assert!(feedback.correct);
        assert_eq!(feedback.character.glyph, "か");
        assert!(app.input.is_empty());

        press(&mut app, KeyCode::Tab); // skip き
        assert_eq!(app.state.status, GameStatus::Results);
        assert!(!app.feedback.clone().unwrap().correct);
    }

    #[test]
    fn test_hint_toggle_resets_on_next_card() {
        let mut app = manual_app("あ い");
        app.dispatch(Action::start_game());
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_hint);
        assert!(app.input.is_empty());
        press(&mut app, KeyCode::Tab);
        assert!(!app.show_hint);
    }

    #[test]
    fn test_multiple_choice_flow() {
        let mut app = manual_app("あ い う え");
        app.dispatch(Action::SetAnswerMode(AnswerMode::MultipleChoice));
        app.dispatch(Action::start_game());
        assert_eq!(app.choices.len(), DISTRACTORS + 1);
        assert!(app.choices.contains(&"a".to_string()));

        let right = app.choices.iter().position(|c| c == "a").unwrap();
        for _ in 0..right {
            press(&mut app, KeyCode::Down);
        }
        press(&mut app, KeyCode::Enter);
        assert!(app.feedback.clone().unwrap().correct);
        assert_eq!(app.state.current_index, 1);
        assert!(app.choices.contains(&"i".to_string()));

        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.state.current_index, 2);
    }

    #[test]
    fn test_choices_cleared_outside_play() {
        let mut app = manual_app("あ");
        app.dispatch(Action::SetAnswerMode(AnswerMode::MultipleChoice));
        app.dispatch(Action::start_game());
        assert!(!app.choices.is_empty());
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.state.status, GameStatus::Results);
        assert!(app.choices.is_empty());
    }

    #[test]
    fn test_results_keys() {
        let mut app = manual_app("あ い");
        app.dispatch(Action::start_game());
        type_str(&mut app, "a");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "x");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.status, GameStatus::Results);

        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.state.status, GameStatus::Playing);
        assert_eq!(app.state.character_sequence.len(), 1);
        assert_eq!(app.state.character_sequence[0].glyph, "い");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.status, GameStatus::Start);
        assert!(app.state.character_sequence.is_empty());
    }

    #[test]
    fn test_card_timer_expiry_through_ticks() {
        let mut app = manual_app("あ い");
        app.dispatch(Action::SetCharacterTimer(true));
        app.dispatch(Action::SetCharacterTimerDuration(1));
        app.dispatch(Action::start_game());

        for _ in 0..10 {
            app.on_tick(Duration::from_millis(100));
        }
        assert_eq!(app.state.current_index, 1);
        assert_eq!(app.state.user_answers[0], "");
        assert!(!app.feedback.clone().unwrap().correct);
    }

    #[test]
    fn test_session_timer_expiry_through_ticks() {
        let mut app = manual_app("あ い う");
        app.dispatch(Action::SetUseTimer(true));
        app.dispatch(Action::SetTimerDuration(2));
        app.dispatch(Action::start_game());

        app.on_tick(Duration::from_secs(1));
        assert_eq!(app.state.status, GameStatus::Playing);
        app.on_tick(Duration::from_secs(1));
        assert_eq!(app.state.status, GameStatus::Results);
        assert!(app.state.end_time.is_some());
        assert!(app.timers.session().is_none());
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = manual_app("あ");
        app.dispatch(Action::start_game());
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert!(app.input.is_empty());
    }
}
