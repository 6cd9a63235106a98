use crate::kana::{all_characters_of_script, KanaCharacter, ScriptFilter};
use crate::scoring::{summarize_session, GameResult};
use crate::selection::{random_subset, shuffle};
use rand::Rng;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::time::SystemTime;
use tracing::{debug, debug_span, info};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    #[default]
    Start,
    Options,
    CharacterSelection,
    Playing,
    Results,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerMode {
    #[default]
    Typing,
    #[strum(serialize = "Multiple choice")]
    MultipleChoice,
}

/// User configuration. Survives `ResetGame`, but not a process restart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameOptions {
    pub script_filter: ScriptFilter,
    pub include_yoon: bool,
    pub include_dakuten_handakuten: bool,
    /// Size of a random draw; ignored when characters are picked by hand
    pub character_count: usize,
    pub selected_characters: Vec<KanaCharacter>,
    pub use_timer: bool,
    /// Session length in seconds
    pub timer_duration: u64,
    pub character_timer: bool,
    /// Seconds allowed per card
    pub character_timer_duration: u64,
    pub shuffle_manual_selection: bool,
    pub answer_mode: AnswerMode,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            script_filter: ScriptFilter::Hiragana,
            include_yoon: false,
            include_dakuten_handakuten: false,
            character_count: 10,
            selected_characters: Vec::new(),
            use_timer: false,
            timer_duration: 120,
            character_timer: false,
            character_timer_duration: 10,
            shuffle_manual_selection: true,
            answer_mode: AnswerMode::Typing,
        }
    }
}

/// Everything the screens read. Replaced wholesale by [`reduce`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameState {
    pub status: GameStatus,
    pub options: GameOptions,
    pub character_sequence: Vec<KanaCharacter>,
    pub current_index: usize,
    /// One slot per card, empty until answered
    pub user_answers: Vec<String>,
    pub start_time: Option<SystemTime>,
    pub end_time: Option<SystemTime>,
    pub session_timer_active: bool,
    pub character_timer_active: bool,
}

impl GameState {
    pub fn new(options: GameOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn current_character(&self) -> Option<&KanaCharacter> {
        self.character_sequence.get(self.current_index)
    }

    /// Score the session so far; an unfinished session is timed up to now.
    pub fn result(&self) -> GameResult {
        summarize_session(
            &self.character_sequence,
            &self.user_answers,
            self.start_time,
            self.end_time,
        )
    }

    fn begin(self, characters: Vec<KanaCharacter>, now: SystemTime) -> Self {
        info!(cards = characters.len(), "session started");
        let user_answers = vec![String::new(); characters.len()];
        Self {
            status: GameStatus::Playing,
            character_sequence: characters,
            user_answers,
            current_index: 0,
            start_time: Some(now),
            end_time: None,
            session_timer_active: self.options.use_timer,
            character_timer_active: self.options.character_timer,
            ..self
        }
    }

    fn advance(self, now: SystemTime) -> Self {
        let len = self.character_sequence.len();
        if self.current_index + 1 >= len {
            info!(cards = len, "session finished");
            Self {
                status: GameStatus::Results,
                end_time: Some(now),
                session_timer_active: false,
                character_timer_active: false,
                ..self
            }
        } else {
            Self {
                current_index: self.current_index + 1,
                character_timer_active: self.options.character_timer,
                ..self
            }
        }
    }

    fn maybe_shuffle<R: Rng + ?Sized>(
        &self,
        chars: &[KanaCharacter],
        rng: &mut R,
    ) -> Vec<KanaCharacter> {
        if self.options.shuffle_manual_selection {
            shuffle(chars, rng)
        } else {
            chars.to_vec()
        }
    }
}

/// Every way the screens can change the game.
///
/// In JSON an action is `{"type": "SUBMIT_ANSWER", "payload": "ka"}`; kana
/// payloads are written as glyph strings. A `type` this build doesn't know
/// becomes [`Action::Unknown`] whatever its payload, and `START_GAME` /
/// `RESTART_GAME` may leave the payload out.
#[derive(Debug, Clone, PartialEq, Serialize, strum_macros::IntoStaticStr)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    SetKanaType(ScriptFilter),
    SetIncludeYoon(bool),
    SetIncludeDakutenHandakuten(bool),
    SetCharacterCount(usize),
    SetSelectedCharacters(#[serde(serialize_with = "glyph_list")] Vec<KanaCharacter>),
    SetUseTimer(bool),
    SetTimerDuration(u64),
    SetCharacterTimer(bool),
    SetCharacterTimerDuration(u64),
    SetShuffleManualSelection(bool),
    SetAnswerMode(AnswerMode),
    SetGameStatus(GameStatus),
    StartGame {
        #[serde(serialize_with = "glyph_list")]
        selected_characters: Vec<KanaCharacter>,
    },
    SubmitAnswer(String),
    NextCharacter,
    ResetGame,
    RestartGame {
        retry_incorrect: bool,
    },
    StartTimer,
    StopTimer,
    StartCharacterTimer,
    StopCharacterTimer,
    Unknown,
}

impl Action {
    pub fn start_game() -> Self {
        Action::StartGame {
            selected_characters: Vec::new(),
        }
    }

    pub fn restart(retry_incorrect: bool) -> Self {
        Action::RestartGame { retry_incorrect }
    }
}

/// The transition function. Total over every state and action; anything that
/// doesn't apply leaves the state as it was.
pub fn reduce<R: Rng + ?Sized>(
    state: GameState,
    action: Action,
    now: SystemTime,
    rng: &mut R,
) -> GameState {
    let kind: &'static str = (&action).into();
    let _span = debug_span!("reduce", action = kind, status = %state.status).entered();

    match action {
        Action::SetKanaType(filter) => with_options(state, |o| o.script_filter = filter),
        Action::SetIncludeYoon(v) => with_options(state, |o| o.include_yoon = v),
        Action::SetIncludeDakutenHandakuten(v) => {
            with_options(state, |o| o.include_dakuten_handakuten = v)
        }
        Action::SetCharacterCount(n) => with_options(state, |o| o.character_count = n),
        Action::SetSelectedCharacters(chars) => {
            with_options(state, |o| o.selected_characters = chars)
        }
        Action::SetUseTimer(v) => with_options(state, |o| o.use_timer = v),
        Action::SetTimerDuration(secs) => with_options(state, |o| o.timer_duration = secs),
        Action::SetCharacterTimer(v) => with_options(state, |o| o.character_timer = v),
        Action::SetCharacterTimerDuration(secs) => {
            with_options(state, |o| o.character_timer_duration = secs)
        }
        Action::SetShuffleManualSelection(v) => {
            with_options(state, |o| o.shuffle_manual_selection = v)
        }
        Action::SetAnswerMode(mode) => with_options(state, |o| o.answer_mode = mode),
        Action::SetGameStatus(status) => GameState { status, ..state },

        Action::StartGame {
            selected_characters,
        } => {
            let characters = if !selected_characters.is_empty() {
                state.maybe_shuffle(&selected_characters, rng)
            } else if !state.options.selected_characters.is_empty() {
                state.maybe_shuffle(&state.options.selected_characters, rng)
            } else {
                let o = &state.options;
                let pool = all_characters_of_script(
                    o.script_filter,
                    o.include_yoon,
                    o.include_dakuten_handakuten,
                );
                debug!(pool = pool.len(), count = o.character_count, "random draw");
                random_subset(&pool, o.character_count, rng)
            };
            state.begin(characters, now)
        }

        Action::SubmitAnswer(answer) => {
            if state.status != GameStatus::Playing {
                debug!("answer outside of play ignored");
                return state;
            }
            let mut state = state;
            if let Some(slot) = state.user_answers.get_mut(state.current_index) {
                *slot = answer;
            }
            state.advance(now)
        }

        Action::NextCharacter => {
            if state.status != GameStatus::Playing {
                return state;
            }
            state.advance(now)
        }

        Action::ResetGame => GameState::new(state.options),

        Action::RestartGame { retry_incorrect } => {
            if retry_incorrect && state.status == GameStatus::Results {
                let result = state.result();
                if !result.incorrect.is_empty() {
                    let characters = state.maybe_shuffle(&result.incorrect, rng);
                    return state.begin(characters, now);
                }
                debug!("nothing to retry, replaying the full deck");
            }
            let characters = state.maybe_shuffle(&state.character_sequence, rng);
            state.begin(characters, now)
        }

        Action::StartTimer => GameState {
            session_timer_active: true,
            ..state
        },
        Action::StopTimer => GameState {
            session_timer_active: false,
            end_time: state.end_time.or(Some(now)),
            ..state
        },
        Action::StartCharacterTimer => GameState {
            character_timer_active: true,
            ..state
        },
        Action::StopCharacterTimer => GameState {
            character_timer_active: false,
            ..state
        },

        Action::Unknown => state,
    }
}

/// [`reduce`] against the wall clock and the thread-local RNG
pub fn dispatch(state: GameState, action: Action) -> GameState {
    reduce(state, action, SystemTime::now(), &mut rand::thread_rng())
}

fn with_options(mut state: GameState, set: impl FnOnce(&mut GameOptions)) -> GameState {
    set(&mut state.options);
    state
}

/// Kana lists travel as glyph strings
fn glyph_list<S: Serializer>(chars: &[KanaCharacter], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(chars.iter().map(|c| c.glyph))
}

#[derive(Deserialize)]
struct TaggedAction {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Option<Value>,
}

#[derive(Default, Deserialize)]
struct StartGamePayload {
    #[serde(default)]
    selected_characters: Vec<KanaCharacter>,
}

#[derive(Default, Deserialize)]
struct RestartGamePayload {
    #[serde(default)]
    retry_incorrect: bool,
}

/// A required payload; absent reads as `null` and fails for every payload type
fn required<T: DeserializeOwned>(payload: Option<Value>) -> Result<T, serde_json::Error> {
    serde_json::from_value(payload.unwrap_or(Value::Null))
}

fn optional<T: DeserializeOwned + Default>(payload: Option<Value>) -> Result<T, serde_json::Error> {
    match payload {
        None | Some(Value::Null) => Ok(T::default()),
        Some(v) => serde_json::from_value(v),
    }
}

impl TaggedAction {
    fn into_action(self) -> Result<Action, serde_json::Error> {
        let p = self.payload;
        Ok(match self.kind.as_str() {
            "SET_KANA_TYPE" => Action::SetKanaType(required(p)?),
            "SET_INCLUDE_YOON" => Action::SetIncludeYoon(required(p)?),
            "SET_INCLUDE_DAKUTEN_HANDAKUTEN" => Action::SetIncludeDakutenHandakuten(required(p)?),
            "SET_CHARACTER_COUNT" => Action::SetCharacterCount(required(p)?),
            "SET_SELECTED_CHARACTERS" => Action::SetSelectedCharacters(required(p)?),
            "SET_USE_TIMER" => Action::SetUseTimer(required(p)?),
            "SET_TIMER_DURATION" => Action::SetTimerDuration(required(p)?),
            "SET_CHARACTER_TIMER" => Action::SetCharacterTimer(required(p)?),
            "SET_CHARACTER_TIMER_DURATION" => Action::SetCharacterTimerDuration(required(p)?),
            "SET_SHUFFLE_MANUAL_SELECTION" => Action::SetShuffleManualSelection(required(p)?),
            "SET_ANSWER_MODE" => Action::SetAnswerMode(required(p)?),
            "SET_GAME_STATUS" => Action::SetGameStatus(required(p)?),
            "START_GAME" => {
                let StartGamePayload {
                    selected_characters,
                } = optional(p)?;
                Action::StartGame {
                    selected_characters,
                }
            }
            "SUBMIT_ANSWER" => Action::SubmitAnswer(required(p)?),
            "NEXT_CHARACTER" => Action::NextCharacter,
            "RESET_GAME" => Action::ResetGame,
            "RESTART_GAME" => {
                let RestartGamePayload { retry_incorrect } = optional(p)?;
                Action::RestartGame { retry_incorrect }
            }
            "START_TIMER" => Action::StartTimer,
            "STOP_TIMER" => Action::StopTimer,
            "START_CHARACTER_TIMER" => Action::StartCharacterTimer,
            "STOP_CHARACTER_TIMER" => Action::StopCharacterTimer,
            other => {
                debug!(kind = other, "unrecognised action type");
                Action::Unknown
            }
        })
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let tagged = TaggedAction::deserialize(d)?;
        tagged.into_action().map_err(D::Error::custom)
    }
}
