use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::KeyEventKind,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use kanaflash::{
    app::App,
    error::KanaflashError,
    game::{dispatch, Action, AnswerMode, GameOptions, GameState},
    kana::{resolve_glyphs, ScriptFilter},
    logging::{default_log_path, init_logging},
    runtime::{CrosstermEventSource, FixedTicker, QuizEvent, Runner},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::info;

const TICK_RATE_MS: u64 = 100;

/// kana flashcards in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Flashcard drills for hiragana and katakana: type the romaji (or pick it from three choices), race an optional session or per-card timer, then retry the ones you missed."
)]
pub struct Cli {
    /// which scripts a random draw pulls from
    #[clap(long, value_enum, default_value_t = ScriptFilter::Hiragana)]
    script_filter: ScriptFilter,

    /// include yōon combinations such as きゃ
    #[clap(long)]
    yoon: bool,

    /// include dakuten and handakuten characters such as が and ぱ
    #[clap(long)]
    dakuten: bool,

    /// number of characters in a random draw
    #[clap(short = 'n', long, default_value_t = 10)]
    count: usize,

    /// practice exactly these characters, comma or space separated
    #[clap(short = 'c', long)]
    characters: Option<String>,

    /// end the session after this many seconds
    #[clap(long, value_name = "SECS")]
    session_timer: Option<u64>,

    /// skip a card after this many seconds
    #[clap(long, value_name = "SECS")]
    character_timer: Option<u64>,

    /// keep hand-picked characters in the given order
    #[clap(long)]
    no_shuffle: bool,

    /// answer by picking one of three readings instead of typing
    #[clap(long)]
    multiple_choice: bool,

    /// write debug logs to PATH (defaults to the state directory)
    #[clap(long, value_name = "PATH", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    /// replay a JSON list of actions without a terminal and print the result
    #[clap(long, value_name = "FILE")]
    script: Option<PathBuf>,
}

impl TryFrom<&Cli> for GameOptions {
    type Error = KanaflashError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let defaults = GameOptions::default();
        let selected_characters = match &cli.characters {
            Some(list) => resolve_glyphs(list)?,
            None => Vec::new(),
        };

        Ok(GameOptions {
            script_filter: cli.script_filter,
            include_yoon: cli.yoon,
            include_dakuten_handakuten: cli.dakuten,
            character_count: cli.count,
            selected_characters,
            use_timer: cli.session_timer.is_some(),
            timer_duration: cli.session_timer.unwrap_or(defaults.timer_duration),
            character_timer: cli.character_timer.is_some(),
            character_timer_duration: cli
                .character_timer
                .unwrap_or(defaults.character_timer_duration),
            shuffle_manual_selection: !cli.no_shuffle,
            answer_mode: if cli.multiple_choice {
                AnswerMode::MultipleChoice
            } else {
                AnswerMode::Typing
            },
        })
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let options = match GameOptions::try_from(&cli) {
        Ok(options) => options,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::ValueValidation, e).exit();
        }
    };

    let _log_guard = match &cli.log_file {
        Some(path) => {
            let path = match path.clone().or_else(default_log_path) {
                Some(path) => path,
                None => {
                    let mut cmd = Cli::command();
                    cmd.error(ErrorKind::Io, "no default log location, pass a PATH")
                        .exit();
                }
            };
            Some(init_logging(&path)?)
        }
        None => None,
    };

    if let Some(script) = &cli.script {
        let state = run_script(script, options)?;
        println!("{}", serde_json::to_string_pretty(&state.result())?);
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(options);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Fold a transcript of actions over fresh state built from `options`
fn run_script(path: &Path, options: GameOptions) -> Result<GameState, KanaflashError> {
    let text = std::fs::read_to_string(path)?;
    let actions: Vec<Action> = serde_json::from_str(&text)?;
    info!(actions = actions.len(), path = %path.display(), "replaying script");
    Ok(actions
        .into_iter()
        .fold(GameState::new(options), dispatch))
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    while !app.should_quit {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            QuizEvent::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
            QuizEvent::Key(_) | QuizEvent::Resize => {}
            QuizEvent::Tick(elapsed) => app.on_tick(elapsed),
        }
    }

    info!("exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use kanaflash::game::GameStatus;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn options(args: &[&str]) -> GameOptions {
        let mut argv = vec!["kanaflash"];
        argv.extend_from_slice(args);
        GameOptions::try_from(&Cli::parse_from(argv)).unwrap()
    }

    #[test]
    fn test_cli_defaults_match_game_defaults() {
        assert_eq!(options(&[]), GameOptions::default());
    }

    #[test]
    fn test_cli_script_filter() {
        assert_eq!(
            options(&["--script-filter", "both"]).script_filter,
            ScriptFilter::Both
        );
        assert!(Cli::try_parse_from(["kanaflash", "--script-filter", "kanji"]).is_err());
    }

    #[test]
    fn test_cli_flags() {
        let o = options(&["--yoon", "--dakuten", "-n", "20", "--no-shuffle", "--multiple-choice"]);
        assert!(o.include_yoon);
        assert!(o.include_dakuten_handakuten);
        assert_eq!(o.character_count, 20);
        assert!(!o.shuffle_manual_selection);
        assert_eq!(o.answer_mode, AnswerMode::MultipleChoice);
    }

    #[test]
    fn test_cli_timers() {
        let o = options(&["--session-timer", "60", "--character-timer", "5"]);
        assert!(o.use_timer);
        assert_eq!(o.timer_duration, 60);
        assert!(o.character_timer);
        assert_eq!(o.character_timer_duration, 5);

        let o = options(&[]);
        assert!(!o.use_timer);
        assert!(!o.character_timer);
    }

    #[test]
    fn test_cli_characters() {
        let o = options(&["-c", "あ,い う"]);
        let glyphs: Vec<_> = o.selected_characters.iter().map(|k| k.glyph).collect();
        assert_eq!(glyphs, vec!["あ", "い", "う"]);

        let cli = Cli::parse_from(["kanaflash", "--characters", "あ,nope"]);
        assert_matches!(GameOptions::try_from(&cli), Err(KanaflashError::UnknownGlyph(g)) if g == "nope");
    }

    #[test]
    fn test_cli_log_file_optional_value() {
        let cli = Cli::parse_from(["kanaflash"]);
        assert_eq!(cli.log_file, None);
        let cli = Cli::parse_from(["kanaflash", "--log-file"]);
        assert_eq!(cli.log_file, Some(None));
        let cli = Cli::parse_from(["kanaflash", "--log-file", "/tmp/k.log"]);
        assert_eq!(cli.log_file, Some(Some(PathBuf::from("/tmp/k.log"))));
    }

    #[test]
    fn test_run_script() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"type": "SET_SELECTED_CHARACTERS", "payload": ["か", "き"]}},
                {{"type": "SET_SHUFFLE_MANUAL_SELECTION", "payload": false}},
                {{"type": "SET_LANGUAGE", "payload": "ja"}},
                {{"type": "START_GAME"}},
                {{"type": "SUBMIT_ANSWER", "payload": "KA"}},
                {{"type": "WAVE_HELLO"}},
                {{"type": "SUBMIT_ANSWER", "payload": "shi"}}
            ]"#
        )
        .unwrap();

        let state = run_script(file.path(), GameOptions::default()).unwrap();
        assert_eq!(state.status, GameStatus::Results);
        let result = state.result();
        assert_eq!(result.correct.len(), 1);
        assert_eq!(result.incorrect[0].glyph, "き");
    }

    #[test]
    fn test_run_script_rejects_bad_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert_matches!(
            run_script(file.path(), GameOptions::default()),
            Err(KanaflashError::Json(_))
        );
        assert_matches!(
            run_script(Path::new("/definitely/not/here.json"), GameOptions::default()),
            Err(KanaflashError::Io(_))
        );
    }
}
