use crate::kana::KanaCharacter;
use itertools::{EitherOrBoth, Itertools};
use serde::Serialize;
use std::time::SystemTime;

/// Summary of a session, derived from the game state on demand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameResult {
    pub correct: Vec<KanaCharacter>,
    pub incorrect: Vec<KanaCharacter>,
    pub user_answers: Vec<String>,
    pub accuracy_percent: f64,
    pub elapsed_seconds: f64,
}

impl GameResult {
    pub fn total(&self) -> usize {
        self.correct.len() + self.incorrect.len()
    }
}

/// Case and surrounding whitespace are ignored; everything else must match exactly.
pub fn is_answer_correct(submitted: &str, expected_romaji: &str) -> bool {
    submitted.trim().to_lowercase() == expected_romaji.trim().to_lowercase()
}

/// Score `characters` against the parallel `user_answers` slots.
///
/// A missing or empty slot is incorrect. Without an `end_time` the clock is
/// read, which gives a live figure for a session still in progress.
pub fn summarize_session(
    characters: &[KanaCharacter],
    user_answers: &[String],
    start_time: Option<SystemTime>,
    end_time: Option<SystemTime>,
) -> GameResult {
    let mut correct = Vec::new();
    let mut incorrect = Vec::new();

    for pair in characters.iter().zip_longest(user_answers.iter()) {
        match pair {
            EitherOrBoth::Both(character, answer) => {
                if is_answer_correct(answer, character.romaji) {
                    correct.push(*character);
                } else {
                    incorrect.push(*character);
                }
            }
            EitherOrBoth::Left(character) => incorrect.push(*character),
            EitherOrBoth::Right(_) => {}
        }
    }

    let accuracy_percent = if characters.is_empty() {
        0.0
    } else {
        correct.len() as f64 / characters.len() as f64 * 100.0
    };

    let elapsed_seconds = match start_time {
        Some(start) => end_time
            .unwrap_or_else(SystemTime::now)
            .duration_since(start)
            .unwrap_or_default()
            .as_secs_f64(),
        None => 0.0,
    };

    GameResult {
        correct,
        incorrect,
        user_answers: user_answers.to_vec(),
        accuracy_percent,
        elapsed_seconds,
    }
}

/// Headline shown above the results
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Performance {
    #[strum(serialize = "Perfect! Every kana correct.")]
    Excellent,
    #[strum(serialize = "Great work, nearly there.")]
    Great,
    #[strum(serialize = "Good progress. Keep going!")]
    Good,
    #[strum(serialize = "Keep practicing, it gets easier.")]
    KeepPracticing,
}

impl Performance {
    pub fn from_accuracy(accuracy_percent: f64) -> Self {
        if accuracy_percent >= 100.0 {
            Performance::Excellent
        } else if accuracy_percent >= 90.0 {
            Performance::Great
        } else if accuracy_percent >= 70.0 {
            Performance::Good
        } else {
            Performance::KeepPracticing
        }
    }
}

/// `MM:SS` for timer display; fractional seconds are dropped
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kana::{all_characters_of_script, ScriptFilter};
    use proptest::prelude::*;
    use std::time::Duration;

    fn answers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn first_n(n: usize) -> Vec<KanaCharacter> {
        all_characters_of_script(ScriptFilter::Hiragana, false, false)[..n].to_vec()
    }

    #[test]
    fn test_is_answer_correct() {
        assert!(is_answer_correct("Shi", "shi"));
        assert!(is_answer_correct(" shi ", "shi"));
        assert!(is_answer_correct("\tKA\n", "ka"));
        assert!(!is_answer_correct("si", "shi"));
        assert!(!is_answer_correct("", "a"));
        assert!(!is_answer_correct("s hi", "shi"));
    }

    #[test]
    fn test_summarize_mixed() {
        let chars = first_n(4); // a i u e
        let start = SystemTime::UNIX_EPOCH;
        let end = start + Duration::from_millis(12_500);
        let result = summarize_session(&chars, &answers(&["a", "x", "U", ""]), Some(start), Some(end));

        assert_eq!(result.correct.len(), 2);
        assert_eq!(result.incorrect.len(), 2);
        assert_eq!(result.incorrect[0].glyph, "い");
        assert_eq!(result.incorrect[1].glyph, "え");
        assert_eq!(result.accuracy_percent, 50.0);
        assert_eq!(result.elapsed_seconds, 12.5);
        assert_eq!(result.total(), 4);
    }

    #[test]
    fn test_summarize_empty_session() {
        let result = summarize_session(&[], &[], None, None);
        assert_eq!(result.accuracy_percent, 0.0);
        assert!(!result.accuracy_percent.is_nan());
        assert_eq!(result.elapsed_seconds, 0.0);
    }

    #[test]
    fn test_summarize_missing_answers_are_incorrect() {
        let chars = first_n(3);
        let result = summarize_session(&chars, &answers(&["a"]), None, None);
        assert_eq!(result.correct.len(), 1);
        assert_eq!(result.incorrect.len(), 2);
    }

    #[test]
    fn test_summarize_extra_answers_are_ignored() {
        let chars = first_n(1);
        let result = summarize_session(&chars, &answers(&["a", "i", "u"]), None, None);
        assert_eq!(result.total(), 1);
        assert_eq!(result.accuracy_percent, 100.0);
    }

    #[test]
    fn test_summarize_live_elapsed_uses_now() {
        let chars = first_n(1);
        let start = SystemTime::now() - Duration::from_secs(3);
        let result = summarize_session(&chars, &answers(&[""]), Some(start), None);
        assert!(result.elapsed_seconds >= 3.0);
    }

    #[test]
    fn test_summarize_end_before_start_is_zero() {
        let start = SystemTime::now();
        let end = start - Duration::from_secs(5);
        let result = summarize_session(&first_n(1), &answers(&["a"]), Some(start), Some(end));
        assert_eq!(result.elapsed_seconds, 0.0);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(120), "02:00");
        assert_eq!(format_time(3599), "59:59");
    }

    #[test]
    fn test_performance_thresholds() {
        assert_eq!(Performance::from_accuracy(100.0), Performance::Excellent);
        assert_eq!(Performance::from_accuracy(95.0), Performance::Great);
        assert_eq!(Performance::from_accuracy(90.0), Performance::Great);
        assert_eq!(Performance::from_accuracy(70.0), Performance::Good);
        assert_eq!(Performance::from_accuracy(69.9), Performance::KeepPracticing);
        assert_eq!(Performance::from_accuracy(0.0), Performance::KeepPracticing);
    }

    proptest! {
        #[test]
        fn prop_summary_partitions(picks in proptest::collection::vec((0usize..46, any::<bool>()), 0..40)) {
            let pool = all_characters_of_script(ScriptFilter::Hiragana, false, false);
            let chars: Vec<KanaCharacter> = picks.iter().map(|(i, _)| pool[*i]).collect();
            let user_answers: Vec<String> = picks
                .iter()
                .map(|(i, right)| if *right { pool[*i].romaji.to_uppercase() } else { String::from("?") })
                .collect();

            let result = summarize_session(&chars, &user_answers, None, None);
            prop_assert_eq!(result.correct.len() + result.incorrect.len(), chars.len());
            prop_assert_eq!(result.correct.len(), picks.iter().filter(|(_, r)| *r).count());
            prop_assert!((0.0..=100.0).contains(&result.accuracy_percent));
        }
    }
}
