use crate::kana::KanaCharacter;
use rand::seq::SliceRandom;
use rand::Rng;

/// Fisher-Yates shuffle into a new vector; the input is left alone
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// Draw `min(count, characters.len())` characters without replacement, in random order.
pub fn random_subset<R: Rng + ?Sized>(
    characters: &[KanaCharacter],
    count: usize,
    rng: &mut R,
) -> Vec<KanaCharacter> {
    let mut drawn = shuffle(characters, rng);
    drawn.truncate(count.min(characters.len()));
    drawn
}

/// Build the answer buttons for a multiple-choice card: the correct romaji
/// plus up to `k` distinct distractors from `pool`, shuffled together.
///
/// A pool with fewer than `k` other readings yields fewer options; a pool with
/// none yields just the correct answer.
pub fn multiple_choice_options<R: Rng + ?Sized>(
    correct_romaji: &str,
    pool: &[KanaCharacter],
    k: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut distractors: Vec<&str> = Vec::new();
    for romaji in pool.iter().map(|c| c.romaji) {
        if romaji != correct_romaji && !distractors.contains(&romaji) {
            distractors.push(romaji);
        }
    }

    let mut options: Vec<String> = distractors
        .choose_multiple(rng, k)
        .map(|r| r.to_string())
        .collect();
    options.push(correct_romaji.to_string());
    options.shuffle(rng);
    options
}
