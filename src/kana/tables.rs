//! Static kana tables. One entry per glyph; digraphs are a single entry.
use super::{Category::*, KanaCharacter, Script};

macro_rules! kana_table {
    ($name:ident, $script:ident, [$(($glyph:literal, $romaji:literal, $category:ident)),* $(,)?]) => {
        pub static $name: &[KanaCharacter] = &[$(
            KanaCharacter {
                glyph: $glyph,
                romaji: $romaji,
                script: Script::$script,
                category: Some($category),
            }
        ),*];
    };
}

kana_table!(BASIC_HIRAGANA, Hiragana, [
    ("あ", "a", Basic),
    ("い", "i", Basic),
    ("う", "u", Basic),
    ("え", "e", Basic),
    ("お", "o", Basic),
    ("か", "ka", Basic),
    ("き", "ki", Basic),
    ("く", "ku", Basic),
    ("け", "ke", Basic),
    ("こ", "ko", Basic),
    ("さ", "sa", Basic),
    ("し", "shi", Basic),
    ("す", "su", Basic),
    ("せ", "se", Basic),
    ("そ", "so", Basic),
    ("た", "ta", Basic),
    ("ち", "chi", Basic),
    ("つ", "tsu", Basic),
    ("て", "te", Basic),
    ("と", "to", Basic),
    ("な", "na", Basic),
    ("に", "ni", Basic),
    ("ぬ", "nu", Basic),
    ("ね", "ne", Basic),
    ("の", "no", Basic),
    ("は", "ha", Basic),
    ("ひ", "hi", Basic),
    ("ふ", "fu", Basic),
    ("へ", "he", Basic),
    ("ほ", "ho", Basic),
    ("ま", "ma", Basic),
    ("み", "mi", Basic),
    ("む", "mu", Basic),
    ("め", "me", Basic),
    ("も", "mo", Basic),
    ("や", "ya", Basic),
    ("ゆ", "yu", Basic),
    ("よ", "yo", Basic),
    ("ら", "ra", Basic),
    ("り", "ri", Basic),
    ("る", "ru", Basic),
    ("れ", "re", Basic),
    ("ろ", "ro", Basic),
    ("わ", "wa", Basic),
    ("を", "wo", Basic),
    ("ん", "n", Basic),
]);

kana_table!(DAKUTEN_HIRAGANA, Hiragana, [
    ("が", "ga", Dakuten),
    ("ぎ", "gi", Dakuten),
    ("ぐ", "gu", Dakuten),
    ("げ", "ge", Dakuten),
    ("ご", "go", Dakuten),
    ("ざ", "za", Dakuten),
    ("じ", "ji", Dakuten),
    ("ず", "zu", Dakuten),
    ("ぜ", "ze", Dakuten),
    ("ぞ", "zo", Dakuten),
    ("だ", "da", Dakuten),
    ("ぢ", "ji", Dakuten),
    ("づ", "zu", Dakuten),
    ("で", "de", Dakuten),
    ("ど", "do", Dakuten),
    ("ば", "ba", Dakuten),
    ("び", "bi", Dakuten),
    ("ぶ", "bu", Dakuten),
    ("べ", "be", Dakuten),
    ("ぼ", "bo", Dakuten),
    ("ぱ", "pa", Handakuten),
    ("ぴ", "pi", Handakuten),
    ("ぷ", "pu", Handakuten),
    ("ぺ", "pe", Handakuten),
    ("ぽ", "po", Handakuten),
]);

kana_table!(YOON_HIRAGANA, Hiragana, [
    ("きゃ", "kya", Yoon),
    ("きゅ", "kyu", Yoon),
    ("きょ", "kyo", Yoon),
    ("しゃ", "sha", Yoon),
    ("しゅ", "shu", Yoon),
    ("しょ", "sho", Yoon),
    ("ちゃ", "cha", Yoon),
    ("ちゅ", "chu", Yoon),
    ("ちょ", "cho", Yoon),
    ("にゃ", "nya", Yoon),
    ("にゅ", "nyu", Yoon),
    ("にょ", "nyo", Yoon),
    ("ひゃ", "hya", Yoon),
    ("ひゅ", "hyu", Yoon),
    ("ひょ", "hyo", Yoon),
    ("みゃ", "mya", Yoon),
    ("みゅ", "myu", Yoon),
    ("みょ", "myo", Yoon),
    ("りゃ", "rya", Yoon),
    ("りゅ", "ryu", Yoon),
    ("りょ", "ryo", Yoon),
    ("ぎゃ", "gya", Yoon),
    ("ぎゅ", "gyu", Yoon),
    ("ぎょ", "gyo", Yoon),
    ("じゃ", "ja", Yoon),
    ("じゅ", "ju", Yoon),
    ("じょ", "jo", Yoon),
    ("びゃ", "bya", Yoon),
    ("びゅ", "byu", Yoon),
    ("びょ", "byo", Yoon),
    ("ぴゃ", "pya", Yoon),
    ("ぴゅ", "pyu", Yoon),
    ("ぴょ", "pyo", Yoon),
]);

kana_table!(BASIC_KATAKANA, Katakana, [
    ("ア", "a", Basic),
    ("イ", "i", Basic),
    ("ウ", "u", Basic),
    ("エ", "e", Basic),
    ("オ", "o", Basic),
    ("カ", "ka", Basic),
    ("キ", "ki", Basic),
    ("ク", "ku", Basic),
    ("ケ", "ke", Basic),
    ("コ", "ko", Basic),
    ("サ", "sa", Basic),
    ("シ", "shi", Basic),
    ("ス", "su", Basic),
    ("セ", "se", Basic),
    ("ソ", "so", Basic),
    ("タ", "ta", Basic),
    ("チ", "chi", Basic),
    ("ツ", "tsu", Basic),
    ("テ", "te", Basic),
    ("ト", "to", Basic),
    ("ナ", "na", Basic),
    ("ニ", "ni", Basic),
    ("ヌ", "nu", Basic),
    ("ネ", "ne", Basic),
    ("ノ", "no", Basic),
    ("ハ", "ha", Basic),
    ("ヒ", "hi", Basic),
    ("フ", "fu", Basic),
    ("ヘ", "he", Basic),
    ("ホ", "ho", Basic),
    ("マ", "ma", Basic),
    ("ミ", "mi", Basic),
    ("ム", "mu", Basic),
    ("メ", "me", Basic),
    ("モ", "mo", Basic),
    ("ヤ", "ya", Basic),
    ("ユ", "yu", Basic),
    ("ヨ", "yo", Basic),
    ("ラ", "ra", Basic),
    ("リ", "ri", Basic),
    ("ル", "ru", Basic),
    ("レ", "re", Basic),
    ("ロ", "ro", Basic),
    ("ワ", "wa", Basic),
    ("ヲ", "wo", Basic),
    ("ン", "n", Basic),
]);

kana_table!(DAKUTEN_KATAKANA, Katakana, [
    ("ガ", "ga", Dakuten),
    ("ギ", "gi", Dakuten),
    ("グ", "gu", Dakuten),
    ("ゲ", "ge", Dakuten),
    ("ゴ", "go", Dakuten),
    ("ザ", "za", Dakuten),
    ("ジ", "ji", Dakuten),
    ("ズ", "zu", Dakuten),
    ("ゼ", "ze", Dakuten),
    ("ゾ", "zo", Dakuten),
    ("ダ", "da", Dakuten),
    ("ヂ", "ji", Dakuten),
    ("ヅ", "zu", Dakuten),
    ("デ", "de", Dakuten),
    ("ド", "do", Dakuten),
    ("バ", "ba", Dakuten),
    ("ビ", "bi", Dakuten),
    ("ブ", "bu", Dakuten),
    ("ベ", "be", Dakuten),
    ("ボ", "bo", Dakuten),
    ("パ", "pa", Handakuten),
    ("ピ", "pi", Handakuten),
    ("プ", "pu", Handakuten),
    ("ペ", "pe", Handakuten),
    ("ポ", "po", Handakuten),
]);

kana_table!(YOON_KATAKANA, Katakana, [
    ("キャ", "kya", Yoon),
    ("キュ", "kyu", Yoon),
    ("キョ", "kyo", Yoon),
    ("シャ", "sha", Yoon),
    ("シュ", "shu", Yoon),
    ("ショ", "sho", Yoon),
    ("チャ", "cha", Yoon),
    ("チュ", "chu", Yoon),
    ("チョ", "cho", Yoon),
    ("ニャ", "nya", Yoon),
    ("ニュ", "nyu", Yoon),
    ("ニョ", "nyo", Yoon),
    ("ヒャ", "hya", Yoon),
    ("ヒュ", "hyu", Yoon),
    ("ヒョ", "hyo", Yoon),
    ("ミャ", "mya", Yoon),
    ("ミュ", "myu", Yoon),
    ("ミョ", "myo", Yoon),
    ("リャ", "rya", Yoon),
    ("リュ", "ryu", Yoon),
    ("リョ", "ryo", Yoon),
    ("ギャ", "gya", Yoon),
    ("ギュ", "gyu", Yoon),
    ("ギョ", "gyo", Yoon),
    ("ジャ", "ja", Yoon),
    ("ジュ", "ju", Yoon),
    ("ジョ", "jo", Yoon),
    ("ビャ", "bya", Yoon),
    ("ビュ", "byu", Yoon),
    ("ビョ", "byo", Yoon),
    ("ピャ", "pya", Yoon),
    ("ピュ", "pyu", Yoon),
    ("ピョ", "pyo", Yoon),
]);
