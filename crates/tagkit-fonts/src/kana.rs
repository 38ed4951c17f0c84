#![forbid(unsafe_code)]

//! Japanese kana folding for comparison keys.
//!
//! Font names are frequently typed in a different kana script (or with a
//! different voicing) than the installed family name uses. Folding collapses
//! each syllable to one representative so that `ゴシック`, `ｺﾞｼｯｸ` (after
//! compatibility normalization) and `こしつく` compare as the same key.
//!
//! The table is a fixed many-to-one mapping:
//! - katakana (including obsolete `ヰ ヱ ヲ ヷ ヸ ヹ ヺ` and the small
//!   extension block `ㇰ..ㇿ`) folds to plain hiragana,
//! - voiced and semi-voiced syllables fold to the unvoiced base,
//! - small kana (`ぁ っ ゃ ゎ ヵ ヶ` ...) fold to their full-size base.
//!
//! It is not locale-aware collation. Code points outside the table are
//! returned unchanged.

/// Fold one code point to its canonical kana representative.
#[must_use]
pub fn fold_kana(c: char) -> char {
    match c {
        'ぁ' | 'ァ' | 'ア' => 'あ',
        'ぃ' | 'ゐ' | 'ィ' | 'イ' | 'ヰ' | 'ヸ' => 'い',
        'ぅ' | 'ゔ' | 'ゥ' | 'ウ' | 'ヴ' => 'う',
        'ぇ' | 'ゑ' | 'ェ' | 'エ' | 'ヱ' | 'ヹ' => 'え',
        'ぉ' | 'を' | 'ォ' | 'オ' | 'ヲ' | 'ヺ' => 'お',
        'が' | 'ゕ' | 'カ' | 'ガ' | 'ヵ' => 'か',
        'ぎ' | 'キ' | 'ギ' => 'き',
        'ぐ' | 'ク' | 'グ' | 'ㇰ' => 'く',
        'げ' | 'ゖ' | 'ケ' | 'ゲ' | 'ヶ' => 'け',
        'ご' | 'コ' | 'ゴ' => 'こ',
        'ざ' | 'サ' | 'ザ' => 'さ',
        'じ' | 'シ' | 'ジ' | 'ㇱ' => 'し',
        'ず' | 'ス' | 'ズ' | 'ㇲ' => 'す',
        'ぜ' | 'セ' | 'ゼ' => 'せ',
        'ぞ' | 'ソ' | 'ゾ' => 'そ',
        'だ' | 'タ' | 'ダ' => 'た',
        'ぢ' | 'チ' | 'ヂ' => 'ち',
        'っ' | 'づ' | 'ッ' | 'ツ' | 'ヅ' => 'つ',
        'で' | 'テ' | 'デ' => 'て',
        'ど' | 'ト' | 'ド' | 'ㇳ' => 'と',
        'ナ' => 'な',
        'ニ' => 'に',
        'ヌ' | 'ㇴ' => 'ぬ',
        'ネ' => 'ね',
        'ノ' => 'の',
        'ば' | 'ぱ' | 'ハ' | 'バ' | 'パ' | 'ㇵ' => 'は',
        'び' | 'ぴ' | 'ヒ' | 'ビ' | 'ピ' | 'ㇶ' => 'ひ',
        'ぶ' | 'ぷ' | 'フ' | 'ブ' | 'プ' | 'ㇷ' => 'ふ',
        'べ' | 'ぺ' | 'ヘ' | 'ベ' | 'ペ' | 'ㇸ' => 'へ',
        'ぼ' | 'ぽ' | 'ホ' | 'ボ' | 'ポ' | 'ㇹ' => 'ほ',
        'マ' => 'ま',
        'ミ' => 'み',
        'ム' | 'ㇺ' => 'む',
        'メ' => 'め',
        'モ' => 'も',
        'ゃ' | 'ャ' | 'ヤ' => 'や',
        'ゅ' | 'ュ' | 'ユ' => 'ゆ',
        'ょ' | 'ョ' | 'ヨ' => 'よ',
        'ラ' | 'ㇻ' => 'ら',
        'リ' | 'ㇼ' => 'り',
        'ル' | 'ㇽ' => 'る',
        'レ' | 'ㇾ' => 'れ',
        'ロ' | 'ㇿ' => 'ろ',
        'ゎ' | 'ヮ' | 'ワ' | 'ヷ' => 'わ',
        'ン' => 'ん',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn katakana_folds_to_hiragana() {
        let folded: String = "ゴシック".chars().map(fold_kana).collect();
        assert_eq!(folded, "こしつく");
        let folded: String = "ミンチョウ".chars().map(fold_kana).collect();
        assert_eq!(folded, "みんちよう");
    }

    #[test]
    fn voicing_is_dropped() {
        assert_eq!(fold_kana('ぱ'), 'は');
        assert_eq!(fold_kana('ば'), 'は');
        assert_eq!(fold_kana('ヴ'), 'う');
    }

    #[test]
    fn small_and_obsolete_kana_fold_to_base() {
        assert_eq!(fold_kana('っ'), 'つ');
        assert_eq!(fold_kana('ヶ'), 'け');
        assert_eq!(fold_kana('ヰ'), 'い');
        assert_eq!(fold_kana('ㇿ'), 'ろ');
        assert_eq!(fold_kana('を'), 'お');
    }

    #[test]
    fn plain_hiragana_and_other_scripts_pass_through() {
        for c in ['あ', 'ん', 'な', 'A', 'z', '明', '1', ' '] {
            assert_eq!(fold_kana(c), c, "{c:?} should be untouched");
        }
    }
}
