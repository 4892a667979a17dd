//! 自由記述テキストの正規化
//!
//! - 小文字化・ダイアクリティカルマーク除去
//! - 単語内でない記号の除去
//! - トークン化と2〜3語フレーズの生成（"dark chocolate" 等の複合語用）
//!
//! 入力長とトークン数には上限があり、極端に長い入力でも処理量は一定以下に収まる。

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// 処理する最大文字数（超過分は切り捨て）
pub const MAX_INPUT_CHARS: usize = 1000;

/// 処理する最大トークン数
pub const MAX_TOKENS: usize = 128;

/// フレーズの最大語数
pub const MAX_PHRASE_WORDS: usize = 3;

/// テキストを照合用の語・フレーズ列に変換する
///
/// 単語トークンの後に2語フレーズ、3語フレーズの順で並ぶ。
/// `None`・空文字・空白のみの場合は空のVecを返す。
pub fn normalize(text: Option<&str>) -> Vec<String> {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return tokens;
    }

    let mut terms = tokens.clone();
    for n in 2..=MAX_PHRASE_WORDS {
        terms.extend(phrases(&tokens, n));
    }
    terms
}

/// 単語トークンのみを返す
pub fn tokenize(text: Option<&str>) -> Vec<String> {
    lazy_static::lazy_static! {
        // 文字・数字・単語内のアポストロフィ/ハイフン以外は区切り扱い
        static ref SEPARATOR_RE: Regex = Regex::new(r"[^\p{L}\p{N}'\-]+").unwrap();
    }

    let text = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Vec::new(),
    };

    let folded = fold(text);
    SEPARATOR_RE
        .split(&folded)
        .map(|t| t.trim_matches(|c: char| c == '\'' || c == '-'))
        .filter(|t| !t.is_empty())
        .take(MAX_TOKENS)
        .map(str::to_string)
        .collect()
}

/// n語フレーズを生成
pub fn phrases(tokens: &[String], n: usize) -> Vec<String> {
    if n == 0 || tokens.len() < n {
        return Vec::new();
    }
    tokens.windows(n).map(|w| w.join(" ")).collect()
}

/// 長さ制限・ダイアクリティカルマーク除去・小文字化
///
/// NFKDで分解した結合文字を落としてからNFCで再合成するため、
/// ハングル音節は元の形に戻る。
fn fold(text: &str) -> String {
    let capped: String = text.chars().take(MAX_INPUT_CHARS).collect();
    let stripped: String = capped
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect();
    stripped.to_lowercase()
}
