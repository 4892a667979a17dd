//! 対話式テイスティング入力モジュール

use crate::error::{CoffeeMatchError, Result};
use coffee_match_common::TastingInput;
use dialoguer::Input;

/// 対話式でテイスティング記録を1件入力
pub fn prompt_tasting() -> Result<TastingInput> {
    let coffee_name = prompt_text("コーヒー名")?;
    let roastery = prompt_text("ロースタリー")?;
    let roaster_note = prompt_text("ロースターのノート")?;
    let user_taste = prompt_text("自分のテイスティングメモ")?;

    let community = loop {
        let raw = prompt_text("コミュニティスコア (0-100, なければEnter)")?;
        match parse_community(&raw) {
            Ok(score) => break score,
            Err(e) => println!("⚠ {}", e),
        }
    };

    Ok(TastingInput {
        user_taste: Some(user_taste),
        roaster_note: Some(roaster_note),
        coffee_name,
        roastery,
        community_score: community,
    })
}

/// コミュニティスコアの入力を解釈（空はなし）
pub fn parse_community(raw: &str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| CoffeeMatchError::InvalidInput(format!("数値ではありません: {}", trimmed)))?;
    if !(0.0..=100.0).contains(&value) {
        return Err(CoffeeMatchError::InvalidInput(format!(
            "0〜100で入力してください: {}",
            trimmed
        )));
    }
    Ok(Some(value))
}

fn prompt_text(prompt: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| CoffeeMatchError::InvalidInput(e.to_string()))?;

    Ok(input.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_community_empty() {
        assert_eq!(parse_community("").unwrap(), None);
        assert_eq!(parse_community("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_community_value() {
        assert_eq!(parse_community(" 72.5 ").unwrap(), Some(72.5));
        assert_eq!(parse_community("0").unwrap(), Some(0.0));
    }

    #[test]
    fn test_parse_community_invalid() {
        assert!(matches!(parse_community("abc"), Err(CoffeeMatchError::InvalidInput(_))));
        assert!(parse_community("101").is_err());
        assert!(parse_community("-1").is_err());
        assert!(parse_community("NaN").is_err());
    }
}
