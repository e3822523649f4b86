//! 対話式の評価入力
//!
//! `rate` で省略された評価・コメントを端末で入力する。

use crate::error::{AppError, Result};
use design_feedback_common::rating::{MAX_RATING, MIN_RATING};
use design_feedback_common::NewFeedback;
use dialoguer::Input;

/// コマンドラインで指定済みの値
#[derive(Debug, Default)]
pub struct PartialFeedback {
    pub author: Option<String>,
    pub clarity: Option<i64>,
    pub visual_appeal: Option<i64>,
    pub brand_fit: Option<i64>,
    pub comment: Option<String>,
}

impl PartialFeedback {
    /// すべて揃っているか
    pub fn is_complete(&self) -> bool {
        self.clarity.is_some()
            && self.visual_appeal.is_some()
            && self.brand_fit.is_some()
            && self.comment.is_some()
    }

    /// 指定済みの値を検証（未指定の項目は対象外）
    pub fn check_given(&self) -> Result<()> {
        for value in [self.clarity, self.visual_appeal, self.brand_fit].into_iter().flatten() {
            validate_rating(&value).map_err(AppError::InvalidInput)?;
        }
        if self.comment.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(AppError::InvalidInput("コメントが空です".to_string()));
        }
        Ok(())
    }
}

/// 足りない項目を対話入力で埋める
pub fn complete_feedback(partial: PartialFeedback) -> Result<NewFeedback> {
    partial.check_given()?;

    if !partial.is_complete() {
        println!("📝 フィードバック入力（評価は{}〜{}）", MIN_RATING, MAX_RATING);
    }

    let clarity = match partial.clarity {
        Some(v) => v,
        None => prompt_rating("Clarity")?,
    };
    let visual_appeal = match partial.visual_appeal {
        Some(v) => v,
        None => prompt_rating("Visual Appeal")?,
    };
    let brand_fit = match partial.brand_fit {
        Some(v) => v,
        None => prompt_rating("Brand Fit")?,
    };
    let comment = match partial.comment {
        Some(c) => c,
        None => prompt_comment()?,
    };

    Ok(NewFeedback {
        author_name: partial.author,
        clarity,
        visual_appeal,
        brand_fit,
        comment,
    })
}

/// 評価値の検証
pub fn validate_rating(value: &i64) -> std::result::Result<(), String> {
    if (MIN_RATING as i64..=MAX_RATING as i64).contains(value) {
        Ok(())
    } else {
        Err(format!("{}〜{}で入力してください", MIN_RATING, MAX_RATING))
    }
}

fn prompt_rating(label: &str) -> Result<i64> {
    Input::<i64>::new()
        .with_prompt(format!("{} ({}-{})", label, MIN_RATING, MAX_RATING))
        .default(3)
        .validate_with(|v: &i64| validate_rating(v))
        .interact_text()
        .map_err(|e| AppError::Prompt(e.to_string()))
}

fn prompt_comment() -> Result<String> {
    Input::<String>::new()
        .with_prompt("Comment")
        .validate_with(|s: &String| {
            if s.trim().is_empty() {
                Err("コメントを入力してください")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(|e| AppError::Prompt(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(&1).is_ok());
        assert!(validate_rating(&5).is_ok());
        assert!(validate_rating(&0).is_err());
        assert!(validate_rating(&6).is_err());
    }

    #[test]
    fn test_complete_without_prompt() {
        let partial = PartialFeedback {
            author: Some("Ken".to_string()),
            clarity: Some(5),
            visual_appeal: Some(4),
            brand_fit: Some(3),
            comment: Some("Bold".to_string()),
        };
        assert!(partial.is_complete());

        let feedback = complete_feedback(partial).unwrap();
        assert_eq!(feedback.author_name.as_deref(), Some("Ken"));
        assert_eq!(feedback.clarity, 5);
        assert_eq!(feedback.comment, "Bold");
    }

    #[test]
    fn test_incomplete() {
        let partial = PartialFeedback {
            clarity: Some(5),
            ..Default::default()
        };
        assert!(!partial.is_complete());
        assert!(partial.check_given().is_ok());
    }

    #[test]
    fn test_given_values_checked_before_prompt() {
        let out_of_range = PartialFeedback {
            clarity: Some(9),
            ..Default::default()
        };
        assert!(matches!(
            complete_feedback(out_of_range),
            Err(AppError::InvalidInput(_))
        ));

        let blank_comment = PartialFeedback {
            clarity: Some(4),
            visual_appeal: Some(4),
            brand_fit: Some(4),
            comment: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            complete_feedback(blank_comment),
            Err(AppError::InvalidInput(_))
        ));
    }
}
