//! 端末表示
//!
//! 一覧・詳細・単独フィードバックを文字列に整形する。

use chrono::{DateTime, Utc};
use design_feedback_common::display::{
    design_count_label, format_average, format_posted_date, render_stars, time_ago,
};
use design_feedback_common::{Design, DesignFeedback, DesignSummary, Feedback, Rated};
use std::fmt::Write;

/// 画像を表示できないときの表記
pub const IMAGE_UNAVAILABLE: &str = "Image unavailable";

/// 画像URLの表示（絶対URLとして解釈できなければ代替表記）
pub fn image_label(image_url: &str) -> &str {
    match url::Url::parse(image_url.trim()) {
        Ok(_) => image_url.trim(),
        Err(_) => IMAGE_UNAVAILABLE,
    }
}

/// デザイン一覧
pub fn render_design_list(designs: &[Design]) -> String {
    if designs.is_empty() {
        return "No designs posted yet.\nBe the first to share your design! (`design-feedback post`)\n"
            .to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Browse Designs ({})\n", design_count_label(designs.len()));

    for design in designs {
        let summary = DesignSummary::from(design);
        let _ = writeln!(out, "{}  [{}]", summary.title, summary.category);
        let _ = writeln!(out, "  ID: {}", summary.id);
        let _ = writeln!(out, "  by {}", summary.designer);

        if summary.feedback_count > 0 {
            let _ = writeln!(
                out,
                "  {} feedback  {} {}",
                summary.feedback_count,
                render_stars(summary.average),
                format_average(summary.average)
            );
        } else {
            let _ = writeln!(out, "  0 feedback");
        }
        out.push('\n');
    }

    out
}

/// デザイン詳細（フィードバックは並び替え済みのものを渡す）
pub fn render_design_detail(
    design: &Design,
    feedback: &[DesignFeedback],
    now: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", design.title);
    let _ = writeln!(out, "  カテゴリ: {}", design.category);
    let _ = writeln!(out, "  デザイナー: {}", design.designer_display_name());
    let _ = writeln!(out, "  画像: {}", image_label(&design.image_url));
    let _ = writeln!(out, "  Posted on {}", format_posted_date(design.created_at));
    if !design.description.is_empty() {
        let _ = writeln!(out, "\n{}", design.description);
    }

    let _ = writeln!(out);
    if feedback.is_empty() {
        let _ = writeln!(out, "No feedback yet. Be the first to rate this design!");
        return out;
    }

    let average = design.average();
    let _ = writeln!(
        out,
        "Overall {} {} ({} feedback)\n",
        render_stars(average),
        format_average(average),
        feedback.len()
    );

    for item in feedback {
        out.push_str(&render_design_feedback(item, now));
    }

    out
}

/// フィードバック1件
pub fn render_design_feedback(item: &DesignFeedback, now: DateTime<Utc>) -> String {
    let ratings = item.ratings();
    let average = item.average();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "- {} ({})  {} {}",
        item.author_display_name(),
        time_ago(item.created_at, now),
        render_stars(average),
        format_average(average)
    );
    let _ = writeln!(
        out,
        "  Clarity {}/5  Visual Appeal {}/5  Brand Fit {}/5",
        ratings.clarity, ratings.visual_appeal, ratings.brand_fit
    );
    let _ = writeln!(out, "  {}", item.comment);
    out
}

/// 単独フィードバック一覧
pub fn render_feedback_list(items: &[Feedback], now: DateTime<Utc>) -> String {
    if items.is_empty() {
        return "No feedback submitted yet.\n".to_string();
    }

    let mut out = String::new();
    for item in items {
        let average = item.average();
        let _ = writeln!(
            out,
            "{}  {} {}",
            item.design_name,
            render_stars(average),
            format_average(average)
        );
        let _ = writeln!(out, "  ID: {}", item.id);
        let _ = writeln!(out, "  画像: {}", image_label(&item.image_url));
        let _ = writeln!(
            out,
            "  Clarity {}/5  Visual Appeal {}/5  Brand Fit {}/5",
            item.clarity, item.visual_appeal, item.brand_fit
        );
        if !item.comment.is_empty() {
            let _ = writeln!(out, "  {}", item.comment);
        }
        let _ = writeln!(out, "  {}\n", time_ago(item.timestamp, now));
    }

    out
}
