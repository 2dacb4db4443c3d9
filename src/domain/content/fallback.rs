//! Fallback policy.
//!
//! Every operation has a well-typed substitute result for when no
//! credential is configured or the call/parse failed. Callers render it
//! like any other result.

use super::chat::ChatReply;
use super::intelligence::{IntelligenceResult, StakeholderScores};
use super::mission::Mission;
use super::regenerative::RegenerativeLayer;
use super::score::Score;
use super::tag::Tag;

/// Shown by free-text operations when no API key is configured.
pub const MISSING_API_KEY_NOTICE: &str = "請配置 API Key。";

/// Chat reply when the model could not be reached.
pub const CONNECTION_ERROR_NOTICE: &str = "連線異常。";

pub const DIAGNOSIS_FAILED_NOTICE: &str = "診斷生成失敗，請稍後再試。";

pub const BOOK_GUIDE_FAILED_NOTICE: &str = "導讀生成失敗，請稍後再試。";

pub const REPORT_FAILED_NOTICE: &str = "生成失敗";

/// Single insight of an intelligence result produced without an API key.
pub const MISSING_API_KEY_INSIGHT: &str = "API Key 未配置";

/// Single insight of an intelligence result whose analysis failed.
pub const ANALYSIS_ERROR_INSIGHT: &str = "分析錯誤";

/// Tag offered when suggestions cannot be generated for lack of a key.
pub const DEFAULT_TAG_NAME: &str = "ESG";
pub const DEFAULT_TAG_COLOR: &str = "bg-green-100 text-green-700";

/// Why the fallback is being used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackCause {
    /// No API key is configured.
    MissingCredential,
    /// The call or its interpretation failed.
    Failed,
}

pub fn diagnosis(cause: FallbackCause) -> String {
    match cause {
        FallbackCause::MissingCredential => MISSING_API_KEY_NOTICE,
        FallbackCause::Failed => DIAGNOSIS_FAILED_NOTICE,
    }
    .to_string()
}

pub fn book_guide(cause: FallbackCause) -> String {
    match cause {
        FallbackCause::MissingCredential => MISSING_API_KEY_NOTICE,
        FallbackCause::Failed => BOOK_GUIDE_FAILED_NOTICE,
    }
    .to_string()
}

/// Without a key the academy still gets a starter batch; a failed call
/// yields an empty batch.
pub fn daily_missions(cause: FallbackCause) -> Vec<Mission> {
    match cause {
        FallbackCause::MissingCredential => vec![
            Mission::daily("閱讀氣候新聞", "了解 COP 最新決議", 50),
            Mission::daily("零廢棄午餐", "紀錄垃圾量", 100),
            Mission::daily("讚賞同事", "感謝同事貢獻", 80),
        ],
        FallbackCause::Failed => Vec::new(),
    }
}

pub fn tag_suggestions(cause: FallbackCause) -> Vec<Tag> {
    match cause {
        FallbackCause::MissingCredential => vec![Tag::mint(DEFAULT_TAG_NAME, DEFAULT_TAG_COLOR)],
        FallbackCause::Failed => Vec::new(),
    }
}

pub fn chat(cause: FallbackCause) -> ChatReply {
    match cause {
        FallbackCause::MissingCredential => ChatReply::text(MISSING_API_KEY_NOTICE),
        FallbackCause::Failed => ChatReply::text(CONNECTION_ERROR_NOTICE),
    }
}

pub fn report_draft(cause: FallbackCause) -> String {
    match cause {
        FallbackCause::MissingCredential => MISSING_API_KEY_NOTICE,
        FallbackCause::Failed => REPORT_FAILED_NOTICE,
    }
    .to_string()
}

/// A refinement that cannot run leaves the report as it was.
pub fn report_refine(report: &str, _cause: FallbackCause) -> String {
    report.to_string()
}

/// Zero scores on every axis with a single diagnostic insight.
pub fn intelligence(topic: &str, cause: FallbackCause) -> IntelligenceResult {
    let insight = match cause {
        FallbackCause::MissingCredential => MISSING_API_KEY_INSIGHT,
        FallbackCause::Failed => ANALYSIS_ERROR_INSIGHT,
    };
    IntelligenceResult {
        topic: topic.to_string(),
        sentiment: Some(Score::ZERO),
        stakeholders: StakeholderScores::uniform(Score::ZERO),
        insights: vec![insight.to_string()],
        tags: Vec::new(),
        sources: Vec::new(),
    }
}

pub fn regenerative(_cause: FallbackCause) -> Vec<RegenerativeLayer> {
    Vec::new()
}
