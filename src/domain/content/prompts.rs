//! Prompt builder.
//!
//! Turns each operation request into a single instruction string plus the
//! capabilities and response format the call needs. Pure: no I/O, and the
//! same request always renders the same prompt.

use super::book::Book;
use super::capability::{Capability, NAVIGATION_TOOL};
use super::chat::{ChatContext, IntegrationKind};
use super::health::HealthMetrics;
use super::operation::{OperationKind, OperationRequest, ResponseFormat};
use super::regenerative::LayerName;
use super::report::ReportParams;
use super::tag::Tag;

/// Characters of content shown to the tagger.
pub const TAG_CONTENT_PREVIEW_CHARS: usize = 150;

/// Sections requested when the caller selected none.
pub const DEFAULT_REPORT_SECTIONS: &str = "標準全套";

/// A rendered prompt, ready for the model invoker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: OperationKind,
    pub text: String,
    pub capabilities: Vec<Capability>,
    pub response_format: ResponseFormat,
}

impl Prompt {
    fn new(kind: OperationKind, lines: &[String]) -> Self {
        Self {
            kind,
            text: lines.join("\n"),
            capabilities: Vec::new(),
            response_format: kind.response_format(),
        }
    }

    fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.push(capability);
        self
    }
}

/// Renders the prompt for any operation.
pub fn build(request: &OperationRequest) -> Prompt {
    match request {
        OperationRequest::Diagnose(metrics) => diagnose(metrics),
        OperationRequest::BookGuide(book) => book_guide(book),
        OperationRequest::DailyMissions { level } => daily_missions(*level),
        OperationRequest::TagSuggestion { content, existing } => tag_suggestion(content, existing),
        OperationRequest::Chat { message, context } => chat(message, context),
        OperationRequest::ReportDraft(params) => report_draft(params),
        OperationRequest::ReportRefine {
            report,
            instruction,
        } => report_refine(report, instruction),
        OperationRequest::IntelligenceAnalysis { topic } => intelligence_analysis(topic),
        OperationRequest::RegenerativeAnalysis { context } => regenerative_analysis(context),
    }
}

pub fn diagnose(metrics: &HealthMetrics) -> Prompt {
    Prompt::new(
        OperationKind::Diagnose,
        &[format!(
            "顧問角色：針對 E:{}, S:{}, G:{} 給出 100 字內的繁體中文策略診斷與再生建議。",
            metrics.e.value(),
            metrics.s.value(),
            metrics.g.value()
        )],
    )
}

pub fn book_guide(book: &Book) -> Prompt {
    Prompt::new(
        OperationKind::BookGuide,
        &[
            format!("為書名《{}》（作者：{}）生成繁體中文導讀。", book.title, book.author),
            format!("書籍簡介: {}", book.description),
            "結構: 1.核心理念 2.討論題綱 3.行動洞察。".to_string(),
            "Markdown 格式，200字內。".to_string(),
        ],
    )
}

pub fn daily_missions(level: u32) -> Prompt {
    Prompt::new(
        OperationKind::DailyMissions,
        &[
            format!("為 Level {} 用戶生成 3 個 ESG 任務。", level),
            r#"格式: JSON 陣列 [{"title": "...", "desc": "...", "reward": 數字}]。"#.to_string(),
            "reward 介於 50-150。".to_string(),
            "主題: 減碳, 社會, 治理。繁體中文。".to_string(),
        ],
    )
}

pub fn tag_suggestion(content: &str, existing: &[Tag]) -> Prompt {
    let existing_names: Vec<&str> = existing.iter().map(|t| t.name.as_str()).collect();
    let preview: String = content.chars().take(TAG_CONTENT_PREVIEW_CHARS).collect();

    Prompt::new(
        OperationKind::TagSuggestion,
        &[
            "為內容生成 3 個標籤。".to_string(),
            format!("優先使用現有標籤: [{}]。", existing_names.join(", ")),
            "若需新標籤，請創造並指定 Tailwind 顏色 (bg-*-100 text-*-700)。".to_string(),
            r#"格式: JSON 陣列 [{"name": "...", "color": "..."}]。"#.to_string(),
            format!("內容: \"{}...\"", preview),
        ],
    )
}

pub fn chat(message: &str, context: &ChatContext) -> Prompt {
    let memory: Vec<&str> = context.memory.iter().map(|m| m.content.as_str()).collect();
    let integrations: Vec<String> = [IntegrationKind::Flowlu, IntegrationKind::Bluecc]
        .iter()
        .map(|kind| {
            let status = if context.integrations.get(*kind).connected {
                "已連線"
            } else {
                "未連線"
            };
            format!("{} {}", kind, status)
        })
        .collect();

    Prompt::new(
        OperationKind::Chat,
        &[
            "角色: JunAi，ESG Sunshine 萬能代理。".to_string(),
            format!(
                "情境: {}, 角色: {}。",
                context.active_section, context.user_role
            ),
            format!("記憶: {}。", memory.join("; ")),
            format!("整合: {}。", integrations.join(", ")),
            "工具: googleSearch (查新知), navigate_to_section (導航)。".to_string(),
            "語言: 繁體中文 (台灣)。".to_string(),
            format!("用戶: {}", message),
        ],
    )
    .with_capability(Capability::WebSearch)
    .with_capability(Capability::Function(NAVIGATION_TOOL.clone()))
}

pub fn report_draft(params: &ReportParams) -> Prompt {
    let sections = if params.selected_sections.is_empty() {
        DEFAULT_REPORT_SECTIONS.to_string()
    } else {
        params.selected_sections.join(", ")
    };
    let tags: Vec<&str> = params.tags.iter().map(|t| t.name.as_str()).collect();

    Prompt::new(
        OperationKind::ReportDraft,
        &[
            "撰寫 ESG 報告草稿。".to_string(),
            format!(
                "公司: {}, 產業: {}, 框架: {}。",
                params.company_name, params.industry, params.framework
            ),
            format!("數據: {}。", params.raw_data),
            format!("章節: {}。", sections),
            format!("標籤: {}。", tags.join(", ")),
            "要求: 繁體中文 Markdown，專業語氣。".to_string(),
        ],
    )
}

pub fn report_refine(report: &str, instruction: &str) -> Prompt {
    Prompt::new(
        OperationKind::ReportRefine,
        &[
            "優化此 ESG 報告片段，輸出完整的新版本。".to_string(),
            format!("指令: {}。", instruction),
            format!("原文: {}", report),
            "要求: 保持 Markdown，繁體中文。".to_string(),
        ],
    )
}

pub fn intelligence_analysis(topic: &str) -> Prompt {
    Prompt::new(
        OperationKind::IntelligenceAnalysis,
        &[
            format!("分析主題 \"{}\" 的 ESG 趨勢。使用 googleSearch。", topic),
            "輸出 JSON: { sentiment(0-100), stakeholders:{government, ngo, investors, supplyChain, consumers} (各 0-100), insights: [3 strings] }。".to_string(),
        ],
    )
    .with_capability(Capability::WebSearch)
}

pub fn regenerative_analysis(context: &str) -> Prompt {
    let layers: Vec<&str> = LayerName::ALL.iter().map(LayerName::as_str).collect();
    Prompt::new(
        OperationKind::RegenerativeAnalysis,
        &[
            format!("分析 \"{}\" 的再生 ESG 模型。", context),
            r#"輸出 JSON 陣列: [{"layer": "...", "score": 0-100, "analysis": "..."}]。"#.to_string(),
            format!("layer 只能是: {}。", layers.join(", ")),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::{
        MemoryFact, MemoryKind, ReportFramework, SectionId, NEUTRAL_TAG_COLOR,
    };
    use crate::domain::foundation::TagId;

    #[test]
    fn diagnose_embeds_all_three_scores() {
        let prompt = diagnose(&HealthMetrics::new(80, 40, 60).unwrap());
        assert!(prompt.text.contains("E:80, S:40, G:60"));
        assert!(prompt.capabilities.is_empty());
        assert_eq!(prompt.response_format, ResponseFormat::Text);
    }

    #[test]
    fn builder_is_deterministic() {
        let request = OperationRequest::DailyMissions { level: 5 };
        assert_eq!(build(&request), build(&request));
    }

    #[test]
    fn tag_prompt_lists_existing_names_and_truncates_content() {
        let existing = vec![
            Tag::new(TagId::new("t1"), "策略", NEUTRAL_TAG_COLOR),
            Tag::new(TagId::new("t2"), "Scope3", NEUTRAL_TAG_COLOR),
        ];
        let content = "碳".repeat(400);
        let prompt = tag_suggestion(&content, &existing);

        assert!(prompt.text.contains("[策略, Scope3]"));
        let expected = format!("內容: \"{}...\"", "碳".repeat(TAG_CONTENT_PREVIEW_CHARS));
        assert!(prompt.text.contains(&expected));
        assert!(!prompt.text.contains(&"碳".repeat(TAG_CONTENT_PREVIEW_CHARS + 1)));
        assert_eq!(prompt.response_format, ResponseFormat::Json);
    }

    #[test]
    fn chat_declares_search_and_navigation() {
        let mut context = ChatContext::new(SectionId::Report, "策略長").with_memory(vec![
            MemoryFact::new("偏好簡潔回答", MemoryKind::Preference),
            MemoryFact::new("公司在半導體業", MemoryKind::Context),
        ]);
        context.integrations.get_mut(IntegrationKind::Flowlu).connected = true;

        let prompt = chat("幫我看淨零進度", &context);

        assert!(prompt.text.contains("情境: report, 角色: 策略長"));
        assert!(prompt.text.contains("記憶: 偏好簡潔回答; 公司在半導體業"));
        assert!(prompt.text.contains("flowlu 已連線, bluecc 未連線"));
        assert!(prompt.text.ends_with("用戶: 幫我看淨零進度"));
        assert_eq!(prompt.capabilities.len(), 2);
        assert_eq!(prompt.capabilities[0], Capability::WebSearch);
        assert!(matches!(
            &prompt.capabilities[1],
            Capability::Function(def) if def.name() == "navigate_to_section"
        ));
        assert_eq!(prompt.response_format, ResponseFormat::Text);
    }

    #[test]
    fn report_draft_defaults_sections_when_none_selected() {
        let params = ReportParams::new("陽光科技", "太陽能").with_framework(ReportFramework::Issb);
        let prompt = report_draft(&params);
        assert!(prompt.text.contains("公司: 陽光科技, 產業: 太陽能, 框架: ISSB"));
        assert!(prompt.text.contains("章節: 標準全套"));
    }

    #[test]
    fn intelligence_requests_json_with_search() {
        let prompt = intelligence_analysis("CBAM");
        assert!(prompt.text.contains("\"CBAM\""));
        assert!(prompt.text.contains("supplyChain"));
        assert_eq!(prompt.capabilities, vec![Capability::WebSearch]);
        assert_eq!(prompt.response_format, ResponseFormat::Json);
    }

    #[test]
    fn regenerative_names_the_allowed_layers() {
        let prompt = regenerative_analysis("循環包裝");
        assert!(prompt.text.contains("Philosophy, Strategy, Innovation, Learning, Regeneration"));
        assert_eq!(prompt.response_format, ResponseFormat::Json);
    }
}
