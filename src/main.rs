use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;

use esg_sunshine::adapters::{
    BlueCcMockProvider, EnvCredentialSource, FlowluMockProvider, GeminiProvider,
};
use esg_sunshine::application::ContentService;
use esg_sunshine::config::AppConfig;
use esg_sunshine::domain::content::{
    Book, HealthMetrics, OperationRequest, ReportFramework, ReportParams, SectionId,
};
use esg_sunshine::domain::workspace::{AppState, TagPool};
use esg_sunshine::ports::IntegrationProvider;

#[derive(Parser)]
#[command(
    name = "esg-sunshine",
    version,
    about = "ESG Sunshine content service: run one AI-backed dashboard operation and print the result as JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Short diagnosis of environmental / social / governance scores (0-100)
    Diagnose {
        #[arg(long)]
        environmental: i64,
        #[arg(long)]
        social: i64,
        #[arg(long)]
        governance: i64,
    },
    /// Reading guide for a salon book (by catalog id, or a custom title)
    BookGuide {
        /// Catalog id ("1" or "2")
        #[arg(long, conflicts_with = "title")]
        id: Option<String>,
        #[arg(long, requires = "author")]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Generate a batch of academy missions
    Missions {
        #[arg(long, default_value_t = 1)]
        level: u32,
    },
    /// Suggest tags for a piece of content
    Tags {
        content: String,
        /// Existing tag names (repeatable)
        #[arg(long = "existing")]
        existing: Vec<String>,
    },
    /// Ask the assistant a question
    Chat {
        message: String,
        /// Section the user is currently viewing
        #[arg(long, default_value = "dashboard")]
        section: SectionId,
        #[arg(long)]
        role: Option<String>,
    },
    /// Draft a sustainability report
    Report {
        #[arg(long)]
        company: String,
        #[arg(long)]
        industry: String,
        /// GRI, SASB, TCFD or ISSB
        #[arg(long, default_value = "GRI")]
        framework: ReportFramework,
        #[arg(long, default_value = "")]
        raw_data: String,
        /// Section names (repeatable)
        #[arg(long = "section")]
        sections: Vec<String>,
        /// Tag names (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Rewrite a report following an instruction
    Refine {
        /// Path to the Markdown report
        #[arg(long)]
        report: std::path::PathBuf,
        #[arg(long, default_value = "")]
        instruction: String,
    },
    /// Stakeholder analysis of a topic, grounded in web search
    Intelligence { topic: String },
    /// Five-layer regenerative assessment
    Regenerative { context: String },
    /// Show data from the illustrative Flowlu / BlueCC integrations
    Integrations {
        #[arg(long, env = "FLOWLU_API_KEY", default_value = "demo")]
        flowlu_key: String,
        #[arg(long, env = "BLUECC_API_KEY", default_value = "demo")]
        bluecc_key: String,
    },
}

fn exit_error(message: &str, docs_hint: Option<&str>) -> ! {
    let mut err = json!({
        "error": "cli_error",
        "message": message
    });
    if let Some(hint) = docs_hint {
        err["docs_hint"] = json!(hint);
    }
    eprintln!("{}", err);
    std::process::exit(1);
}

fn print_json(value: &impl serde::Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => exit_error(&format!("failed to render output: {}", e), None),
    }
}

fn build_request(command: Commands, state: &mut AppState) -> OperationRequest {
    match command {
        Commands::Diagnose {
            environmental,
            social,
            governance,
        } => match HealthMetrics::new(environmental, social, governance) {
            Ok(metrics) => OperationRequest::Diagnose(metrics),
            Err(e) => exit_error(&e.to_string(), Some("Scores must be between 0 and 100")),
        },
        Commands::BookGuide {
            id,
            title,
            author,
            description,
        } => {
            let book = match (id, title) {
                (Some(id), _) => Book::catalog()
                    .into_iter()
                    .find(|b| b.id == id)
                    .unwrap_or_else(|| exit_error(&format!("unknown book id '{}'", id), None)),
                (None, Some(title)) => Book::new(
                    "custom",
                    title,
                    author.unwrap_or_default(),
                    "",
                    description,
                ),
                (None, None) => exit_error("either --id or --title is required", None),
            };
            OperationRequest::BookGuide(book)
        }
        Commands::Missions { level } => OperationRequest::DailyMissions { level },
        Commands::Tags { content, existing } => {
            let mut pool = TagPool::default();
            let existing = existing
                .iter()
                .map(|name| pool.resolve_or_mint(name))
                .collect();
            OperationRequest::TagSuggestion { content, existing }
        }
        Commands::Chat {
            message,
            section,
            role,
        } => {
            state.active_section = section;
            if let Some(role) = role {
                state.user.role = role;
            }
            OperationRequest::Chat {
                message,
                context: state.chat_context(),
            }
        }
        Commands::Report {
            company,
            industry,
            framework,
            raw_data,
            sections,
            tags,
        } => {
            let mut params = ReportParams::new(company, industry)
                .with_framework(framework)
                .with_raw_data(raw_data);
            for section in sections {
                params = params.with_section(section);
            }
            for name in tags {
                params = params.with_tag(state.tags.resolve_or_mint(&name));
            }
            OperationRequest::ReportDraft(params)
        }
        Commands::Refine {
            report,
            instruction,
        } => match std::fs::read_to_string(&report) {
            Ok(report) => OperationRequest::ReportRefine {
                report,
                instruction,
            },
            Err(e) => exit_error(
                &format!("cannot read {}: {}", report.display(), e),
                None,
            ),
        },
        Commands::Intelligence { topic } => OperationRequest::IntelligenceAnalysis { topic },
        Commands::Regenerative { context } => OperationRequest::RegenerativeAnalysis { context },
        Commands::Integrations { .. } => exit_error("not a content operation", None),
    }
}

async fn show_integrations(flowlu_key: &str, bluecc_key: &str) {
    let projects = FlowluMockProvider.fetch_projects(flowlu_key).await;
    let carbon = BlueCcMockProvider.fetch_carbon_data(bluecc_key).await;

    print_json(&json!({
        "flowlu": match projects {
            Ok(summary) => json!({ "projects": summary }),
            Err(e) => json!({ "error": e.to_string() }),
        },
        "bluecc": match carbon {
            Ok(snapshot) => json!(snapshot),
            Err(e) => json!({ "error": e.to_string() }),
        },
    }));
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = AppConfig::load()
        .unwrap_or_else(|e| exit_error(&e.to_string(), Some("Check ESG_SUNSHINE__* variables")));
    if let Err(e) = config.validate() {
        exit_error(&e.to_string(), Some("Check ESG_SUNSHINE__* variables"));
    }
    if let Err(e) = config.logging.init() {
        exit_error(&e.to_string(), Some("Check ESG_SUNSHINE__LOGGING__FILTER or RUST_LOG"));
    }

    if let Commands::Integrations {
        flowlu_key,
        bluecc_key,
    } = &cli.command
    {
        show_integrations(flowlu_key, bluecc_key).await;
        return;
    }

    let provider = GeminiProvider::new(config.ai.gemini())
        .unwrap_or_else(|e| exit_error(&e.to_string(), None));
    let credentials = EnvCredentialSource::new(&config.ai.api_key_var);
    let service = ContentService::new(Arc::new(provider), Arc::new(credentials));

    let mut state = AppState::default();
    let request = build_request(cli.command, &mut state);
    tracing::debug!(operation = request.kind().as_str(), "Running operation");

    let outcome = service.execute(request).await;
    print_json(&outcome);
}
