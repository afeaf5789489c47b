use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;
use welfare_foundation::config::AppConfig;
use welfare_foundation::error::AppError;
use welfare_foundation::telemetry;
use welfare_foundation::workflows::assessment::{
    calculate_assessment, AssessmentBreakdown, AssessmentEngine, AssessmentScores, Category,
    SurveyInput,
};
use welfare_foundation::workflows::survey::{
    AssessmentReport, SurveyCsvImporter, SurveyDocument, SurveyId, SurveyIntake, SurveyStatus,
};

/// Keys that only appear on full survey documents.
const DOCUMENT_KEYS: [&str; 4] = ["applicantName", "income", "expenses", "housing"];

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Survey JSON: a full survey document or the flattened scoring input
    pub(crate) path: PathBuf,
    /// Print the assessment report instead of JSON scores
    #[arg(long)]
    pub(crate) report: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV sheet with one survey per row
    pub(crate) path: PathBuf,
}

/// Scored survey together with the applicant name when the payload carried one.
#[derive(Debug)]
pub(crate) struct ScoredSurvey {
    pub(crate) applicant_name: String,
    pub(crate) breakdown: AssessmentBreakdown,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BatchLine {
    pub(crate) survey_id: String,
    #[serde(flatten)]
    pub(crate) scores: AssessmentScores,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_cli(&config.telemetry)?;

    let raw = std::fs::read_to_string(&args.path)?;
    let scored = score_payload(&raw, Utc::now())?;
    info!(
        path = %args.path.display(),
        total = scored.breakdown.scores.total_score,
        category = scored.breakdown.scores.category.label(),
        "survey scored"
    );

    if args.report {
        let report = AssessmentReport {
            survey_id: SurveyId(survey_label(&args.path)),
            applicant_name: scored.applicant_name,
            status: SurveyStatus::Draft,
            scores: scored.breakdown.scores,
            components: scored.breakdown.components,
        };
        print!("{}", report.render_text());
    } else {
        println!("{}", serde_json::to_string_pretty(&scored.breakdown.scores)?);
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_cli(&config.telemetry)?;

    let file = std::fs::File::open(&args.path)?;
    let lines = score_batch(file, Utc::now())?;
    for line in &lines {
        println!("{}", serde_json::to_string(line)?);
    }

    let tally = |category: Category| {
        lines
            .iter()
            .filter(|line| line.scores.category == category)
            .count()
    };
    info!(
        path = %args.path.display(),
        surveys = lines.len(),
        category_1 = tally(Category::Category1),
        category_2 = tally(Category::Category2),
        category_3 = tally(Category::Category3),
        "survey batch scored"
    );
    Ok(())
}

/// Score a JSON payload holding either a survey document or a flattened `SurveyInput`.
pub(crate) fn score_payload(
    raw: &str,
    calculated_at: DateTime<Utc>,
) -> Result<ScoredSurvey, AppError> {
    let value: Value = serde_json::from_str(raw)?;
    let is_document = value
        .as_object()
        .map(|object| DOCUMENT_KEYS.iter().any(|key| object.contains_key(*key)))
        .unwrap_or(false);

    let (applicant_name, input) = if is_document {
        let document: SurveyDocument = serde_json::from_value(value)?;
        let input = SurveyIntake::assemble(&document);
        (document.applicant_name, input)
    } else {
        let input: SurveyInput = serde_json::from_value(value)?;
        (String::new(), input)
    };

    Ok(ScoredSurvey {
        applicant_name,
        breakdown: AssessmentEngine::new().explain(&input, calculated_at),
    })
}

pub(crate) fn score_batch<R: Read>(
    reader: R,
    calculated_at: DateTime<Utc>,
) -> Result<Vec<BatchLine>, AppError> {
    let surveys = SurveyCsvImporter::from_reader(reader)?;
    Ok(surveys
        .into_iter()
        .map(|survey| BatchLine {
            scores: calculate_assessment(&survey.input, calculated_at),
            survey_id: survey.survey_id,
        })
        .collect())
}

fn survey_label(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("survey")
        .to_string()
}
