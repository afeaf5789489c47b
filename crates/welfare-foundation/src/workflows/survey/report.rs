use std::fmt::Write;

use serde::Serialize;

use super::domain::{SurveyId, SurveyStatus};
use crate::workflows::assessment::policy::{CATEGORY_1_MIN_TOTAL, CATEGORY_2_MIN_TOTAL};
use crate::workflows::assessment::{AssessmentScores, ScoreComponent};

/// Read-only assessment report rendered for printing and case files.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub survey_id: SurveyId,
    pub applicant_name: String,
    pub status: SurveyStatus,
    pub scores: AssessmentScores,
    pub components: Vec<ScoreComponent>,
}

impl AssessmentReport {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let scores = &self.scores;
        let applicant = if self.applicant_name.trim().is_empty() {
            "(unnamed applicant)"
        } else {
            self.applicant_name.as_str()
        };

        let _ = writeln!(out, "Beneficiary assessment report");
        let _ = writeln!(out, "Survey: {}", self.survey_id);
        let _ = writeln!(out, "Applicant: {applicant}");
        let _ = writeln!(out, "Status: {}", self.status.label());
        let _ = writeln!(
            out,
            "Calculated at: {}",
            scores.calculated_at.format("%Y-%m-%d %H:%M UTC")
        );
        let _ = writeln!(out, "Per-capita income: {:.2}", scores.per_capita_income);

        let _ = writeln!(out, "\nScores");
        for component in &self.components {
            let _ = writeln!(
                out,
                "  {:<14} {:>4.1} / 5  ({})",
                component.factor.label(),
                component.score,
                component.notes
            );
        }
        let _ = writeln!(out, "  {:<14} {:>4.1} / 20", "Total", scores.total_score);

        let _ = writeln!(
            out,
            "\nCategory: {} ({})",
            scores.category.label(),
            scores.category_color.label()
        );
        let _ = writeln!(
            out,
            "Bands: category_1 >= {CATEGORY_1_MIN_TOTAL}, category_2 >= {CATEGORY_2_MIN_TOTAL}, otherwise category_3"
        );
        if self.status == SurveyStatus::Draft {
            let _ = writeln!(out, "Provisional: scores may change before submission.");
        }

        out
    }
}
