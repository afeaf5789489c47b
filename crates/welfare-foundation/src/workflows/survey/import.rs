use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::workflows::assessment::{
    FamilyMember, HousingCondition, OfficerReport, SurveyInput, VerificationStatus,
};

const ELDERLY_PLACEHOLDER_AGE: f64 = 65.0;
const CHILD_PLACEHOLDER_AGE: f64 = 10.0;

#[derive(Debug)]
pub enum SurveyImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for SurveyImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyImportError::Io(err) => write!(f, "failed to read survey batch: {}", err),
            SurveyImportError::Csv(err) => write!(f, "invalid survey CSV data: {}", err),
        }
    }
}

impl std::error::Error for SurveyImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SurveyImportError::Io(err) => Some(err),
            SurveyImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SurveyImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SurveyImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One flattened survey row keyed by the caller's survey identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedSurvey {
    pub survey_id: String,
    pub input: SurveyInput,
}

/// Reads batch survey sheets for offline scoring.
///
/// Household composition arrives as counts, so each counted member is synthesized with a
/// placeholder age that puts it in the right scoring bucket.
pub struct SurveyCsvImporter;

impl SurveyCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ImportedSurvey>, SurveyImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ImportedSurvey>, SurveyImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut surveys = Vec::new();

        for record in csv_reader.deserialize::<SurveyRow>() {
            let row = record?;
            surveys.push(row.into_imported());
        }

        Ok(surveys)
    }
}

#[derive(Debug, Deserialize)]
struct SurveyRow {
    survey_id: String,
    #[serde(default, deserialize_with = "lenient_number")]
    earnings: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    expenses: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    family_size: Option<f64>,
    #[serde(default)]
    housing: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    officer_score: Option<f64>,
    #[serde(default)]
    widow_headed: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    disabled_members: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    elderly_dependents: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    children: Option<f64>,
}

impl SurveyRow {
    fn into_imported(self) -> ImportedSurvey {
        let mut family_members = Vec::new();
        for _ in 0..member_count(self.disabled_members) {
            family_members.push(FamilyMember {
                age: None,
                relationship: Some("member".to_string()),
                is_dependent: true,
                has_disability: true,
            });
        }
        for _ in 0..member_count(self.elderly_dependents) {
            family_members.push(FamilyMember::new(ELDERLY_PLACEHOLDER_AGE, "elder").dependent());
        }
        for _ in 0..member_count(self.children) {
            family_members.push(FamilyMember::new(CHILD_PLACEHOLDER_AGE, "child").dependent());
        }

        let officer_report = self.officer_score.map(|score| OfficerReport {
            officer_score: Some(score),
            verification_status: VerificationStatus::Pending,
            remarks: None,
        });

        ImportedSurvey {
            survey_id: self.survey_id,
            input: SurveyInput {
                total_monthly_earnings: self.earnings,
                total_monthly_expenses: self.expenses,
                family_size: self.family_size,
                family_members,
                housing_condition: self.housing.as_deref().and_then(HousingCondition::parse),
                officer_report,
                is_widow_headed: self.widow_headed.as_deref().map(truthy).unwrap_or(false),
            },
        }
    }
}

// Counts are capped so a malformed sheet cannot allocate unbounded members.
fn member_count(value: Option<f64>) -> usize {
    match value {
        Some(count) if count.is_finite() && count > 0.0 => count.min(50.0) as usize,
        _ => 0,
    }
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.and_then(|value| value.trim().replace(',', "").parse::<f64>().ok()))
}
