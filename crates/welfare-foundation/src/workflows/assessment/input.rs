use serde::{Deserialize, Serialize};

/// Flattened household survey consumed by the assessment engine.
///
/// Every field is optional on the wire so partially filled surveys can still be scored; the
/// engine coerces missing or malformed values during normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurveyInput {
    pub total_monthly_earnings: Option<f64>,
    pub total_monthly_expenses: Option<f64>,
    pub family_size: Option<f64>,
    pub family_members: Vec<FamilyMember>,
    pub housing_condition: Option<HousingCondition>,
    pub officer_report: Option<OfficerReport>,
    pub is_widow_headed: bool,
}

/// Household member as captured by the field officer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FamilyMember {
    pub age: Option<f64>,
    pub relationship: Option<String>,
    pub is_dependent: bool,
    pub has_disability: bool,
}

impl FamilyMember {
    pub fn new(age: f64, relationship: &str) -> Self {
        Self {
            age: Some(age),
            relationship: Some(relationship.to_string()),
            is_dependent: false,
            has_disability: false,
        }
    }

    pub fn dependent(mut self) -> Self {
        self.is_dependent = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.has_disability = true;
        self
    }
}

/// Qualitative housing state recorded during the home visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HousingCondition {
    Good,
    Fair,
    Poor,
    VeryPoor,
}

impl HousingCondition {
    pub const fn label(self) -> &'static str {
        match self {
            HousingCondition::Good => "good",
            HousingCondition::Fair => "fair",
            HousingCondition::Poor => "poor",
            HousingCondition::VeryPoor => "very_poor",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value
            .trim()
            .to_ascii_lowercase()
            .replace(|c: char| c == ' ' || c == '-', "_");
        match normalized.as_str() {
            "good" => Some(Self::Good),
            "fair" => Some(Self::Fair),
            "poor" => Some(Self::Poor),
            "very_poor" => Some(Self::VeryPoor),
            _ => None,
        }
    }
}

/// Officer's independent assessment of the household.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfficerReport {
    pub officer_score: Option<f64>,
    pub verification_status: VerificationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Verified,
    Flagged,
}
