use super::input::FamilyMember;

pub(crate) const ELDERLY_AGE: f64 = 60.0;
pub(crate) const ADULT_AGE: f64 = 18.0;

const HEAD_RELATIONSHIPS: [&str; 3] = ["self", "head", "applicant"];

/// Widow-headed heuristic: some member is recorded as "wife" and nobody as "husband".
///
/// Matching is a case-insensitive substring test on the free-text relationship, so entries such
/// as "Wife (late husband's)" count for both sides. There is no dedicated marital-status field.
pub fn infer_widow_headed(members: &[FamilyMember]) -> bool {
    let mut has_wife = false;
    for member in members {
        let relationship = relationship_of(member);
        if relationship.contains("husband") {
            return false;
        }
        if relationship.contains("wife") {
            has_wife = true;
        }
    }
    has_wife
}

/// Whether the relationship text marks the applicant or household head.
pub(crate) fn is_head_relationship(relationship: &str) -> bool {
    HEAD_RELATIONSHIPS
        .iter()
        .any(|head| relationship.trim() == *head)
}

pub(crate) fn is_orphan_relationship(relationship: &str) -> bool {
    relationship.contains("orphan")
}

fn relationship_of(member: &FamilyMember) -> String {
    member
        .relationship
        .as_deref()
        .unwrap_or_default()
        .to_lowercase()
}
