use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::domain::{BeneficiaryCard, SurveyDocument, SurveyId, SurveyStatus};
use super::intake::{IntakeViolation, SurveyIntake};
use super::report::AssessmentReport;
use super::repository::{RepositoryError, SurveyRecord, SurveyRepository};
use crate::workflows::assessment::{AssessmentEngine, AssessmentScores, VerificationStatus};

/// Time source for score timestamps and workflow audit fields.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Sponsorship queue page size when callers do not ask for one.
pub const DEFAULT_QUEUE_LIMIT: usize = 25;

/// Service composing survey intake, the assessment engine, and the repository.
pub struct SurveyWorkflowService<R> {
    repository: Arc<R>,
    engine: AssessmentEngine,
    clock: Arc<dyn Clock>,
    queue_limit: usize,
}

static SURVEY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_survey_id() -> SurveyId {
    let id = SURVEY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SurveyId(format!("srv-{id:06}"))
}

impl<R> SurveyWorkflowService<R>
where
    R: SurveyRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_clock(repository, Arc::new(SystemClock))
    }

    pub fn with_clock(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            engine: AssessmentEngine::new(),
            clock,
            queue_limit: DEFAULT_QUEUE_LIMIT,
        }
    }

    pub fn with_queue_limit(mut self, limit: usize) -> Self {
        self.queue_limit = limit.max(1);
        self
    }

    pub fn queue_limit(&self) -> usize {
        self.queue_limit
    }

    /// Store a new draft with a provisional score.
    pub fn save_draft(
        &self,
        document: SurveyDocument,
    ) -> Result<SurveyRecord, SurveyServiceError> {
        let now = self.clock.now();
        let scores = self.score(&document, now);
        let record = SurveyRecord {
            survey_id: next_survey_id(),
            document,
            status: SurveyStatus::Draft,
            calculated_scores: Some(scores),
            beneficiary_card: None,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(record)?;
        info!(survey_id = %stored.survey_id, "survey draft saved");
        Ok(stored)
    }

    /// Replace the survey document and recalculate scores; rejected once verified.
    pub fn update(
        &self,
        survey_id: &SurveyId,
        document: SurveyDocument,
    ) -> Result<SurveyRecord, SurveyServiceError> {
        let mut record = self.fetch_existing(survey_id)?;
        let current = record.status;
        if !current.scores_editable() {
            return Err(SurveyServiceError::ScoresFrozen(survey_id.clone()));
        }

        let now = self.clock.now();
        record.calculated_scores = Some(self.score(&document, now));
        record.document = document;
        record.updated_at = now;

        self.persist(record.clone(), current)?;
        info!(survey_id = %survey_id, status = current.label(), "survey scores recalculated");
        Ok(record)
    }

    /// Submit a draft for verification, recalculating its scores.
    pub fn submit(&self, survey_id: &SurveyId) -> Result<SurveyRecord, SurveyServiceError> {
        self.transition(survey_id, SurveyStatus::Submitted, |record, now| {
            SurveyIntake::check_submission(&record.document)?;
            record.calculated_scores = Some(self.score(&record.document, now));
            Ok(())
        })
    }

    /// Mark the officer report verified; scores are frozen from here on.
    pub fn verify(&self, survey_id: &SurveyId) -> Result<SurveyRecord, SurveyServiceError> {
        self.transition(survey_id, SurveyStatus::Verified, |record, _| {
            if let Some(report) = record.document.officer_report.as_mut() {
                report.verification_status = VerificationStatus::Verified;
            }
            Ok(())
        })
    }

    /// Approve a verified survey and issue its beneficiary card.
    pub fn approve(&self, survey_id: &SurveyId) -> Result<BeneficiaryCard, SurveyServiceError> {
        let record = self.transition(survey_id, SurveyStatus::Approved, |record, now| {
            let scores = record
                .calculated_scores
                .as_ref()
                .ok_or_else(|| SurveyServiceError::MissingScores(record.survey_id.clone()))?;
            record.beneficiary_card = Some(BeneficiaryCard::issue(
                record.survey_id.clone(),
                record.document.applicant_name.clone(),
                scores,
                now,
            ));
            Ok(())
        })?;

        record
            .beneficiary_card
            .ok_or_else(|| SurveyServiceError::MissingScores(survey_id.clone()))
    }

    pub fn reject(&self, survey_id: &SurveyId) -> Result<SurveyRecord, SurveyServiceError> {
        self.transition(survey_id, SurveyStatus::Rejected, |_, _| Ok(()))
    }

    /// Fetch a survey and current status for API responses.
    pub fn get(&self, survey_id: &SurveyId) -> Result<SurveyRecord, SurveyServiceError> {
        self.fetch_existing(survey_id)
    }

    /// Printable report built from the stored scores.
    pub fn report(&self, survey_id: &SurveyId) -> Result<AssessmentReport, SurveyServiceError> {
        let record = self.fetch_existing(survey_id)?;
        let scores = record
            .calculated_scores
            .clone()
            .ok_or_else(|| SurveyServiceError::MissingScores(survey_id.clone()))?;
        let input = SurveyIntake::assemble(&record.document);
        let components = self.engine.explain(&input, scores.calculated_at).components;

        Ok(AssessmentReport {
            survey_id: record.survey_id,
            applicant_name: record.document.applicant_name,
            status: record.status,
            scores,
            components,
        })
    }

    /// Approved beneficiaries in sponsorship priority order.
    pub fn sponsorship_queue(
        &self,
        limit: usize,
    ) -> Result<Vec<BeneficiaryCard>, SurveyServiceError> {
        let mut cards: Vec<BeneficiaryCard> = self
            .repository
            .by_status(SurveyStatus::Approved)?
            .into_iter()
            .filter_map(|record| record.beneficiary_card)
            .collect();

        cards.sort_by(|left, right| {
            left.category
                .cmp(&right.category)
                .then_with(|| right.total_score.total_cmp(&left.total_score))
                .then_with(|| left.approved_at.cmp(&right.approved_at))
                .then_with(|| left.survey_id.cmp(&right.survey_id))
        });
        debug!(approved = cards.len(), limit, "sponsorship queue built");
        cards.truncate(limit);
        Ok(cards)
    }

    fn score(&self, document: &SurveyDocument, calculated_at: DateTime<Utc>) -> AssessmentScores {
        let input = SurveyIntake::assemble(document);
        self.engine.assess(&input, calculated_at)
    }

    fn transition<F>(
        &self,
        survey_id: &SurveyId,
        next: SurveyStatus,
        apply: F,
    ) -> Result<SurveyRecord, SurveyServiceError>
    where
        F: FnOnce(&mut SurveyRecord, DateTime<Utc>) -> Result<(), SurveyServiceError>,
    {
        let mut record = self.fetch_existing(survey_id)?;
        let current = record.status;
        if !current.can_transition_to(next) {
            return Err(SurveyServiceError::InvalidTransition {
                survey_id: survey_id.clone(),
                from: current,
                to: next,
            });
        }

        let now = self.clock.now();
        apply(&mut record, now)?;
        record.status = next;
        record.updated_at = now;

        self.persist(record.clone(), current)?;
        info!(
            survey_id = %survey_id,
            from = current.label(),
            to = next.label(),
            "survey status changed"
        );
        Ok(record)
    }

    fn persist(
        &self,
        record: SurveyRecord,
        expected: SurveyStatus,
    ) -> Result<(), SurveyServiceError> {
        let survey_id = record.survey_id.clone();
        self.repository.update(record, expected).map_err(|error| {
            if let RepositoryError::StaleStatus { found, .. } = &error {
                warn!(
                    survey_id = %survey_id,
                    expected = expected.label(),
                    found = found.label(),
                    "survey changed concurrently"
                );
            }
            SurveyServiceError::from(error)
        })
    }

    fn fetch_existing(&self, survey_id: &SurveyId) -> Result<SurveyRecord, SurveyServiceError> {
        let record = self
            .repository
            .fetch(survey_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the survey workflow service.
#[derive(Debug, thiserror::Error)]
pub enum SurveyServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("survey {survey_id} cannot move from {} to {}", .from.label(), .to.label())]
    InvalidTransition {
        survey_id: SurveyId,
        from: SurveyStatus,
        to: SurveyStatus,
    },
    #[error("scores for survey {0} are frozen once verified")]
    ScoresFrozen(SurveyId),
    #[error("survey {0} has no calculated scores")]
    MissingScores(SurveyId),
}
