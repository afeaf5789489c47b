use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use welfare_foundation::workflows::survey::{
    RepositoryError, SurveyId, SurveyRecord, SurveyRepository, SurveyStatus,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local survey store; records are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemorySurveyRepository {
    records: Arc<Mutex<HashMap<SurveyId, SurveyRecord>>>,
}

impl InMemorySurveyRepository {
    fn guard(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<SurveyId, SurveyRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("survey store lock poisoned".to_string()))
    }
}

impl SurveyRepository for InMemorySurveyRepository {
    fn insert(&self, record: SurveyRecord) -> Result<SurveyRecord, RepositoryError> {
        let mut guard = self.guard()?;
        if guard.contains_key(&record.survey_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.survey_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SurveyRecord, expected: SurveyStatus) -> Result<(), RepositoryError> {
        let mut guard = self.guard()?;
        let stored = guard
            .get_mut(&record.survey_id)
            .ok_or(RepositoryError::NotFound)?;
        if stored.status != expected {
            return Err(RepositoryError::StaleStatus {
                expected,
                found: stored.status,
            });
        }
        *stored = record;
        Ok(())
    }

    fn fetch(&self, id: &SurveyId) -> Result<Option<SurveyRecord>, RepositoryError> {
        Ok(self.guard()?.get(id).cloned())
    }

    fn by_status(&self, status: SurveyStatus) -> Result<Vec<SurveyRecord>, RepositoryError> {
        Ok(self
            .guard()?
            .values()
            .filter(|record| record.status == status)
            .cloned()
            .collect())
    }
}
