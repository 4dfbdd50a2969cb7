//! Shared state of the REST API: configuration, backend and the open form sessions.

use crate::error::{ApiError, ApiResult};
use nlp2fhir_core::{Backend, FormConfig, FormController, FormResult, HttpBackend};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<FormConfig>,
    pub backend: Arc<dyn Backend>,
    pub forms: Arc<FormSessions>,
}

impl AppState {
    pub fn new(config: FormConfig, backend: Arc<dyn Backend>) -> Self {
        Self {
            config: Arc::new(config),
            backend,
            forms: Arc::new(FormSessions::default()),
        }
    }

    /// State submitting to the HTTP backend named in `config`.
    pub fn from_config(config: FormConfig) -> FormResult<Self> {
        let backend = HttpBackend::new(&config)?;
        Ok(Self::new(config, Arc::new(backend)))
    }
}

/// Open form sessions, one [`FormController`] per id.
///
/// The lock is only held inside [`FormSessions::with_form`]; handlers never keep it across an
/// await.
#[derive(Debug, Default)]
pub struct FormSessions {
    forms: Mutex<HashMap<Uuid, FormController>>,
}

impl FormSessions {
    fn lock(&self) -> ApiResult<MutexGuard<'_, HashMap<Uuid, FormController>>> {
        self.forms
            .lock()
            .map_err(|e| ApiError::Internal(format!("form sessions unavailable: {}", e)))
    }

    /// Opens a new session with an empty form.
    pub fn create(&self) -> ApiResult<Uuid> {
        let id = Uuid::new_v4();
        self.lock()?.insert(id, FormController::new());
        tracing::info!("opened form {}", id);
        Ok(id)
    }

    /// Runs `f` against the form `id` while holding the session lock.
    pub fn with_form<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut FormController) -> ApiResult<T>,
    ) -> ApiResult<T> {
        let mut forms = self.lock()?;
        let form = forms.get_mut(&id).ok_or(ApiError::FormNotFound(id))?;
        f(form)
    }

    /// Closes the session `id`.
    pub fn remove(&self, id: Uuid) -> ApiResult<()> {
        self.lock()?
            .remove(&id)
            .map(|_| tracing::info!("closed form {}", id))
            .ok_or(ApiError::FormNotFound(id))
    }
}
