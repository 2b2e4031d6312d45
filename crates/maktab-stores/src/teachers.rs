//! Teacher roster view store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use maktab_client::ApiClient;
use maktab_core::errors::ApiResult;
use maktab_models::ids::TeacherId;
use maktab_models::teachers::{CreateTeacherRequest, Teacher, UpdateTeacherRequest};

/// Tracing target for teacher store operations.
pub const TRACING_TARGET: &str = "maktab_stores::teachers";

/// A point-in-time copy of the teacher view state.
#[derive(Debug, Clone, Default)]
pub struct TeachersSnapshot {
    pub teachers: Vec<Teacher>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct TeachersState {
    teachers: Vec<Teacher>,
    loading: bool,
    error: Option<String>,
}

/// View store over the teacher roster.
pub struct TeacherStore {
    api: Arc<ApiClient>,
    state: Mutex<TeachersState>,
    fetch_seq: AtomicU64,
}

impl TeacherStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            state: Mutex::new(TeachersState::default()),
            fetch_seq: AtomicU64::new(0),
        }
    }

    fn state(&self) -> MutexGuard<'_, TeachersState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches the roster, replacing the held collection wholesale.
    /// Sequenced like every collection fetch; stale responses are discarded.
    pub async fn fetch_teachers(&self) -> ApiResult<()> {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state();
            state.loading = true;
            state.error = None;
        }

        let result = self.api.list_teachers().await;

        let mut state = self.state();
        if self.fetch_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(target: TRACING_TARGET, seq, "discarding stale fetch response");
            return result.map(|_| ());
        }
        state.loading = false;
        match result {
            Ok(teachers) => {
                state.teachers = teachers;
                Ok(())
            }
            Err(err) => {
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Point lookup; failures land in the error slot instead of propagating.
    pub async fn get_teacher(&self, id: &TeacherId) -> Option<Teacher> {
        match self.api.get_teacher(id).await {
            Ok(teacher) => Some(teacher),
            Err(err) => {
                self.state().error = Some(err.to_string());
                None
            }
        }
    }

    pub async fn create_teacher(&self, request: &CreateTeacherRequest) -> ApiResult<Teacher> {
        self.mutate(self.api.create_teacher(request)).await
    }

    pub async fn update_teacher(
        &self,
        id: &TeacherId,
        request: &UpdateTeacherRequest,
    ) -> ApiResult<Teacher> {
        self.mutate(self.api.update_teacher(id, request)).await
    }

    pub async fn delete_teacher(&self, id: &TeacherId) -> ApiResult<()> {
        self.mutate(self.api.delete_teacher(id)).await
    }

    async fn mutate<T>(&self, op: impl Future<Output = ApiResult<T>>) -> ApiResult<T> {
        {
            let mut state = self.state();
            state.loading = true;
            state.error = None;
        }
        let result = op.await;
        let mut state = self.state();
        state.loading = false;
        if let Err(err) = &result {
            state.error = Some(err.to_string());
        }
        result
    }

    pub fn snapshot(&self) -> TeachersSnapshot {
        let state = self.state();
        TeachersSnapshot {
            teachers: state.teachers.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }
}
