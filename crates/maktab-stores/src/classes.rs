//! Class catalog view store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use maktab_client::ApiClient;
use maktab_core::errors::ApiResult;
use maktab_models::classes::{ClassWithDetails, CreateClassRequest, UpdateClassRequest};
use maktab_models::ids::ClassId;

/// Tracing target for class store operations.
pub const TRACING_TARGET: &str = "maktab_stores::classes";

/// A point-in-time copy of the class view state.
#[derive(Debug, Clone, Default)]
pub struct ClassesSnapshot {
    pub classes: Vec<ClassWithDetails>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct ClassesState {
    classes: Vec<ClassWithDetails>,
    loading: bool,
    error: Option<String>,
}

/// View store over the class catalog.
///
/// The held collection is replaced wholesale on every fetch. Mutations do
/// not auto-refresh it; callers re-fetch when they need the new state.
pub struct ClassStore {
    api: Arc<ApiClient>,
    state: Mutex<ClassesState>,
    fetch_seq: AtomicU64,
}

impl ClassStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            state: Mutex::new(ClassesState::default()),
            fetch_seq: AtomicU64::new(0),
        }
    }

    fn state(&self) -> MutexGuard<'_, ClassesState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches the catalog, optionally filtered by a child's age.
    ///
    /// Sequenced: if another fetch was issued while this one was in flight,
    /// this response is discarded and the newer fetch owns the state.
    pub async fn fetch_classes(&self, age: Option<u8>) -> ApiResult<()> {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state();
            state.loading = true;
            state.error = None;
        }

        let result = self.api.list_classes(age).await;

        let mut state = self.state();
        if self.fetch_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(target: TRACING_TARGET, seq, "discarding stale fetch response");
            return result.map(|_| ());
        }
        state.loading = false;
        match result {
            Ok(classes) => {
                state.classes = classes;
                Ok(())
            }
            Err(err) => {
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Point lookup; failures land in the error slot instead of propagating.
    pub async fn get_class(&self, id: &ClassId) -> Option<ClassWithDetails> {
        match self.api.get_class(id).await {
            Ok(class) => Some(class),
            Err(err) => {
                self.state().error = Some(err.to_string());
                None
            }
        }
    }

    pub async fn create_class(&self, request: &CreateClassRequest) -> ApiResult<ClassWithDetails> {
        self.mutate(self.api.create_class(request)).await
    }

    pub async fn update_class(
        &self,
        id: &ClassId,
        request: &UpdateClassRequest,
    ) -> ApiResult<ClassWithDetails> {
        self.mutate(self.api.update_class(id, request)).await
    }

    pub async fn delete_class(&self, id: &ClassId) -> ApiResult<()> {
        self.mutate(self.api.delete_class(id)).await
    }

    /// Shared mutation wrapper: loading around the call, error recorded and
    /// rethrown so the caller can react locally as well.
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

    pub fn snapshot(&self) -> ClassesSnapshot {
        let state = self.state();
        ClassesSnapshot {
            classes: state.classes.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }
}
