//! Registration view store.
//!
//! Rows arrive from the backend with joined relations that are occasionally
//! missing. They are parsed once, at fetch time, into valid registrations
//! plus a discarded count; everything downstream (listings, statistics, the
//! export) works from valid rows only, and the discarded count stays
//! visible so an operator notices bad data instead of silently losing rows.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use maktab_client::ApiClient;
use maktab_core::errors::ApiResult;
use maktab_core::pagination::PageInfo;
use maktab_models::ids::{ClassId, StudentId};
use maktab_models::registrations::{
    ParsedRegistration, Registration, RegistrationForm, RegistrationQuery, RegistrationReceipt,
    RegistrationStatus, partition_rows,
};

/// Tracing target for registration store operations.
pub const TRACING_TARGET: &str = "maktab_stores::registrations";

/// Page size used when aggregating every page for the dashboard.
const AGGREGATE_PAGE_LIMIT: i64 = 100;

/// A point-in-time copy of the registration view state.
#[derive(Debug, Clone, Default)]
pub struct RegistrationsSnapshot {
    /// Valid rows from the last fetch.
    pub registrations: Vec<Registration>,
    /// Rows dropped by the last fetch for missing relations.
    pub discarded: usize,
    pub pagination: Option<PageInfo>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Derived totals over the held collection. Computed from valid rows only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistrationStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    /// Data-quality signal: rows excluded from every other number here.
    pub discarded: usize,
}

impl RegistrationStats {
    pub fn from_rows(rows: &[Registration], discarded: usize) -> Self {
        let count = |status: RegistrationStatus| {
            rows.iter()
                .filter(|r| r.student.registration_status == status)
                .count()
        };
        Self {
            total: rows.len(),
            pending: count(RegistrationStatus::Pending),
            approved: count(RegistrationStatus::Approved),
            rejected: count(RegistrationStatus::Rejected),
            discarded,
        }
    }
}

#[derive(Default)]
struct RegistrationsState {
    registrations: Vec<Registration>,
    discarded: usize,
    pagination: Option<PageInfo>,
    loading: bool,
    error: Option<String>,
}

/// View store over registrations.
pub struct RegistrationStore {
    api: Arc<ApiClient>,
    state: Mutex<RegistrationsState>,
    fetch_seq: AtomicU64,
}

impl RegistrationStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            state: Mutex::new(RegistrationsState::default()),
            fetch_seq: AtomicU64::new(0),
        }
    }

    fn state(&self) -> MutexGuard<'_, RegistrationsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_fetch(&self) -> u64 {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let mut state = self.state();
        state.loading = true;
        state.error = None;
        seq
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.fetch_seq.load(Ordering::SeqCst) == seq
    }

    /// Fetches one page of registrations, replacing the held collection and
    /// pagination wholesale. Sequenced; stale responses are discarded.
    pub async fn fetch_registrations(&self, query: &RegistrationQuery) -> ApiResult<()> {
        let seq = self.begin_fetch();

        let result = self.api.list_registrations(query).await;

        let mut state = self.state();
        if !self.is_latest(seq) {
            tracing::debug!(target: TRACING_TARGET, seq, "discarding stale fetch response");
            return result.map(|_| ());
        }
        state.loading = false;
        match result {
            Ok(page) => {
                let (valid, discarded) = partition_rows(page.data);
                if discarded > 0 {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        discarded,
                        kept = valid.len(),
                        "dropped registration rows with missing relations"
                    );
                }
                state.registrations = valid;
                state.discarded = discarded;
                state.pagination = Some(page.pagination);
                Ok(())
            }
            Err(err) => {
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Walks every page and replaces the held collection with the full data
    /// set. Used by the dashboard and the export, which need totals rather
    /// than one page.
    pub async fn fetch_all_registrations(&self) -> ApiResult<()> {
        let seq = self.begin_fetch();

        let mut all = Vec::new();
        let mut discarded = 0usize;
        let mut last_info: Option<PageInfo> = None;
        let mut page = 1;
        loop {
            let query = RegistrationQuery::page(page, AGGREGATE_PAGE_LIMIT);
            match self.api.list_registrations(&query).await {
                Ok(result) => {
                    let (valid, dropped) = partition_rows(result.data);
                    all.extend(valid);
                    discarded += dropped;
                    let info = result.pagination;
                    last_info = Some(info);
                    match info.next_page() {
                        Some(next) => page = next,
                        None => break,
                    }
                }
                Err(err) => {
                    let mut state = self.state();
                    if self.is_latest(seq) {
                        state.loading = false;
                        state.error = Some(err.to_string());
                    }
                    return Err(err);
                }
            }
        }

        let mut state = self.state();
        if !self.is_latest(seq) {
            tracing::debug!(target: TRACING_TARGET, seq, "discarding stale aggregate fetch");
            return Ok(());
        }
        if discarded > 0 {
            tracing::warn!(
                target: TRACING_TARGET,
                discarded,
                kept = all.len(),
                "dropped registration rows with missing relations"
            );
        }
        state.loading = false;
        state.registrations = all;
        state.discarded = discarded;
        state.pagination = last_info;
        Ok(())
    }

    /// Submits a public registration. The collection is not refreshed;
    /// the submitting flow re-fetches if it renders the list.
    pub async fn submit_registration(
        &self,
        form: &RegistrationForm,
    ) -> ApiResult<RegistrationReceipt> {
        self.mutate(self.api.create_registration(form)).await
    }

    /// Point lookup; failures (including a malformed row) land in the error
    /// slot instead of propagating.
    pub async fn get_registration(&self, id: &StudentId) -> Option<Registration> {
        match self.api.get_registration(id).await {
            Ok(row) => match row.parse() {
                ParsedRegistration::Valid(registration) => Some(registration),
                ParsedRegistration::Invalid(_) => {
                    self.state().error =
                        Some(format!("registration {id} is missing its student relation"));
                    None
                }
            },
            Err(err) => {
                self.state().error = Some(err.to_string());
                None
            }
        }
    }

    pub async fn update_status(
        &self,
        id: &StudentId,
        status: RegistrationStatus,
    ) -> ApiResult<()> {
        self.mutate(self.api.update_registration_status(id, status))
            .await
    }

    pub async fn update_class(&self, id: &StudentId, class_id: Option<ClassId>) -> ApiResult<()> {
        self.mutate(self.api.update_registration_class(id, class_id))
            .await
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

    /// Derived totals over the held collection.
    pub fn stats(&self) -> RegistrationStats {
        let state = self.state();
        RegistrationStats::from_rows(&state.registrations, state.discarded)
    }

    pub fn snapshot(&self) -> RegistrationsSnapshot {
        let state = self.state();
        RegistrationsSnapshot {
            registrations: state.registrations.clone(),
            discarded: state.discarded,
            pagination: state.pagination.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }
}
