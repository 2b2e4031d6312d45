//! Service construction and wiring.

use std::sync::Arc;

use maktab_client::{ApiClient, TokenStore};
use maktab_config::{ApiConfig, Environment, StorageConfig};
use maktab_stores::{ClassStore, RegistrationStore, SessionStore, TeacherStore};

use crate::navigator::Navigator;

/// Every service the console needs, constructed once at startup and passed
/// down explicitly. Stores share one API client; the navigator is wired into
/// the client's authentication-lost hook before anything else runs.
pub struct AppContext {
    pub api: Arc<ApiClient>,
    pub session: SessionStore,
    pub classes: ClassStore,
    pub teachers: TeacherStore,
    pub registrations: RegistrationStore,
    pub navigator: Arc<Navigator>,
}

impl AppContext {
    /// Builds the context from environment configuration.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::with_config(
            ApiConfig::from_env(),
            StorageConfig::from_env(),
            Environment::from_env(),
        )
    }

    /// Builds the context from explicit configuration. Tests use this with a
    /// temporary state directory and an in-process backend.
    pub fn with_config(
        api_config: ApiConfig,
        storage: StorageConfig,
        environment: Environment,
    ) -> anyhow::Result<Self> {
        let tokens = TokenStore::new(&storage, environment);
        let api = Arc::new(ApiClient::new(&api_config, tokens)?);

        let navigator = Arc::new(Navigator::new());
        {
            let navigator = navigator.clone();
            api.on_auth_lost(move || navigator.handle_auth_lost());
        }

        Ok(Self {
            session: SessionStore::new(api.clone()),
            classes: ClassStore::new(api.clone()),
            teachers: TeacherStore::new(api.clone()),
            registrations: RegistrationStore::new(api.clone()),
            api,
            navigator,
        })
    }
}
