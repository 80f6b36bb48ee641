pub mod modules;
pub mod shared;

use std::sync::Arc;

use modules::auth::AuthService;
use modules::taxonomy::{TaxonomyStores, TaxonomyViews};
use modules::teachers::{TeacherManagementApi, TeacherService};
use shared::api::ApiClient;
use shared::errors::AppResult;
use shared::session::Session;

// Re-exports for convenience
pub use modules::auth::{LoginPayload, RegisterPayload, UserProfile};
pub use shared::errors::AppError;
pub use shared::session::{Locale, SessionStore};
pub use shared::store::{AggregationView, Entity, EntityStore, JoinKind, MutationState};
pub use shared::utils::init_logger;

/// The assembled data layer: session context, transport, and the
/// per-feature services the dashboard pages consume.
pub struct AdminApp {
    pub session: Arc<Session>,
    pub api: Arc<ApiClient>,
    pub auth: AuthService,
    pub taxonomy: TaxonomyStores,
    pub views: TaxonomyViews,
    pub teachers: TeacherService,
}

impl AdminApp {
    pub fn new(session: Session) -> AppResult<Self> {
        let session = Arc::new(session);
        let api = Arc::new(ApiClient::new(session.clone())?);

        let taxonomy = TaxonomyStores::new(api.clone());
        let views = TaxonomyViews::new(&taxonomy);
        let teachers = TeacherService::new(Arc::new(TeacherManagementApi::new(api.clone())));
        let auth = AuthService::new(api.clone(), session.clone());

        Ok(Self {
            session,
            api,
            auth,
            taxonomy,
            views,
            teachers,
        })
    }
}
