//! Main client state container
//!
//! Owns storage, the API client, the user store and the router. Every
//! operation of the command line front end goes through here.

use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;

use enhancer_api::{
    ApiClient, ApiResponse, LoginResponse, PdfDownload, RegisterResponse, Report, ReportDetail,
    ReportUpload, SummaryResponse, User,
};
use enhancer_router::{Navigation, NavigationTarget, ResolvedRoute, Router};
use enhancer_session::UserStore;
use enhancer_storage::Database;

use crate::config::Config;
use crate::Result;

pub struct Client {
    config: Config,
    db: Database,
    api: ApiClient,
    user_store: UserStore,
    router: Arc<RwLock<Router>>,
}

impl Client {
    /// Open local storage at the configured path and restore the session.
    pub fn new(config: Config) -> Result<Self> {
        let db = Database::open(&config.database_path)?;
        Self::with_database(config, db)
    }

    /// Build a client over an already opened database.
    pub fn with_database(config: Config, db: Database) -> Result<Self> {
        let api = ApiClient::with_timeout(&config.api_base_url, config.request_timeout())?;
        let user_store = UserStore::new(db.clone(), api.clone())?;

        tracing::info!(
            api_base_url = %config.api_base_url,
            logged_in = user_store.is_logged_in(),
            "Client initialized"
        );

        Ok(Self {
            config,
            db,
            api,
            user_store,
            router: Arc::new(RwLock::new(Router::with_default_routes())),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn user_store(&self) -> &UserStore {
        &self.user_store
    }

    // === Session operations ===

    pub fn is_logged_in(&self) -> bool {
        self.user_store.is_logged_in()
    }

    pub fn user_info(&self) -> User {
        self.user_store.user_info()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<ApiResponse<LoginResponse>> {
        Ok(self.user_store.login(email, password).await?)
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<ApiResponse<RegisterResponse>> {
        Ok(self.user_store.register(name, email, password).await?)
    }

    pub fn logout(&self) -> Result<()> {
        self.user_store.logout()?;
        self.router.write().reset();
        Ok(())
    }

    // === Navigation ===

    /// Navigate through the guard using the current login state.
    pub fn navigate(&self, target: impl Into<NavigationTarget>) -> Result<Navigation> {
        Ok(self.router.write().push(target, &self.user_store)?)
    }

    pub fn back(&self) -> Result<Option<Navigation>> {
        Ok(self.router.write().back(&self.user_store)?)
    }

    pub fn current_route(&self) -> Option<ResolvedRoute> {
        self.router.read().current().cloned()
    }

    // === Report operations ===

    pub async fn reports(&self) -> Result<Vec<Report>> {
        let response = self.api.reports().get_reports().await?;
        Ok(response.data.unwrap_or_default())
    }

    pub async fn report(&self, report_id: &str) -> Result<ReportDetail> {
        Ok(self
            .api
            .reports()
            .get_report_by_id(report_id)
            .await?
            .into_data()?)
    }

    pub async fn generate_summary(&self, report_id: &str) -> Result<SummaryResponse> {
        Ok(self
            .api
            .reports()
            .generate_summary(report_id)
            .await?
            .into_data()?)
    }

    pub fn report_pdf_url(&self, report_id: &str) -> Result<String> {
        Ok(self.api.reports().report_pdf_url(report_id)?)
    }

    pub async fn upload_report(&self, path: &Path) -> Result<Report> {
        let upload = ReportUpload::from_path(path).await?;
        Ok(self.api.reports().upload_report(upload).await?.into_data()?)
    }

    /// Download into `dir`, or the configured download directory.
    pub async fn download_report_pdf(
        &self,
        report_id: &str,
        dir: Option<&Path>,
    ) -> Result<PdfDownload> {
        let dir = dir.unwrap_or(&self.config.download_dir);
        Ok(self
            .api
            .reports()
            .download_report_pdf(report_id, dir)
            .await?)
    }
}

impl Clone for Client {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            db: self.db.clone(),
            api: self.api.clone(),
            user_store: self.user_store.clone(),
            router: Arc::clone(&self.router),
        }
    }
}
