use std::sync::Arc;

use configs::AppConfig;
use models::{
    Application, ApplicationDraft, Contact, JobPosting, Project, ProjectDraft, Service, TeamMember,
    TeamMemberDraft,
};

use crate::auth::AuthStore;
use crate::errors::ClientError;
use crate::forms;
use crate::http::ApiClient;
use crate::mirror::MirrorCache;
use crate::store::ResourceStore;

pub type ContactStore = ResourceStore<Contact>;
pub type ProjectStore = ResourceStore<Project>;
pub type ServiceStore = ResourceStore<Service>;
pub type JobPostingStore = ResourceStore<JobPosting>;
pub type TeamStore = ResourceStore<TeamMember>;
pub type ApplicationStore = ResourceStore<Application>;

/// All stores for the application, wired to one shared [`ApiClient`] (and
/// therefore one session cookie jar). Constructed once at startup and passed
/// down by handle; each store's state is owned exclusively by that store.
pub struct Stores {
    pub auth: Arc<AuthStore>,
    pub contacts: Arc<ContactStore>,
    pub projects: Arc<ProjectStore>,
    pub services: Arc<ServiceStore>,
    pub careers: Arc<JobPostingStore>,
    pub team: Arc<TeamStore>,
    pub applications: Arc<ApplicationStore>,
}

impl Stores {
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        let api = ApiClient::new(&config.api)?;
        let mirror = config
            .cache
            .enabled
            .then(|| MirrorCache::new(&config.cache.dir));
        Ok(Self {
            auth: AuthStore::new(api.clone()),
            contacts: ResourceStore::new(api.clone(), None),
            projects: ResourceStore::new(api.clone(), mirror.clone()),
            services: ResourceStore::new(api.clone(), mirror.clone()),
            careers: ResourceStore::new(api.clone(), mirror),
            team: ResourceStore::new(api.clone(), None),
            applications: ResourceStore::new(api, None),
        })
    }

    /// Seed the mirrored stores from their cache files, for data before the
    /// first fetch resolves.
    pub async fn seed_from_mirror(&self) {
        self.projects.seed_from_mirror().await;
        self.services.seed_from_mirror().await;
        self.careers.seed_from_mirror().await;
    }
}

impl ProjectStore {
    /// Create a project; the image travels as a multipart file part.
    pub async fn create_project(&self, draft: &ProjectDraft) -> Result<Option<Project>, ClientError> {
        self.create_multipart(forms::project_form(draft)?).await
    }

    pub async fn update_project(
        &self,
        project_id: &str,
        draft: &ProjectDraft,
    ) -> Result<Option<Project>, ClientError> {
        self.update_multipart(project_id, forms::project_form(draft)?)
            .await
    }
}

impl TeamStore {
    /// Register a new team member through the auth controller.
    pub async fn register(&self, draft: &TeamMemberDraft) -> Result<Option<TeamMember>, ClientError> {
        self.create_multipart(forms::team_member_form(draft, true)?)
            .await
    }

    pub async fn update_member(
        &self,
        user_id: &str,
        draft: &TeamMemberDraft,
    ) -> Result<Option<TeamMember>, ClientError> {
        self.update_multipart(user_id, forms::team_member_form(draft, false)?)
            .await
    }
}

impl ApplicationStore {
    /// Submit an application with its résumé. Applications are create-only;
    /// the dashboard can list and delete them but never edits one.
    pub async fn submit(&self, draft: &ApplicationDraft) -> Result<Option<Application>, ClientError> {
        self.create_multipart(forms::application_form(draft)?).await
    }

    /// Applications for a single posting. A read-side query; it does not
    /// replace the main collection.
    pub async fn list_for_career(&self, career_id: &str) -> Result<Vec<Application>, ClientError> {
        self.api()
            .get::<Vec<Application>>(&format!("applications/career/{career_id}"))
            .await
    }
}
