use models::{Application, Contact, JobPosting, Project, Service, TeamMember};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Per-entity wiring for [`ResourceStore`](crate::ResourceStore): endpoint
/// paths, the server-assigned identifier, and an optional mirror-cache key.
///
/// Most resources follow the `/{resource}` and `/{resource}/{id}`
/// convention, so only `COLLECTION` needs to be given; team members route
/// through the auth controller and override the create and item paths.
pub trait Resource: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection endpoint, used for list.
    const COLLECTION: &'static str;
    /// Create endpoint; defaults to the collection path.
    const CREATE_PATH: &'static str = Self::COLLECTION;
    /// Prefix for item endpoints (`{ITEM_PREFIX}/{id}`).
    const ITEM_PREFIX: &'static str = Self::COLLECTION;
    /// Key under which the fetched collection is mirrored to disk, for the
    /// resources that keep a stale-while-revalidate copy.
    const CACHE_KEY: Option<&'static str> = None;

    /// Server-assigned unique identifier.
    fn id(&self) -> &str;
}

impl Resource for Contact {
    const COLLECTION: &'static str = "contacts";

    fn id(&self) -> &str {
        &self.contact_id
    }
}

impl Resource for Project {
    const COLLECTION: &'static str = "projects";
    const CACHE_KEY: Option<&'static str> = Some("projects");

    fn id(&self) -> &str {
        &self.project_id
    }
}

impl Resource for Service {
    const COLLECTION: &'static str = "services";
    const CACHE_KEY: Option<&'static str> = Some("services");

    fn id(&self) -> &str {
        &self.service_id
    }
}

impl Resource for JobPosting {
    const COLLECTION: &'static str = "careers";
    const CACHE_KEY: Option<&'static str> = Some("jobPostings");

    fn id(&self) -> &str {
        &self.career_id
    }
}

impl Resource for TeamMember {
    const COLLECTION: &'static str = "users/users";
    const CREATE_PATH: &'static str = "users/register";

    fn id(&self) -> &str {
        &self.user_id
    }
}

impl Resource for Application {
    const COLLECTION: &'static str = "applications";

    fn id(&self) -> &str {
        &self.application_id
    }
}
