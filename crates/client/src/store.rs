use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use reqwest::multipart::Form;
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::ClientError;
use crate::http::ApiClient;
use crate::mirror::MirrorCache;
use crate::resource::Resource;

/// One entity collection and its loading state; mediates all network access
/// for that entity.
///
/// The collection is a cache of the server's: every successful mutation
/// triggers a full re-fetch rather than an in-place patch, trading
/// efficiency for guaranteed convergence at the expected collection sizes
/// (tens to low hundreds of records). Reads hand out cheap `Arc` snapshots;
/// the collection is only ever replaced wholesale.
pub struct ResourceStore<T: Resource> {
    api: ApiClient,
    collection: ArcSwap<Vec<T>>,
    loading: AtomicBool,
    /// Freshness token. Each operation that may replace the collection takes
    /// a new epoch up front and only applies its result if no newer
    /// operation started in the meantime, so a slow response cannot clobber
    /// fresher state.
    epoch: AtomicU64,
    mirror: Option<MirrorCache>,
}

/// Clears the loading flag when dropped, the `finally` of every list call.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn new(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<T: Resource> ResourceStore<T> {
    pub fn new(api: ApiClient, mirror: Option<MirrorCache>) -> Arc<Self> {
        Arc::new(Self {
            api,
            collection: ArcSwap::from_pointee(Vec::new()),
            loading: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
            mirror: match T::CACHE_KEY {
                Some(_) => mirror,
                None => None,
            },
        })
    }

    /// Current collection snapshot. Empty until the first fetch (or mirror
    /// seed) completes.
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        self.collection.load_full()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Seed the collection from the mirror file, if this resource keeps one
    /// and no fetch has started yet. Failures are cache misses.
    pub async fn seed_from_mirror(&self) {
        let (Some(mirror), Some(key)) = (&self.mirror, T::CACHE_KEY) else {
            return;
        };
        if self.epoch.load(Ordering::SeqCst) != 0 {
            return;
        }
        match mirror.load::<Vec<T>>(key).await {
            Ok(Some(items)) => {
                debug!(resource = T::COLLECTION, count = items.len(), "seeded from mirror");
                if self.epoch.load(Ordering::SeqCst) == 0 {
                    self.collection.store(Arc::new(items));
                }
            }
            Ok(None) => {}
            Err(e) => warn!(resource = T::COLLECTION, error = %e, "mirror read failed"),
        }
    }

    /// Fetch the full collection and replace the local snapshot.
    ///
    /// On failure the previous collection is left untouched and the error is
    /// returned, so callers can tell "empty" from "failed to load". The
    /// loading flag is cleared on every path.
    pub async fn list(&self) -> Result<Arc<Vec<T>>, ClientError> {
        let token = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let _loading = LoadingGuard::new(&self.loading);

        match self.api.get::<Vec<T>>(T::COLLECTION).await {
            Ok(items) => {
                let items = Arc::new(items);
                if self.epoch.load(Ordering::SeqCst) == token {
                    self.collection.store(Arc::clone(&items));
                    self.write_mirror(&items).await;
                } else {
                    debug!(resource = T::COLLECTION, "discarding stale list result");
                }
                Ok(items)
            }
            Err(e) => {
                warn!(resource = T::COLLECTION, error = %e, "list failed; keeping previous collection");
                Err(e)
            }
        }
    }

    /// Create a record and refresh the collection. Returns the created
    /// record; the refresh is best-effort and cannot fail the create.
    pub async fn create<B: Serialize + ?Sized>(&self, payload: &B) -> Result<T, ClientError> {
        let created = self.api.post_json::<T, B>(T::CREATE_PATH, payload).await?;
        self.refresh_after_write().await;
        Ok(created)
    }

    /// Create via multipart, for resources with binary uploads. Some of
    /// those endpoints omit the created record from the envelope, hence the
    /// `Option`.
    pub async fn create_multipart(&self, form: Form) -> Result<Option<T>, ClientError> {
        let created = self.api.post_multipart::<T>(T::CREATE_PATH, form).await?;
        self.refresh_after_write().await;
        Ok(created)
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: &str,
        payload: &B,
    ) -> Result<T, ClientError> {
        let updated = self
            .api
            .put_json::<T, B>(&format!("{}/{}", T::ITEM_PREFIX, id), payload)
            .await?;
        self.refresh_after_write().await;
        Ok(updated)
    }

    pub async fn update_multipart(&self, id: &str, form: Form) -> Result<Option<T>, ClientError> {
        let updated = self
            .api
            .put_multipart::<T>(&format!("{}/{}", T::ITEM_PREFIX, id), form)
            .await?;
        self.refresh_after_write().await;
        Ok(updated)
    }

    /// Delete a record and refresh the collection. Stepping the view back a
    /// page when the last item of a page disappears is the caller's concern
    /// (see [`Pager::clamp`](crate::pagination::Pager::clamp)).
    pub async fn remove(&self, id: &str) -> Result<(), ClientError> {
        self.api
            .delete(&format!("{}/{}", T::ITEM_PREFIX, id))
            .await?;
        self.refresh_after_write().await;
        Ok(())
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.api
    }

    async fn refresh_after_write(&self) {
        if let Err(e) = self.list().await {
            warn!(resource = T::COLLECTION, error = %e, "refresh after write failed");
        }
    }

    async fn write_mirror(&self, items: &Arc<Vec<T>>) {
        let (Some(mirror), Some(key)) = (&self.mirror, T::CACHE_KEY) else {
            return;
        };
        if let Err(e) = mirror.store_if_changed(key, items.as_ref()).await {
            warn!(resource = T::COLLECTION, error = %e, "mirror write failed");
        }
    }
}
