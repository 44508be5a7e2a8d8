//! Data-synchronization layer between the PipeCraft backend and UI consumers.
//!
//! Every entity collection is owned by a [`ResourceStore`], a single generic
//! store parameterized by the [`Resource`] trait: it holds the current
//! in-memory collection, a loading flag, and CRUD operations that call the
//! backend and re-fetch the collection after each successful mutation.
//! [`AuthStore`] carries the cookie-backed session with a single
//! refresh-and-retry on 401. [`Stores`] wires one shared [`ApiClient`] into
//! all of them at startup; consumers receive handles rather than reaching
//! into globals.
//!
//! Collections are caches: a failed `list` keeps the previous snapshot and
//! surfaces a typed error, and a result that lands after a newer operation
//! has started is discarded instead of clobbering fresher state.

pub mod auth;
pub mod errors;
pub mod forms;
pub mod http;
pub mod mirror;
pub mod pagination;
pub mod resource;
pub mod store;
pub mod stores;

pub use auth::AuthStore;
pub use errors::ClientError;
pub use http::ApiClient;
pub use mirror::MirrorCache;
pub use pagination::Pager;
pub use resource::Resource;
pub use store::ResourceStore;
pub use stores::{
    ApplicationStore, ContactStore, JobPostingStore, ProjectStore, ServiceStore, Stores, TeamStore,
};
