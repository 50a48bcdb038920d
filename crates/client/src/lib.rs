//! Typed client for the school site API.
//!
//! Besides raw HTTP access this crate carries the consumer-side logic the
//! public site and the admin console share:
//!
//! - [`EntityManager`]: per-entity admin state machine (load, edit, submit, delete)
//! - [`PublicView`]: read-only list state with local filtering
//! - [`CachedStaffApi`]: staff directory memoised in a [`TimedCache`]
//!
//! All backends implement [`EntityApi`], so managers and views can run
//! against [`HttpClient`] or an in-memory implementation.

pub mod api;
pub mod cache;
pub mod error;
pub mod http;
pub mod manager;
pub mod models;
pub mod preview;
pub mod views;

pub use api::{CachedStaffApi, EntityApi};
pub use cache::TimedCache;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use manager::{EntityManager, Mode, Notice, NoticeKind};
pub use models::{
    Department, DepartmentDraft, Draft, Entity, Post, PostDraft, Principal, PrincipalDraft,
    StaffDraft, StaffMember,
};
pub use preview::ImagePreview;
pub use views::{PostFilter, PublicView, StaffCategory};
