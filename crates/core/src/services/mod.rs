//! Business logic services.

#![allow(missing_docs)]

pub mod department;
pub mod media;
pub mod post;
pub mod principal;
pub mod staff;

pub use department::{DepartmentInput, DepartmentService};
pub use media::{MediaService, StoredImage};
pub use post::{PostInput, PostService};
pub use principal::{PrincipalInput, PrincipalService};
pub use staff::{StaffInput, StaffService};
