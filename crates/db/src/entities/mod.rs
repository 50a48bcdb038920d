//! Database entities.

pub mod department;
pub mod post;
pub mod principal;
pub mod staff_member;

pub use department::{DepartmentIcon, Entity as Department};
pub use post::{Entity as Post, PostType};
pub use principal::Entity as Principal;
pub use staff_member::{Entity as StaffMember, StaffRole};
