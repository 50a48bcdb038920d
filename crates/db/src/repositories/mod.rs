//! Repositories, one per table.

pub mod department;
pub mod post;
pub mod principal;
pub mod staff_member;

pub use department::DepartmentRepository;
pub use post::PostRepository;
pub use principal::PrincipalRepository;
pub use staff_member::StaffMemberRepository;
