//! GitHub Classroom lookups used by `clone` and `list`

pub mod client;
pub mod models;

pub use client::{ClassroomClient, ClassroomError, GITHUB_API_URL};
pub use models::{AcceptedAssignment, Assignment, Classroom, Student, StudentRepository};
