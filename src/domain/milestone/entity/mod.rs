pub mod milestone;
pub mod milestone_dependency;
