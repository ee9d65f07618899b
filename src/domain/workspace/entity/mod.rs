pub mod workspace;
pub mod workspace_member;
