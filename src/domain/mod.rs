pub mod activity;
pub mod health;
pub mod milestone;
pub mod notification;
pub mod project;
pub mod room;
pub mod sprint;
pub mod task;
pub mod user;
pub mod workspace;
