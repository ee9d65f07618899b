pub mod dto;
pub mod entity;
pub mod graph;
pub mod handler;
pub mod service;
