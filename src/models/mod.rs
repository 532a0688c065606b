pub mod client;
pub mod document;
pub mod inventory;
pub mod project;
pub mod task;
pub mod team_member;
pub mod user;
