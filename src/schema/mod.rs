pub mod auth;
pub mod club;
pub mod common;
pub mod player;
pub mod profile;
