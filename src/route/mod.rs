pub mod auth;
pub mod club;
pub mod editor;
#[cfg(test)]
mod editor_test;
pub mod player;
