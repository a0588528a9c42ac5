pub mod profile;
pub mod tournament_history;
pub mod user;
