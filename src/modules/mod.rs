pub mod auth;
pub mod taxonomy;
pub mod teachers;
