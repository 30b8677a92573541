pub mod auth;
pub mod cache;
pub mod favorite;
pub mod member;
pub mod subway;
