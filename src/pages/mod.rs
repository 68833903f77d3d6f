pub mod chat;
pub mod home;
pub mod not_found;
