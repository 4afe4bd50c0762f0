pub mod admin;
pub mod exit;
pub mod guests;
pub mod home;
