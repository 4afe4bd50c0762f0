pub mod admin_settings;
pub mod guest;
