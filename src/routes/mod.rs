pub mod admin;
pub mod donations;
pub mod home;
pub mod requests;
