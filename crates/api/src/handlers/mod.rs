pub mod auth;
pub mod contact;
pub mod crud;
pub mod testimonials;
pub mod upload;
