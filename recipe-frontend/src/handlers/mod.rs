pub mod app;
pub mod error;
pub mod history;
pub mod home;
pub mod recipe;

pub use error::PageError;
