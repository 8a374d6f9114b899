pub mod account;
pub mod components;
pub mod dashboard;
pub mod exam;
pub mod homepage;
pub mod layout;
pub mod question;
pub mod solve;

pub use layout::{page, page_with_user, render, titled};
