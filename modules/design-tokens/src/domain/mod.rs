pub mod error;
pub mod models;
pub mod password;
pub mod service;
pub mod validation;
