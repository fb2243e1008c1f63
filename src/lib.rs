pub mod config;
pub mod domain;
pub mod reputation;
pub mod service;
pub mod similarity;
pub mod store;
pub mod validation;
