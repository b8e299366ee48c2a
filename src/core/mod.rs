pub mod error;
pub mod fixtures;
pub mod logging;
pub mod models;
pub mod presentation;
pub mod selection;
pub mod validation;
