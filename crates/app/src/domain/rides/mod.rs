//! Rides

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::RidesServiceError;
pub use service::*;
