pub mod aggregate;
pub mod columns;
pub mod config;
pub mod dates;
pub mod error;
pub mod loader;
pub mod models;
pub mod query;
pub mod report;
pub mod route_id;
pub mod status;
pub mod transform;

#[cfg(test)]
mod fixtures;

pub use error::LoadError;
pub use loader::{CsvSource, DataLoader, FileSource, HttpSource};
pub use models::{Advisor, Company, Dataset, Intern, Internship, Status};
pub use route_id::{decode, encode, Decoded};
pub use status::classify;
