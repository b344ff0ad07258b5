pub mod error;
pub mod marketstack;
pub mod provider;
