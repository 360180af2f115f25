pub mod catalog;
pub mod clock;
pub mod error;
pub mod keys;
pub mod local_client;
pub mod records;
pub mod service;
pub mod store;

#[cfg(test)]
mod service_test;
