//! Remote interaction layer: talks to the directory service.

pub mod dto;
pub mod http_directory_client;

pub use http_directory_client::HttpDirectoryClient;
