pub mod allocation;
pub mod asset;
pub mod client;
