pub mod allocations;
pub mod clients;
