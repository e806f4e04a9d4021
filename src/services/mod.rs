pub mod blockchain_service;
pub mod units;
