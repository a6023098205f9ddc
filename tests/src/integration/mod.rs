//! Integration scenarios.

pub mod activation_flow;
pub mod concurrency;
pub mod request_services;
