pub mod cost;
pub mod driver;
pub mod order;
pub mod service;
pub mod trust;
