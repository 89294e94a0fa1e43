pub mod cost;
pub mod lifecycle;
pub mod trust;
pub mod zone;
