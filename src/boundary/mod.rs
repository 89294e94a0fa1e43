pub mod assignment;
pub mod placement;
pub mod status;

pub use assignment::{AssignmentInput, AssignmentOutcome, assign_driver};
pub use placement::{PlacementInput, PlacementOutcome, place_order};
pub use status::{StatusUpdateInput, StatusUpdateOutcome, update_status};
