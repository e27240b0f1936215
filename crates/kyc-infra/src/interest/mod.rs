mod file_interest_registry;

pub use file_interest_registry::{FileInterestRegistry, InterestRecord};
