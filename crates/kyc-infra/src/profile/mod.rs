mod file_profile_provider;

pub use file_profile_provider::{FileProfileProvider, ProfileLoadError};
