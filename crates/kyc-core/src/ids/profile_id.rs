use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Backend identifier of the user whose verification profile is being resumed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl_id!(ProfileId);
