use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Presenting context the flow was started from.
///
/// Kept by the coordinator so terminal outcomes (e.g. entering the exchange)
/// can be routed back to the original presenter after the flow is dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostViewId(String);

impl_id!(HostViewId);
