use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Opaque handle to the navigation stack owned by one flow instance.
///
/// Screens receive it from the factory so the host can route pushes to the
/// right stack; the coordinator never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowId(String);

/// Identifier of a single screen instance produced by the screen factory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenId(String);

impl_id!(FlowId, ScreenId);
