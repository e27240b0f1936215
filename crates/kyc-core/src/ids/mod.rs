//! ID type wrappers for type safety.

mod id_macro;

pub mod flow_id;
pub mod host_view_id;
pub mod profile_id;

pub use flow_id::{FlowId, ScreenId};
pub use host_view_id::HostViewId;
pub use profile_id::ProfileId;
