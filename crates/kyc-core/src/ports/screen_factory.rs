use crate::ids::FlowId;
use crate::kyc::{AccountStatusModel, InformationModel, PagePayload, PageType, ScreenHandle};

/// Builds screen instances for the presentation host.
///
/// Deterministic for given inputs and infallible: an unknown page type is a
/// programming error in the implementation, not a runtime condition.
pub trait ScreenFactoryPort: Send + Sync {
    fn create(&self, page: PageType, flow: &FlowId, payload: Option<&PagePayload>)
        -> ScreenHandle;

    fn create_account_status(&self, model: AccountStatusModel) -> ScreenHandle;

    fn create_information(&self, model: InformationModel) -> ScreenHandle;
}
