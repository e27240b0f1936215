use crate::kyc::PageModel;

/// Receives pre-population data right before a page appears.
///
/// The coordinator holds delegates weakly; dropping the delegate is enough to
/// stop receiving models.
pub trait PageModelDelegate: Send + Sync {
    fn apply(&self, model: PageModel);
}
