//! Port interfaces for the application layer
//!
//! Ports define the contract between the flow coordinator and whatever hosts
//! it: the UI toolkit, the backend session and the platform services. The
//! coordinator only ever sees these traits.

pub mod delegate;
pub mod interest;
pub mod outcome;
pub mod presentation;
pub mod profile_provider;
pub mod screen_factory;

pub use delegate::PageModelDelegate;
pub use interest::InterestRegistrationPort;
pub use outcome::{ExchangeEntryPort, ExternalLinkPort, NotificationPermissionPort};
pub use presentation::PresentationHostPort;
pub use profile_provider::ProfileProviderPort;
pub use screen_factory::ScreenFactoryPort;
