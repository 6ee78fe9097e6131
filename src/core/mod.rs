//! Hub core: name binding and inbound routing.
//!
//! The public API from this module is [`Hub`], [`HubBuilder`] and [`Registry`].
//!
//! Internal modules:
//! - [`registry`]: name → attached event table (non-owning);
//! - [`hub`]: creates events, owns collaborators, routes inbound notifications;
//! - [`builder`]: assembles a hub from custom collaborators.

mod builder;
mod hub;
mod registry;

pub use builder::HubBuilder;
pub use hub::Hub;
pub(crate) use hub::HubContext;
pub use registry::Registry;
