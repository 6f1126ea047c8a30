//! Registration of extension roots with the host.
//!
//! A provider describes itself with a [`RegistrationDescriptor`]: a stable
//! [`ExtensionIdentity`], optional presentation metadata, and the mount
//! points where its root should appear. The [`RegistrationStore`] persists
//! installed registrations so that hosts can discover them across runs.
//!
//! Installation is idempotent per identity; two different identities
//! claiming the same mount point is a conflict.

mod descriptor;
mod store;

pub use descriptor::{
    ExtensionIdentity, MountPoint, MountRegion, RegistrationDescriptor, RegistrationScope,
};
pub use store::{MountEntry, RegistrationStore};
