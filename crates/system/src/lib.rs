//! Host introspection for nanolayer.
//!
//! Installers never probe the machine directly. They receive a [`HostSystem`]
//! so that tests can pin a host profile with [`StaticHost`] while production
//! code uses [`LinuxSystem`].

mod architecture;
mod distribution;
mod host;

pub use architecture::Architecture;
pub use distribution::{Distribution, OS_RELEASE_FILE};
pub use host::{HostSystem, LinuxSystem, StaticHost};
