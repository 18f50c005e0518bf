//! # Local network interface enumeration.
//!
//! [`InterfaceProbe`] lists interface names visible to the process;
//! [`SystemInterfaces`] does so with `if_nameindex(3)`. The monitor only asks
//! one question of a probe: [`has_interface`] with the managed prefix.

use std::io;

/// Lists the network interfaces visible to this process.
pub trait InterfaceProbe: Send + Sync + 'static {
    fn interface_names(&self) -> io::Result<Vec<String>>;
}

/// Probe backed by the kernel's interface index.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemInterfaces;

impl InterfaceProbe for SystemInterfaces {
    fn interface_names(&self) -> io::Result<Vec<String>> {
        let interfaces = nix::net::if_::if_nameindex().map_err(io::Error::from)?;
        Ok(interfaces
            .iter()
            .map(|iface| iface.name().to_string_lossy().into_owned())
            .collect())
    }
}

/// True if any visible interface name starts with `prefix`.
///
/// An enumeration error counts as "no interface".
pub fn has_interface(probe: &dyn InterfaceProbe, prefix: &str) -> bool {
    match probe.interface_names() {
        Ok(names) => names.iter().any(|name| name.starts_with(prefix)),
        Err(err) => {
            tracing::debug!(error = %err, "interface enumeration failed");
            false
        }
    }
}
