//! # Network namespace identity.
//!
//! The controller finds the pod's network namespace by its kernel inode
//! number. [`ProcNamespace`] opens the process's own namespace file
//! (`/proc/self/ns/net`), reads the inode through the open descriptor, and
//! formats it as `inode://4/<inode>`.
//!
//! The descriptor lives in a [`NamespaceHandle`] scoped to one
//! [`resolve`](NamespaceResolver::resolve) call and is closed on every return
//! path. Resolution runs once per session attempt, so it must not accumulate
//! descriptors over the life of the process.

use std::fmt;
use std::fs::File;
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use crate::error::{Result, SessionError};

/// Default location of the calling process's network namespace handle.
pub const SELF_NET_NS: &str = "/proc/self/ns/net";

/// Device class placed in front of the inode in [`NamespaceIdentity`].
pub const NS_DEVICE_CLASS: u32 = 4;

/// URL-shaped identity of a network namespace, e.g. `inode://4/4026531992`.
///
/// Valid only while the process stays in that namespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamespaceIdentity(String);

impl NamespaceIdentity {
    /// Formats the identity for a namespace inode.
    ///
    /// ```
    /// use nsc_sidecar::NamespaceIdentity;
    ///
    /// assert_eq!(NamespaceIdentity::from_inode(4026531992).as_str(), "inode://4/4026531992");
    /// ```
    pub fn from_inode(inode: u64) -> Self {
        Self(format!("inode://{NS_DEVICE_CLASS}/{inode}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NamespaceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Computes the identity of the current network namespace.
pub trait NamespaceResolver: Send + Sync + 'static {
    /// Resolves the identity, or fails with [`SessionError::IdentityUnavailable`].
    fn resolve(&self) -> Result<NamespaceIdentity>;
}

/// Open descriptor on a namespace file; closed on drop.
#[derive(Debug)]
pub struct NamespaceHandle {
    file: File,
}

impl NamespaceHandle {
    pub fn open(path: &Path) -> io::Result<Self> {
        Ok(Self {
            file: File::open(path)?,
        })
    }

    /// Inode of the namespace, read with `fstat` on the open descriptor.
    pub fn inode(&self) -> io::Result<u64> {
        Ok(self.file.metadata()?.ino())
    }
}

/// Resolver backed by a `/proc` namespace file.
#[derive(Clone, Debug)]
pub struct ProcNamespace {
    path: PathBuf,
}

impl ProcNamespace {
    /// Resolver for an explicit namespace file (e.g. `/proc/<pid>/ns/net`).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ProcNamespace {
    fn default() -> Self {
        Self::at(SELF_NET_NS)
    }
}

impl NamespaceResolver for ProcNamespace {
    fn resolve(&self) -> Result<NamespaceIdentity> {
        let unavailable = |action: &str, err: io::Error| SessionError::IdentityUnavailable {
            reason: format!("{action} {}: {err}", self.path.display()),
        };

        let handle = NamespaceHandle::open(&self.path).map_err(|e| unavailable("open", e))?;
        let inode = handle.inode().map_err(|e| unavailable("fstat", e))?;
        Ok(NamespaceIdentity::from_inode(inode))
    }
}
