//! Capability flags published for namespace nodes.
//!
//! Flags describe what a node *is* and what it supports: folder or item,
//! renameable, hidden, browsable. They are computed from in-memory state
//! only; resolving attributes never performs I/O.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// A set of per-node capability flags.
///
/// Unknown bits are preserved rather than masked so that attribute values
/// published by other providers round-trip untouched.
///
/// # Examples
///
/// ```
/// use junction::CapabilityFlags;
///
/// let attrs = CapabilityFlags::FOLDER | CapabilityFlags::BROWSABLE;
/// assert!(attrs.is_folder());
/// assert!(attrs.contains(CapabilityFlags::BROWSABLE));
/// assert!(!attrs.contains(CapabilityFlags::HIDDEN));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityFlags(u32);

impl CapabilityFlags {
    /// No capabilities.
    pub const NONE: Self = Self(0);

    /// The node is a folder and can contain children.
    pub const FOLDER: Self = Self(1);

    /// The node is a folder that contains at least one subfolder.
    pub const HAS_SUBFOLDER: Self = Self(1 << 1);

    /// The node supports renaming.
    pub const CAN_RENAME: Self = Self(1 << 2);

    /// The node should be hidden from normal views.
    pub const HIDDEN: Self = Self(1 << 3);

    /// The node can be browsed in place by the host.
    pub const BROWSABLE: Self = Self(1 << 4);

    /// Creates a flag set from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bits of this flag set.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` if every flag in `other` is set in `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use junction::CapabilityFlags;
    ///
    /// let attrs = CapabilityFlags::FOLDER | CapabilityFlags::HAS_SUBFOLDER;
    /// assert!(attrs.contains(CapabilityFlags::FOLDER));
    /// assert!(!attrs.contains(CapabilityFlags::CAN_RENAME));
    /// ```
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if the folder capability is set.
    #[must_use]
    pub const fn is_folder(self) -> bool {
        self.contains(Self::FOLDER)
    }

    /// Returns `true` if the hidden flag is set.
    #[must_use]
    pub const fn is_hidden(self) -> bool {
        self.contains(Self::HIDDEN)
    }

    /// Returns a copy of `self` with the flags in `other` added.
    #[must_use]
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for CapabilityFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CapabilityFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CapabilityFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for CapabilityFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(CapabilityFlags, &str); 5] = [
            (CapabilityFlags::FOLDER, "folder"),
            (CapabilityFlags::HAS_SUBFOLDER, "has-subfolder"),
            (CapabilityFlags::CAN_RENAME, "can-rename"),
            (CapabilityFlags::HIDDEN, "hidden"),
            (CapabilityFlags::BROWSABLE, "browsable"),
        ];

        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        if first {
            write!(f, "none")?;
        }
        Ok(())
    }
}
