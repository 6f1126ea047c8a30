//! Registration descriptor types.
//!
//! These types describe what a provider asks the host for: who it is, how
//! it should be presented, and where its root folder should be mounted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Stable identity of an extension.
///
/// The identity is the key under which registrations are recorded. It is
/// matched case-insensitively, but the original casing is preserved for
/// display.
///
/// # Examples
///
/// ```
/// use junction::ExtensionIdentity;
///
/// let identity = ExtensionIdentity::new("Acme.GadgetBrowser").unwrap();
/// assert_eq!(identity.as_str(), "Acme.GadgetBrowser");
/// assert!(identity.matches("acme.gadgetbrowser"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExtensionIdentity(String);

impl ExtensionIdentity {
    /// Creates an identity from a non-empty string.
    ///
    /// Surrounding whitespace is trimmed, so `" acme"` and `"acme"` name
    /// the same identity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the string is empty or whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation {
                field: "identity".to_string(),
                message: "extension identity cannot be empty".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The identity string as registered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `other` names the same identity, ignoring case.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for ExtensionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ExtensionIdentity {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ExtensionIdentity> for String {
    fn from(identity: ExtensionIdentity) -> Self {
        identity.0
    }
}

/// Well-known host region a root folder can be mounted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MountRegion {
    /// The user's desktop surface.
    Desktop,
    /// The computer/devices view.
    Computer,
    /// The network view.
    Network,
    /// The settings/control view.
    ControlPanel,
    /// The per-user files root.
    UsersFiles,
}

impl MountRegion {
    /// All regions, in their canonical listing order.
    pub const ALL: [Self; 5] = [
        Self::Desktop,
        Self::Computer,
        Self::Network,
        Self::ControlPanel,
        Self::UsersFiles,
    ];

    /// Canonical lowercase name, used for storage and display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Computer => "computer",
            Self::Network => "network",
            Self::ControlPanel => "control-panel",
            Self::UsersFiles => "users-files",
        }
    }
}

impl fmt::Display for MountRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MountRegion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "desktop" => Ok(Self::Desktop),
            "computer" => Ok(Self::Computer),
            "network" => Ok(Self::Network),
            "control-panel" => Ok(Self::ControlPanel),
            "users-files" => Ok(Self::UsersFiles),
            other => Err(Error::Validation {
                field: "region".to_string(),
                message: format!("unknown mount region '{other}'"),
            }),
        }
    }
}

/// Whether a registration applies to the current user or the whole machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrationScope {
    /// Visible only to the installing user. The default.
    #[default]
    PerUser,
    /// Visible to every user of the machine.
    Machine,
}

impl RegistrationScope {
    /// Canonical lowercase name, used for storage and display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PerUser => "per-user",
            Self::Machine => "machine",
        }
    }
}

impl fmt::Display for RegistrationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RegistrationScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "per-user" | "user" => Ok(Self::PerUser),
            "machine" | "system" => Ok(Self::Machine),
            other => Err(Error::Validation {
                field: "scope".to_string(),
                message: format!("unknown registration scope '{other}'"),
            }),
        }
    }
}

/// One place a root folder is mounted: a region plus the label shown there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountPoint {
    /// The host region the root appears under.
    pub region: MountRegion,
    /// The label the root is listed as within that region.
    pub label: String,
}

impl MountPoint {
    /// Creates a mount point with a validated label.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the label is empty or contains the
    /// path separator.
    pub fn new(region: MountRegion, label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(Error::Validation {
                field: "label".to_string(),
                message: "mount label cannot be empty".to_string(),
            });
        }
        if label.contains(crate::tree::PATH_SEPARATOR) {
            return Err(Error::Validation {
                field: "label".to_string(),
                message: "mount label cannot contain the path separator".to_string(),
            });
        }
        Ok(Self { region, label })
    }
}

/// Everything a provider declares about itself for installation.
///
/// # Examples
///
/// ```
/// use junction::{ExtensionIdentity, MountPoint, MountRegion, RegistrationDescriptor};
///
/// let descriptor = RegistrationDescriptor::new(
///     ExtensionIdentity::new("Acme.GadgetBrowser").unwrap(),
/// )
/// .tooltip("Browse Acme gadgets")
/// .mount(MountPoint::new(MountRegion::Computer, "Gadgets").unwrap());
///
/// assert_eq!(descriptor.mounts.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDescriptor {
    /// Stable identity of the extension.
    pub identity: ExtensionIdentity,
    /// Optional hover text shown for the mounted root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    /// Where the root folder is mounted.
    #[serde(default)]
    pub mounts: Vec<MountPoint>,
}

impl RegistrationDescriptor {
    /// Creates a descriptor with no mounts.
    #[must_use]
    pub const fn new(identity: ExtensionIdentity) -> Self {
        Self {
            identity,
            tooltip: None,
            mounts: Vec::new(),
        }
    }

    /// Sets the tooltip.
    #[must_use]
    pub fn tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(text.into());
        self
    }

    /// Adds a mount point.
    #[must_use]
    pub fn mount(mut self, point: MountPoint) -> Self {
        self.mounts.push(point);
        self
    }

    /// Validates that the descriptor can be installed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the descriptor declares no mounts
    /// or mounts the same (region, label) pair twice.
    pub fn validate(&self) -> Result<()> {
        if self.mounts.is_empty() {
            return Err(Error::Validation {
                field: "mounts".to_string(),
                message: "descriptor must declare at least one mount point".to_string(),
            });
        }
        for (i, a) in self.mounts.iter().enumerate() {
            for b in &self.mounts[i + 1..] {
                if a.region == b.region && a.label.eq_ignore_ascii_case(&b.label) {
                    return Err(Error::Validation {
                        field: "mounts".to_string(),
                        message: format!(
                            "duplicate mount '{}' under region '{}'",
                            a.label, a.region
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_rejects_empty() {
        assert!(ExtensionIdentity::new("").is_err());
        assert!(ExtensionIdentity::new("   ").is_err());
    }

    #[test]
    fn test_identity_trims_surrounding_whitespace() {
        let identity = ExtensionIdentity::new("  Acme.Browser ").unwrap();
        assert_eq!(identity.as_str(), "Acme.Browser");
        assert!(identity.matches("acme.browser"));
        assert_eq!(identity, ExtensionIdentity::new("Acme.Browser").unwrap());
    }

    #[test]
    fn test_identity_deserialization_validates() {
        let identity: ExtensionIdentity = serde_yaml::from_str("' acme.x '").unwrap();
        assert_eq!(identity.as_str(), "acme.x");
        assert!(serde_yaml::from_str::<ExtensionIdentity>("'   '").is_err());
    }

    #[test]
    fn test_identity_matches_case_insensitively() {
        let identity = ExtensionIdentity::new("Acme.Browser").unwrap();
        assert!(identity.matches("ACME.BROWSER"));
        assert!(identity.matches("acme.browser"));
        assert!(!identity.matches("acme.other"));
        assert_eq!(identity.as_str(), "Acme.Browser");
    }

    #[test]
    fn test_region_display_and_parse() {
        for region in MountRegion::ALL {
            let parsed: MountRegion = region.to_string().parse().unwrap();
            assert_eq!(parsed, region);
        }
        assert!("nowhere".parse::<MountRegion>().is_err());
    }

    #[test]
    fn test_scope_display_and_parse() {
        assert_eq!(
            "per-user".parse::<RegistrationScope>().unwrap(),
            RegistrationScope::PerUser
        );
        assert_eq!(
            "machine".parse::<RegistrationScope>().unwrap(),
            RegistrationScope::Machine
        );
        assert_eq!(
            "USER".parse::<RegistrationScope>().unwrap(),
            RegistrationScope::PerUser
        );
        assert!("global".parse::<RegistrationScope>().is_err());
        assert_eq!(RegistrationScope::default(), RegistrationScope::PerUser);
    }

    #[test]
    fn test_mount_point_label_validation() {
        assert!(MountPoint::new(MountRegion::Desktop, "").is_err());
        assert!(MountPoint::new(MountRegion::Desktop, "a\\b").is_err());
        assert!(MountPoint::new(MountRegion::Desktop, "Gadgets").is_ok());
    }

    #[test]
    fn test_descriptor_requires_a_mount() {
        let descriptor =
            RegistrationDescriptor::new(ExtensionIdentity::new("acme.x").unwrap());
        assert!(descriptor.validate().is_err());
    }

    #[test]
    fn test_descriptor_rejects_duplicate_mounts() {
        let descriptor = RegistrationDescriptor::new(ExtensionIdentity::new("acme.x").unwrap())
            .mount(MountPoint::new(MountRegion::Computer, "Gadgets").unwrap())
            .mount(MountPoint::new(MountRegion::Computer, "GADGETS").unwrap());
        assert!(descriptor.validate().is_err());
    }

    #[test]
    fn test_descriptor_allows_same_label_in_different_regions() {
        let descriptor = RegistrationDescriptor::new(ExtensionIdentity::new("acme.x").unwrap())
            .mount(MountPoint::new(MountRegion::Computer, "Gadgets").unwrap())
            .mount(MountPoint::new(MountRegion::Desktop, "Gadgets").unwrap());
        assert!(descriptor.validate().is_ok());
    }

    #[test]
    fn test_descriptor_yaml_round_trip() {
        let descriptor = RegistrationDescriptor::new(ExtensionIdentity::new("acme.x").unwrap())
            .tooltip("Browse gadgets")
            .mount(MountPoint::new(MountRegion::Computer, "Gadgets").unwrap());

        let text = serde_yaml::to_string(&descriptor).unwrap();
        let back: RegistrationDescriptor = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back, descriptor);
    }
}
