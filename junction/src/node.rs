//! The capability-polymorphic namespace node abstraction.
//!
//! Every unit of the virtual hierarchy is a [`NamespaceNode`]. Nodes that
//! can contain children additionally implement [`NamespaceFolder`], reached
//! through [`NamespaceNode::as_folder`]. There is exactly one node interface
//! in the core; any legacy/extended protocol split belongs to the outermost
//! host adaptation boundary, not here.

use std::ops::BitOr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::attributes::CapabilityFlags;
use crate::error::{Error, Result};
use crate::idlist::Identifier;

/// Shared reference to a namespace node.
pub type NodeRef = Arc<dyn NamespaceNode>;

/// The form in which a display name is requested.
///
/// # Examples
///
/// ```
/// use junction::DisplayNameForm;
///
/// let form = DisplayNameForm::ForParsing;
/// assert_ne!(form, DisplayNameForm::Normal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayNameForm {
    /// The user-facing label.
    Normal,
    /// The string pre-populated in a rename UI.
    Editable,
    /// A name guaranteed to round-trip through name parsing back to the
    /// originating node, uniquely within its folder.
    ForParsing,
}

/// Filter flags for child enumeration.
///
/// Nodes matching no requested flag are skipped during enumeration.
///
/// # Examples
///
/// ```
/// use junction::EnumFlags;
///
/// let all = EnumFlags::FOLDERS | EnumFlags::ITEMS;
/// assert!(all.wants_folders());
/// assert!(all.wants_items());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumFlags(u8);

impl EnumFlags {
    /// Include folder-capable nodes.
    pub const FOLDERS: Self = Self(1);

    /// Include non-folder (item) nodes.
    pub const ITEMS: Self = Self(1 << 1);

    /// Include both folders and items.
    pub const ALL: Self = Self(1 | 1 << 1);

    /// Returns `true` if folders are requested.
    #[must_use]
    pub const fn wants_folders(self) -> bool {
        self.0 & Self::FOLDERS.0 != 0
    }

    /// Returns `true` if items are requested.
    #[must_use]
    pub const fn wants_items(self) -> bool {
        self.0 & Self::ITEMS.0 != 0
    }

    /// Returns `true` if a node with the given attributes passes the filter.
    #[must_use]
    pub const fn admits(self, attributes: CapabilityFlags) -> bool {
        if attributes.is_folder() {
            self.wants_folders()
        } else {
            self.wants_items()
        }
    }
}

impl BitOr for EnumFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A detail column the host renders in its default view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Column header text.
    pub title: String,
    /// Suggested column width in characters.
    pub width: u32,
    /// Whether the column is visible by default.
    pub default_visible: bool,
}

impl ColumnDefinition {
    /// Creates a visible column with the given title and width.
    #[must_use]
    pub fn new(title: impl Into<String>, width: u32) -> Self {
        Self {
            title: title.into(),
            width,
            default_visible: true,
        }
    }
}

/// How a folder's contents are presented by the host.
///
/// Orthogonal to the tree model: a folder's children enumerate the same way
/// regardless of how they are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderViewDescriptor {
    /// The host renders the folder using the supplied column definitions.
    Default {
        /// Detail columns for the host's default presentation.
        columns: Vec<ColumnDefinition>,
    },
    /// The provider takes over the full presentation.
    Custom,
}

/// A node in the virtual namespace: an item, or a folder via
/// [`NamespaceNode::as_folder`].
///
/// Implementations must be cheap and synchronous: no method may block on
/// I/O beyond local memory, since the host may hold UI-thread resources
/// while calling in.
pub trait NamespaceNode: Send + Sync + std::fmt::Debug {
    /// The stable identifier of this node, valid for its lifetime under a
    /// fixed parent.
    fn identifier(&self) -> &Identifier;

    /// The display name of this node in the requested form.
    fn display_name(&self, form: DisplayNameForm) -> String;

    /// The static capability set of this node. Never performs I/O.
    fn attributes(&self) -> CapabilityFlags;

    /// Returns the folder capability of this node, if it has one.
    fn as_folder(&self) -> Option<&dyn NamespaceFolder> {
        None
    }

    /// The value of a detail column for this node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] when the node carries no value for
    /// the column. Callers can distinguish that from a failed lookup.
    fn detail(&self, column: u32) -> Result<String> {
        Err(Error::Unsupported {
            what: format!("detail column {column}"),
        })
    }
}

/// The folder capability: an ordered, filterable child collection.
pub trait NamespaceFolder: NamespaceNode {
    /// Enumerates the children of this folder.
    ///
    /// The sequence is lazy, finite, and restartable: every call begins a
    /// fresh traversal with no cursor shared across calls. Order must be
    /// stable across repeated calls while the underlying data is unchanged.
    /// Children matching no requested flag are skipped.
    fn children(&self, flags: EnumFlags) -> Box<dyn Iterator<Item = NodeRef> + '_>;

    /// The view descriptor for this folder.
    fn view(&self) -> FolderViewDescriptor {
        FolderViewDescriptor::Default {
            columns: Vec::new(),
        }
    }
}
