//! In-memory namespace provider.
//!
//! [`MemoryFolder`] and [`MemoryItem`] are the concrete provider used by
//! tests, documentation, and embedders that define their hierarchy up
//! front. Identifiers are derived from a type tag plus the node name, so
//! they are stable across enumerations and process restarts as long as the
//! tree definition is unchanged.
//!
//! # Examples
//!
//! ```
//! use junction::{EnumFlags, MemoryFolder, MemoryItem, NamespaceFolder};
//!
//! let root = MemoryFolder::builder("Root")
//!     .folder(MemoryFolder::builder("Alpha").build().unwrap())
//!     .item(MemoryItem::new("beta.txt").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(root.children(EnumFlags::ALL).count(), 2);
//! assert_eq!(root.children(EnumFlags::FOLDERS).count(), 1);
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::attributes::CapabilityFlags;
use crate::error::{Error, Result};
use crate::idlist::Identifier;
use crate::node::{
    ColumnDefinition, DisplayNameForm, EnumFlags, FolderViewDescriptor, NamespaceFolder,
    NamespaceNode, NodeRef,
};

/// Type tag prepended to folder identifiers.
const FOLDER_TAG: u8 = 0x01;

/// Type tag prepended to item identifiers.
const ITEM_TAG: u8 = 0x02;

fn derive_identifier(tag: u8, name: &str) -> Result<Identifier> {
    let mut bytes = Vec::with_capacity(1 + name.len());
    bytes.push(tag);
    bytes.extend_from_slice(name.as_bytes());
    Identifier::new(bytes).map_err(|e| Error::Validation {
        field: "name".to_string(),
        message: e.reason,
    })
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::Validation {
            field: "name".to_string(),
            message: "node name must be non-empty".to_string(),
        });
    }
    if name.contains('\\') {
        return Err(Error::Validation {
            field: "name".to_string(),
            message: "node name must not contain the path separator".to_string(),
        });
    }
    Ok(())
}

/// A leaf node with a name, attributes, and optional detail-column values.
///
/// # Examples
///
/// ```
/// use junction::{CapabilityFlags, DisplayNameForm, MemoryItem, NamespaceNode};
///
/// let item = MemoryItem::new("notes.txt")
///     .unwrap()
///     .with_attributes(CapabilityFlags::CAN_RENAME)
///     .with_detail(1, "4 KB");
///
/// assert_eq!(item.display_name(DisplayNameForm::Normal), "notes.txt");
/// assert_eq!(item.detail(1).unwrap(), "4 KB");
/// assert!(item.detail(2).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MemoryItem {
    id: Identifier,
    name: String,
    attributes: CapabilityFlags,
    details: BTreeMap<u32, String>,
}

impl MemoryItem {
    /// Creates an item with the given name.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty or contains the
    /// namespace path separator.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        let id = derive_identifier(ITEM_TAG, &name)?;
        Ok(Self {
            id,
            name,
            attributes: CapabilityFlags::NONE,
            details: BTreeMap::new(),
        })
    }

    /// Adds capability flags to this item.
    ///
    /// Folder-only flags are stripped: an item never reports the folder
    /// capability.
    #[must_use]
    pub fn with_attributes(mut self, extra: CapabilityFlags) -> Self {
        let folder_only = CapabilityFlags::FOLDER | CapabilityFlags::HAS_SUBFOLDER;
        self.attributes = CapabilityFlags::from_bits(
            (self.attributes | extra).bits() & !folder_only.bits(),
        );
        self
    }

    /// Sets the value of a detail column for this item.
    #[must_use]
    pub fn with_detail(mut self, column: u32, value: impl Into<String>) -> Self {
        self.details.insert(column, value.into());
        self
    }

    /// The item's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl NamespaceNode for MemoryItem {
    fn identifier(&self) -> &Identifier {
        &self.id
    }

    fn display_name(&self, _form: DisplayNameForm) -> String {
        // Names are unique per folder, so the same string serves every
        // form, including ForParsing.
        self.name.clone()
    }

    fn attributes(&self) -> CapabilityFlags {
        self.attributes
    }

    fn detail(&self, column: u32) -> Result<String> {
        self.details
            .get(&column)
            .cloned()
            .ok_or_else(|| Error::Unsupported {
                what: format!("detail column {column}"),
            })
    }
}

/// A folder node with an ordered child collection.
///
/// Constructed through [`MemoryFolder::builder`], which validates that
/// sibling names are unique (case-insensitively), since the `ForParsing`
/// display form must re-identify a child uniquely within its folder.
#[derive(Clone)]
pub struct MemoryFolder {
    id: Identifier,
    name: String,
    attributes: CapabilityFlags,
    children: Vec<NodeRef>,
    columns: Vec<ColumnDefinition>,
    custom_view: bool,
    details: BTreeMap<u32, String>,
}

impl MemoryFolder {
    /// Starts building a folder with the given name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> MemoryFolderBuilder {
        MemoryFolderBuilder {
            name: name.into(),
            attributes: CapabilityFlags::NONE,
            children: Vec::new(),
            columns: Vec::new(),
            custom_view: false,
            details: BTreeMap::new(),
        }
    }

    /// The folder's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wraps this folder in a shared reference.
    #[must_use]
    pub fn into_ref(self) -> Arc<MemoryFolder> {
        Arc::new(self)
    }
}

impl std::fmt::Debug for MemoryFolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryFolder")
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}

impl NamespaceNode for MemoryFolder {
    fn identifier(&self) -> &Identifier {
        &self.id
    }

    fn display_name(&self, _form: DisplayNameForm) -> String {
        self.name.clone()
    }

    fn attributes(&self) -> CapabilityFlags {
        self.attributes
    }

    fn as_folder(&self) -> Option<&dyn NamespaceFolder> {
        Some(self)
    }

    fn detail(&self, column: u32) -> Result<String> {
        self.details
            .get(&column)
            .cloned()
            .ok_or_else(|| Error::Unsupported {
                what: format!("detail column {column}"),
            })
    }
}

impl NamespaceFolder for MemoryFolder {
    fn children(&self, flags: EnumFlags) -> Box<dyn Iterator<Item = NodeRef> + '_> {
        Box::new(
            self.children
                .iter()
                .filter(move |child| flags.admits(child.attributes()))
                .cloned(),
        )
    }

    fn view(&self) -> FolderViewDescriptor {
        if self.custom_view {
            FolderViewDescriptor::Custom
        } else {
            FolderViewDescriptor::Default {
                columns: self.columns.clone(),
            }
        }
    }
}

/// Builder for [`MemoryFolder`].
pub struct MemoryFolderBuilder {
    name: String,
    attributes: CapabilityFlags,
    children: Vec<NodeRef>,
    columns: Vec<ColumnDefinition>,
    custom_view: bool,
    details: BTreeMap<u32, String>,
}

impl MemoryFolderBuilder {
    /// Adds an item child.
    #[must_use]
    pub fn item(mut self, item: MemoryItem) -> Self {
        self.children.push(Arc::new(item));
        self
    }

    /// Adds a subfolder child.
    #[must_use]
    pub fn folder(mut self, folder: MemoryFolder) -> Self {
        self.children.push(Arc::new(folder));
        self
    }

    /// Adds an arbitrary node child.
    #[must_use]
    pub fn node(mut self, node: NodeRef) -> Self {
        self.children.push(node);
        self
    }

    /// Adds capability flags to the folder.
    #[must_use]
    pub fn attributes(mut self, extra: CapabilityFlags) -> Self {
        self.attributes |= extra;
        self
    }

    /// Adds a detail column definition for the default view.
    #[must_use]
    pub fn column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    /// Sets a detail value on the folder itself.
    #[must_use]
    pub fn detail(mut self, column: u32, value: impl Into<String>) -> Self {
        self.details.insert(column, value.into());
        self
    }

    /// Marks the folder as fully provider-rendered.
    #[must_use]
    pub fn custom_view(mut self) -> Self {
        self.custom_view = true;
        self
    }

    /// Builds the folder.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the folder name is invalid or if two
    /// children share a `ForParsing` name (case-insensitively).
    pub fn build(self) -> Result<MemoryFolder> {
        validate_name(&self.name)?;
        let id = derive_identifier(FOLDER_TAG, &self.name)?;

        let mut seen: Vec<String> = Vec::with_capacity(self.children.len());
        for child in &self.children {
            let key = child.display_name(DisplayNameForm::ForParsing).to_lowercase();
            if seen.contains(&key) {
                return Err(Error::Validation {
                    field: "children".to_string(),
                    message: format!("duplicate child name '{key}' in folder '{}'", self.name),
                });
            }
            seen.push(key);
        }

        let has_subfolder = self
            .children
            .iter()
            .any(|child| child.attributes().is_folder());

        let mut attributes =
            self.attributes | CapabilityFlags::FOLDER | CapabilityFlags::BROWSABLE;
        if has_subfolder {
            attributes |= CapabilityFlags::HAS_SUBFOLDER;
        }

        Ok(MemoryFolder {
            id,
            name: self.name,
            attributes,
            children: self.children,
            columns: self.columns,
            custom_view: self.custom_view,
            details: self.details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_root() -> MemoryFolder {
        MemoryFolder::builder("Root")
            .folder(MemoryFolder::builder("Alpha").build().unwrap())
            .item(MemoryItem::new("beta.txt").unwrap())
            .item(MemoryItem::new("gamma.txt").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_item_rejects_empty_name() {
        assert!(MemoryItem::new("").is_err());
    }

    #[test]
    fn test_item_rejects_separator_in_name() {
        assert!(MemoryItem::new("a\\b").is_err());
    }

    #[test]
    fn test_item_identifier_is_stable() {
        let a = MemoryItem::new("notes.txt").unwrap();
        let b = MemoryItem::new("notes.txt").unwrap();
        assert_eq!(a.identifier(), b.identifier());
    }

    #[test]
    fn test_item_and_folder_identifiers_differ() {
        let item = MemoryItem::new("x").unwrap();
        let folder = MemoryFolder::builder("x").build().unwrap();
        assert_ne!(item.identifier(), folder.identifier());
    }

    #[test]
    fn test_item_strips_folder_flags() {
        let item = MemoryItem::new("x")
            .unwrap()
            .with_attributes(CapabilityFlags::FOLDER | CapabilityFlags::CAN_RENAME);
        assert!(!item.attributes().is_folder());
        assert!(item.attributes().contains(CapabilityFlags::CAN_RENAME));
    }

    #[test]
    fn test_editable_name_falls_back_to_normal() {
        // Rename support is reported through CAN_RENAME, not by varying the
        // name forms: Editable always yields the Normal name.
        let plain = MemoryItem::new("notes.txt").unwrap();
        assert_eq!(
            plain.display_name(DisplayNameForm::Editable),
            plain.display_name(DisplayNameForm::Normal)
        );
        assert!(!plain.attributes().contains(CapabilityFlags::CAN_RENAME));

        let renamable = MemoryItem::new("draft.txt")
            .unwrap()
            .with_attributes(CapabilityFlags::CAN_RENAME);
        assert_eq!(renamable.display_name(DisplayNameForm::Editable), "draft.txt");
        assert!(renamable.attributes().contains(CapabilityFlags::CAN_RENAME));
    }

    #[test]
    fn test_folder_attributes() {
        let root = sample_root();
        assert!(root.attributes().is_folder());
        assert!(root.attributes().contains(CapabilityFlags::HAS_SUBFOLDER));

        let empty = MemoryFolder::builder("Empty").build().unwrap();
        assert!(empty.attributes().is_folder());
        assert!(!empty.attributes().contains(CapabilityFlags::HAS_SUBFOLDER));
    }

    #[test]
    fn test_enumeration_filters() {
        let root = sample_root();
        assert_eq!(root.children(EnumFlags::ALL).count(), 3);
        assert_eq!(root.children(EnumFlags::FOLDERS).count(), 1);
        assert_eq!(root.children(EnumFlags::ITEMS).count(), 2);

        for child in root.children(EnumFlags::FOLDERS) {
            assert!(child.attributes().is_folder());
        }
        for child in root.children(EnumFlags::ITEMS) {
            assert!(!child.attributes().is_folder());
        }
    }

    #[test]
    fn test_enumeration_is_restartable_and_stable() {
        let root = sample_root();
        let first: Vec<String> = root
            .children(EnumFlags::ALL)
            .map(|c| c.display_name(DisplayNameForm::Normal))
            .collect();
        let second: Vec<String> = root
            .children(EnumFlags::ALL)
            .map(|c| c.display_name(DisplayNameForm::Normal))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_child_names_rejected() {
        let result = MemoryFolder::builder("Root")
            .item(MemoryItem::new("a.txt").unwrap())
            .item(MemoryItem::new("A.TXT").unwrap())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_view_descriptor() {
        let folder = MemoryFolder::builder("F")
            .column(ColumnDefinition::new("Name", 32))
            .build()
            .unwrap();
        match folder.view() {
            FolderViewDescriptor::Default { columns } => {
                assert_eq!(columns.len(), 1);
                assert_eq!(columns[0].title, "Name");
            }
            FolderViewDescriptor::Custom => panic!("expected default view"),
        }

        let custom = MemoryFolder::builder("C").custom_view().build().unwrap();
        assert_eq!(custom.view(), FolderViewDescriptor::Custom);
    }

    #[test]
    fn test_detail_values() {
        let item = MemoryItem::new("a").unwrap().with_detail(0, "value");
        assert_eq!(item.detail(0).unwrap(), "value");
        assert!(item.detail(1).unwrap_err().is_unsupported());
    }
}
