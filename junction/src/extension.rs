//! One activation of the namespace engine.
//!
//! An [`ExtensionInstance`] pairs a provider's root folder with the
//! absolute identifier list the host assigned to it, and exposes the tree
//! operations the host calls against that root. The root location may be
//! re-assigned until the first tree operation runs; after that it is pinned
//! for the lifetime of the instance. Every tree operation before
//! initialization fails with [`Error::NotInitialized`].
//!
//! # Examples
//!
//! ```
//! use junction::{ExtensionInstance, IdList, Identifier, MemoryFolder, MemoryItem};
//!
//! let root = MemoryFolder::builder("My Data")
//!     .item(MemoryItem::new("readme.txt").unwrap())
//!     .build()
//!     .unwrap()
//!     .into_ref();
//!
//! let instance = ExtensionInstance::new(root);
//! let location = IdList::single(Identifier::new(b"desktop".to_vec()).unwrap());
//! instance.initialize(location).unwrap();
//!
//! let parsed = instance.parse_display_name("readme.txt").unwrap();
//! assert_eq!(parsed.id_list.len(), 1);
//! ```

use std::cmp::Ordering;
use std::sync::atomic::{self, AtomicBool};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use crate::attributes::CapabilityFlags;
use crate::compare::{compare, SortKey};
use crate::error::{Error, Result};
use crate::idlist::IdList;
use crate::node::{
    DisplayNameForm, EnumFlags, FolderViewDescriptor, NamespaceFolder, NamespaceNode, NodeRef,
};
use crate::tree::{bind_to_object, get_child_item, parse_display_name, ParsedName};

/// A live activation of the engine for one provider tree.
///
/// The instance is safe for unsynchronized concurrent reads: the root
/// location is write-locked only while it can still change, and the tree
/// operations hold no shared cursor state.
pub struct ExtensionInstance {
    root_folder: Arc<dyn NamespaceFolder>,
    root_node: NodeRef,
    root_location: RwLock<Option<IdList>>,
    used: AtomicBool,
}

impl ExtensionInstance {
    /// Creates an uninitialized instance over the given provider root.
    pub fn new<F>(root: Arc<F>) -> Self
    where
        F: NamespaceFolder + 'static,
    {
        Self {
            root_folder: root.clone(),
            root_node: root,
            root_location: RwLock::new(None),
            used: AtomicBool::new(false),
        }
    }

    /// Assigns the absolute identifier list of this instance's root.
    ///
    /// Re-assignment is permitted until the first tree operation runs;
    /// after that the location is pinned.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidIdentifierList`] if the list is empty; the root of
    ///   an extension always sits somewhere below the global root.
    /// - [`Error::AlreadyInitialized`] once any tree operation has used the
    ///   assigned location.
    pub fn initialize(&self, location: IdList) -> Result<()> {
        if location.is_empty() {
            return Err(Error::InvalidIdentifierList {
                reason: "root location must have at least one segment".to_string(),
            });
        }
        let mut guard = self
            .root_location
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if guard.is_some() && self.used.load(atomic::Ordering::Acquire) {
            return Err(Error::AlreadyInitialized);
        }
        *guard = Some(location);
        Ok(())
    }

    /// The absolute identifier list of this instance's root.
    ///
    /// Returns `None` when initialization has not occurred; that is a
    /// normal indication, not an error. Reading the location does not count
    /// as use, so re-initialization stays permitted afterwards.
    #[must_use]
    pub fn root_location(&self) -> Option<IdList> {
        self.location_guard().clone()
    }

    fn location_guard(&self) -> RwLockReadGuard<'_, Option<IdList>> {
        self.root_location
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_initialized(&self) -> Result<IdList> {
        let location = self
            .location_guard()
            .as_ref()
            .ok_or(Error::NotInitialized)?
            .clone();
        // The first operation against the tree pins the root location.
        self.used.store(true, atomic::Ordering::Release);
        Ok(location)
    }

    /// Translates a relative identifier list into an absolute one.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotInitialized`] before initialization.
    pub fn absolute_location(&self, relative: &IdList) -> Result<IdList> {
        let root = self.ensure_initialized()?;
        Ok(root.concat(relative))
    }

    /// Resolves a display name against this instance's root folder.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotInitialized`] before initialization, or
    /// [`Error::NotFound`] if the first segment does not resolve.
    pub fn parse_display_name(&self, text: &str) -> Result<ParsedName> {
        self.ensure_initialized()?;
        parse_display_name(self.root_folder.as_ref(), text)
    }

    /// Binds a relative identifier list to a live node.
    ///
    /// The empty list binds to the root folder itself.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotInitialized`] before initialization,
    /// [`Error::NotFound`] on a missing hop, or [`Error::NotAFolder`] when
    /// descending through an item.
    pub fn bind_to_object(&self, relative: &IdList) -> Result<NodeRef> {
        self.ensure_initialized()?;
        if relative.is_empty() {
            return Ok(self.root_node.clone());
        }
        bind_to_object(self.root_folder.as_ref(), relative)
    }

    /// Enumerates the children of the folder a relative list addresses.
    ///
    /// Each call takes a fresh snapshot of the provider's enumeration, so
    /// concurrent callers never share cursor state.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotInitialized`] before initialization, or
    /// [`Error::NotAFolder`] if the list addresses an item.
    pub fn enumerate(&self, relative: &IdList, flags: EnumFlags) -> Result<Vec<NodeRef>> {
        self.ensure_initialized()?;
        if relative.is_empty() {
            return Ok(self.root_folder.children(flags).collect());
        }
        let node = bind_to_object(self.root_folder.as_ref(), relative)?;
        let folder = node.as_folder().ok_or_else(|| Error::NotAFolder {
            name: node.display_name(DisplayNameForm::Normal),
        })?;
        Ok(folder.children(flags).collect())
    }

    /// Performs a single-level child lookup by the last segment of
    /// `id_list`, after binding through the leading segments.
    ///
    /// A lookup miss returns `Ok(None)`: misses are expected outcomes of
    /// existence checks, not failures.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotInitialized`] before initialization,
    /// [`Error::InvalidIdentifierList`] for the empty list, or a bind error
    /// for the leading segments.
    pub fn get_child_item(&self, id_list: &IdList, flags: EnumFlags) -> Result<Option<NodeRef>> {
        self.ensure_initialized()?;
        let (Some(parent), Some(last)) = (id_list.parent(), id_list.last()) else {
            return Err(Error::InvalidIdentifierList {
                reason: "child lookup requires at least one segment".to_string(),
            });
        };

        if parent.is_empty() {
            return Ok(get_child_item(self.root_folder.as_ref(), last, flags));
        }
        let node = bind_to_object(self.root_folder.as_ref(), &parent)?;
        let folder = node.as_folder().ok_or_else(|| Error::NotAFolder {
            name: node.display_name(DisplayNameForm::Normal),
        })?;
        Ok(get_child_item(folder, last, flags))
    }

    /// Compares two relative identifier lists for sorting.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotInitialized`] before initialization.
    pub fn compare(&self, a: &IdList, b: &IdList, key: SortKey) -> Result<Ordering> {
        self.ensure_initialized()?;
        Ok(compare(self.root_folder.as_ref(), a, b, key))
    }

    /// The display name of the node a relative list addresses.
    ///
    /// The empty list names the root folder itself.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotInitialized`] before initialization or with a
    /// bind error.
    pub fn display_name_of(&self, relative: &IdList, form: DisplayNameForm) -> Result<String> {
        let node = self.bind_to_object(relative)?;
        Ok(node.display_name(form))
    }

    /// The capability flags of the node a relative list addresses.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotInitialized`] before initialization or with a
    /// bind error.
    pub fn attributes_of(&self, relative: &IdList) -> Result<CapabilityFlags> {
        let node = self.bind_to_object(relative)?;
        Ok(node.attributes())
    }

    /// The view descriptor of the folder a relative list addresses.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotInitialized`] before initialization, with a
    /// bind error, or with [`Error::NotAFolder`] for an item.
    pub fn view_of(&self, relative: &IdList) -> Result<FolderViewDescriptor> {
        let node = self.bind_to_object(relative)?;
        let folder = node.as_folder().ok_or_else(|| Error::NotAFolder {
            name: node.display_name(DisplayNameForm::Normal),
        })?;
        Ok(folder.view())
    }
}

impl std::fmt::Debug for ExtensionInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionInstance")
            .field("root", &self.root_node.display_name(DisplayNameForm::Normal))
            .field("initialized", &self.location_guard().is_some())
            .finish()
    }
}
