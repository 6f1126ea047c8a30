//! Hierarchical virtual namespace engine.
//!
//! `junction` lets a provider expose an arbitrary tree of folders and items
//! to a browsing host. Every node is addressed by an opaque byte
//! [`Identifier`]; a path through the tree is an [`IdList`] with a compact
//! binary wire form. The engine supplies the operations hosts need:
//! display-name parsing, binding identifier lists to live nodes, ordered
//! enumeration, a strict total-order comparison protocol, attribute and
//! view resolution, and a persistent registry of installed extension roots.
//!
//! Providers implement [`NamespaceNode`] (and [`NamespaceFolder`] for
//! containers), or use the ready-made in-memory tree in [`memory`].
//!
//! # Examples
//!
//! ```
//! use junction::{
//!     DisplayNameForm, EnumFlags, ExtensionInstance, IdList, Identifier,
//!     MemoryFolder, MemoryItem, NamespaceNode,
//! };
//!
//! let root = MemoryFolder::builder("Gadgets")
//!     .folder(MemoryFolder::builder("Widgets").build().unwrap())
//!     .item(MemoryItem::new("manual.txt").unwrap())
//!     .build()
//!     .unwrap()
//!     .into_ref();
//!
//! let instance = ExtensionInstance::new(root);
//! instance
//!     .initialize(IdList::single(Identifier::new(b"computer".to_vec()).unwrap()))
//!     .unwrap();
//!
//! let widgets = instance.parse_display_name("Widgets").unwrap().id_list;
//! let node = instance.bind_to_object(&widgets).unwrap();
//! assert_eq!(node.display_name(DisplayNameForm::Normal), "Widgets");
//! assert_eq!(instance.enumerate(&IdList::new(), EnumFlags::ALL).unwrap().len(), 2);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod attributes;
pub mod compare;
pub mod config;
pub mod error;
pub mod extension;
pub mod idlist;
pub mod logging;
pub mod memory;
pub mod node;
pub mod registration;
pub mod tree;

pub use attributes::CapabilityFlags;
pub use compare::{compare, SortKey};
pub use config::Config;
pub use error::{Error, Result};
pub use extension::ExtensionInstance;
pub use idlist::{IdList, Identifier, InvalidIdentifierError};
pub use logging::{init_logger, LogLevel, Logger};
pub use memory::{MemoryFolder, MemoryFolderBuilder, MemoryItem};
pub use node::{
    ColumnDefinition, DisplayNameForm, EnumFlags, FolderViewDescriptor, NamespaceFolder,
    NamespaceNode, NodeRef,
};
pub use registration::{
    ExtensionIdentity, MountEntry, MountPoint, MountRegion, RegistrationDescriptor,
    RegistrationScope, RegistrationStore,
};
pub use tree::{bind_to_object, get_child_item, parse_display_name, ParsedName, PATH_SEPARATOR};
