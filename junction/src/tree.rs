//! Tree resolution: display-name parsing, binding, and child lookup.
//!
//! Resolution walks live enumerations rather than any cached index, so the
//! results always reflect the provider's current children. All functions
//! are synchronous and never mutate the namespace.

use crate::error::{Error, Result};
use crate::idlist::{IdList, Identifier};
use crate::node::{DisplayNameForm, EnumFlags, NamespaceFolder, NamespaceNode, NodeRef};

/// The namespace path separator used by display-name parsing.
pub const PATH_SEPARATOR: char = '\\';

/// Result of parsing a display name against a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Relative identifier list for the deepest resolved segment.
    pub id_list: IdList,
    /// Number of characters of the input that were consumed.
    pub chars_consumed: usize,
}

/// Performs a single-level child lookup by identifier.
///
/// A miss is an expected outcome of existence checks, so this returns
/// `None` rather than an error. `flags` restricts the search to folders,
/// items, or both.
///
/// # Examples
///
/// ```
/// use junction::{tree, EnumFlags, MemoryFolder, MemoryItem, NamespaceNode};
///
/// let root = MemoryFolder::builder("Root")
///     .item(MemoryItem::new("beta.txt").unwrap())
///     .build()
///     .unwrap();
///
/// let id = MemoryItem::new("beta.txt").unwrap().identifier().clone();
/// assert!(tree::get_child_item(&root, &id, EnumFlags::ALL).is_some());
/// assert!(tree::get_child_item(&root, &id, EnumFlags::FOLDERS).is_none());
/// ```
#[must_use]
pub fn get_child_item(
    folder: &dyn NamespaceFolder,
    id: &Identifier,
    flags: EnumFlags,
) -> Option<NodeRef> {
    folder.children(flags).find(|child| child.identifier() == id)
}

fn find_child_by_name(folder: &dyn NamespaceFolder, segment: &str) -> Option<NodeRef> {
    let needle = segment.to_lowercase();
    folder
        .children(EnumFlags::ALL)
        .find(|child| child.display_name(DisplayNameForm::ForParsing).to_lowercase() == needle)
}

/// Translates a display name into a relative identifier list.
///
/// The text is split on [`PATH_SEPARATOR`]; each segment is matched
/// case-insensitively against the current folder's children by their
/// `ForParsing` name, descending while segments resolve to folders.
///
/// Partial resolution of later segments is permitted: the walk stops at the
/// first unresolvable segment and `chars_consumed` reports how far it got.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the first segment cannot be resolved.
///
/// # Examples
///
/// ```
/// use junction::{tree, MemoryFolder, MemoryItem};
///
/// let root = MemoryFolder::builder("Root")
///     .folder(MemoryFolder::builder("Alpha").build().unwrap())
///     .build()
///     .unwrap();
///
/// let parsed = tree::parse_display_name(&root, "Alpha").unwrap();
/// assert_eq!(parsed.id_list.len(), 1);
/// assert_eq!(parsed.chars_consumed, 5);
/// ```
pub fn parse_display_name(folder: &dyn NamespaceFolder, text: &str) -> Result<ParsedName> {
    let mut id_list = IdList::new();
    let mut chars_consumed = 0usize;
    let mut current: Option<NodeRef> = None;

    for (index, segment) in text.split(PATH_SEPARATOR).enumerate() {
        let child = match &current {
            None => find_child_by_name(folder, segment),
            Some(node) => node
                .as_folder()
                .and_then(|f| find_child_by_name(f, segment)),
        };

        match child {
            Some(child) => {
                id_list.push(child.identifier().clone());
                let segment_chars = segment.chars().count();
                chars_consumed += if index == 0 {
                    segment_chars
                } else {
                    // One char for the separator preceding this segment.
                    1 + segment_chars
                };
                current = Some(child);
            }
            None if index == 0 => {
                return Err(Error::NotFound {
                    resource: segment.to_string(),
                });
            }
            None => break,
        }
    }

    log::debug!("parsed '{text}' to {id_list} ({chars_consumed} chars)");
    Ok(ParsedName {
        id_list,
        chars_consumed,
    })
}

/// Binds a relative identifier list to a live node.
///
/// Walks from `folder`, consuming one identifier per hop and dereferencing
/// through each folder's child lookup.
///
/// # Errors
///
/// - [`Error::InvalidIdentifierList`] for the empty list; binding "this
///   folder itself" is handled by the caller that owns the folder.
/// - [`Error::NotFound`] if any hop has no matching child.
/// - [`Error::NotAFolder`] if a non-terminal hop resolves to an item.
///
/// # Examples
///
/// ```
/// use junction::{tree, IdList, MemoryFolder, NamespaceNode};
///
/// let alpha = MemoryFolder::builder("Alpha").build().unwrap();
/// let alpha_id = alpha.identifier().clone();
/// let root = MemoryFolder::builder("Root").folder(alpha).build().unwrap();
///
/// let node = tree::bind_to_object(&root, &IdList::single(alpha_id)).unwrap();
/// assert!(node.attributes().is_folder());
/// ```
pub fn bind_to_object(folder: &dyn NamespaceFolder, relative: &IdList) -> Result<NodeRef> {
    let mut ids = relative.iter();
    let first = ids.next().ok_or_else(|| Error::InvalidIdentifierList {
        reason: "cannot bind an empty relative identifier list".to_string(),
    })?;

    let mut node = get_child_item(folder, first, EnumFlags::ALL).ok_or_else(|| Error::NotFound {
        resource: first.to_string(),
    })?;

    for id in ids {
        let next = {
            let subfolder = node.as_folder().ok_or_else(|| Error::NotAFolder {
                name: node.display_name(DisplayNameForm::Normal),
            })?;
            get_child_item(subfolder, id, EnumFlags::ALL).ok_or_else(|| Error::NotFound {
                resource: id.to_string(),
            })?
        };
        node = next;
    }

    Ok(node)
}
