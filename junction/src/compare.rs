//! Total-order comparison between identifier lists.
//!
//! Host sort algorithms assume a consistent total order, so comparison must
//! be reflexive, antisymmetric, and transitive. Each identifier is mapped
//! to a self-contained sort rank (resolution class, sort-key value, display
//! name, raw bytes) and ranks are compared lexicographically; because the
//! rank is a pure function of the identifier, the resulting order is total
//! by construction, and the raw-bytes component guarantees two distinct
//! identifiers never compare equal.

use std::cmp::Ordering;

use crate::idlist::{IdList, Identifier};
use crate::node::{DisplayNameForm, EnumFlags, NamespaceFolder, NamespaceNode, NodeRef};
use crate::tree::get_child_item;

/// The sorting rule applied when comparing two identifier lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Case-insensitive display-name order. The default.
    #[default]
    DisplayName,
    /// Order by the value of a detail column. Nodes without a value for the
    /// column sort after nodes that have one, ordered among themselves by
    /// display name.
    Column(u32),
}

/// Compares two identifier lists belonging to the same folder level.
///
/// Corresponding identifiers are compared pairwise against the live
/// children: first by the `key`'s rule, then by display name, then by raw
/// identifier bytes, so ties between distinct identifiers are impossible.
/// When one list is a prefix of the other, the shorter list orders first.
/// Identifiers that resolve to no child of the level under comparison
/// (foreign identifiers from another provider) carry no name to sort by;
/// they order after resolved identifiers and by raw bytes among themselves.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use junction::{compare, IdList, MemoryFolder, MemoryItem, NamespaceNode, SortKey};
///
/// let root = MemoryFolder::builder("Root")
///     .item(MemoryItem::new("apple").unwrap())
///     .item(MemoryItem::new("Banana").unwrap())
///     .build()
///     .unwrap();
///
/// let apple = IdList::single(MemoryItem::new("apple").unwrap().identifier().clone());
/// let banana = IdList::single(MemoryItem::new("Banana").unwrap().identifier().clone());
///
/// assert_eq!(compare(&root, &apple, &banana, SortKey::DisplayName), Ordering::Less);
/// assert_eq!(compare(&root, &apple, &apple, SortKey::DisplayName), Ordering::Equal);
/// ```
#[must_use]
pub fn compare(folder: &dyn NamespaceFolder, a: &IdList, b: &IdList, key: SortKey) -> Ordering {
    let mut left = a.iter();
    let mut right = b.iter();
    let mut level: Option<NodeRef> = None;

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let next_level = {
                    let current: Option<&dyn NamespaceFolder> = match &level {
                        None => Some(folder),
                        Some(node) => node.as_folder(),
                    };
                    let Some(current) = current else {
                        // The previous hop was an item; nothing below it can
                        // be resolved, so the remainder orders by raw bytes.
                        return raw_tail_cmp(x, left, y, right);
                    };

                    let ord = compare_ids(current, x, y, key);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                    // Equal means byte-equal, so both sides descend through
                    // the same child.
                    get_child_item(current, x, EnumFlags::ALL)
                };
                if next_level.is_none() {
                    return raw_tail_cmp(x, left, y, right);
                }
                level = next_level;
            }
        }
    }
}

fn raw_tail_cmp<'a>(
    x: &Identifier,
    left: std::slice::Iter<'a, Identifier>,
    y: &Identifier,
    right: std::slice::Iter<'a, Identifier>,
) -> Ordering {
    let lhs: IdList = std::iter::once(x.clone()).chain(left.cloned()).collect();
    let rhs: IdList = std::iter::once(y.clone()).chain(right.cloned()).collect();
    lhs.raw_cmp(&rhs)
}

/// Sort rank of a single identifier within one folder level.
///
/// Derived `Ord` compares fields in declaration order, which encodes the
/// whole rule: resolved before foreign, column-bearing before column-less,
/// then key value, then name, then bytes.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct SortRank {
    /// 0 when the identifier resolves to a child, 1 when foreign.
    class: u8,
    /// 0 when the node carries the requested sort column, 1 otherwise.
    subclass: u8,
    /// The sort-key value, lowercased.
    primary: String,
    /// The normal display name, lowercased.
    name: String,
    /// Raw identifier bytes, the ultimate tie-break.
    bytes: Vec<u8>,
}

fn sort_rank(folder: &dyn NamespaceFolder, id: &Identifier, key: SortKey) -> SortRank {
    match get_child_item(folder, id, EnumFlags::ALL) {
        Some(node) => {
            let name = node.display_name(DisplayNameForm::Normal).to_lowercase();
            let (subclass, primary) = match key {
                SortKey::DisplayName => (0, name.clone()),
                SortKey::Column(column) => match node.detail(column) {
                    Ok(value) => (0, value.to_lowercase()),
                    Err(_) => (1, name.clone()),
                },
            };
            SortRank {
                class: 0,
                subclass,
                primary,
                name,
                bytes: id.as_bytes().to_vec(),
            }
        }
        None => SortRank {
            class: 1,
            subclass: 0,
            primary: String::new(),
            name: String::new(),
            bytes: id.as_bytes().to_vec(),
        },
    }
}

fn compare_ids(
    folder: &dyn NamespaceFolder,
    x: &Identifier,
    y: &Identifier,
    key: SortKey,
) -> Ordering {
    if x == y {
        return Ordering::Equal;
    }
    sort_rank(folder, x, key).cmp(&sort_rank(folder, y, key))
}

#[cfg(all(test, feature = "property-tests"))]
mod proptests;
