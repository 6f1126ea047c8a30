//! Identifier and identifier list types with a stable wire codec.
//!
//! This module provides the opaque per-node [`Identifier`] token and the
//! root-to-leaf [`IdList`] sequence used to address nodes in the virtual
//! namespace. Lists have a stable wire form (length-prefixed segments with
//! a zero-length sentinel) so they survive process restarts and round-trip
//! through host-persisted state.
//!
//! # Wire Form
//!
//! Each segment is a `u16` little-endian length prefix followed by that many
//! bytes. The list is terminated by a zero-length sentinel. An empty list is
//! just the sentinel.
//!
//! # Examples
//!
//! ```
//! use junction::{IdList, Identifier};
//!
//! let id = Identifier::new(b"alpha".to_vec()).unwrap();
//! let list = IdList::single(id);
//!
//! let bytes = list.encode();
//! let decoded = IdList::decode(&bytes).unwrap();
//! assert_eq!(decoded, list);
//! ```

use std::fmt;

use crate::error::{Error, Result};

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

/// An opaque, node-local, variable-length binary token.
///
/// An identifier uniquely distinguishes a child among its siblings at a
/// point in time. It is immutable once issued, and equality is byte-exact.
/// Identifiers produced by other namespace providers are treated as opaque
/// byte sequences: unequal to ours but still orderable.
///
/// # Examples
///
/// ```
/// use junction::Identifier;
///
/// let id = Identifier::new(b"alpha".to_vec()).unwrap();
/// assert_eq!(id.as_bytes(), b"alpha");
///
/// // Empty identifiers are invalid
/// assert!(Identifier::new(Vec::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Vec<u8>);

impl Identifier {
    /// The maximum encodable identifier length in bytes.
    ///
    /// The wire form uses a `u16` length prefix, which bounds segment size.
    pub const MAX_LEN: usize = u16::MAX as usize;

    /// Creates a new identifier from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is empty or exceeds [`Self::MAX_LEN`].
    ///
    /// # Examples
    ///
    /// ```
    /// use junction::Identifier;
    ///
    /// let id = Identifier::new(vec![0x01, 0x02]).unwrap();
    /// assert_eq!(id.len(), 2);
    /// ```
    pub fn new(bytes: Vec<u8>) -> std::result::Result<Self, InvalidIdentifierError> {
        if bytes.is_empty() {
            return Err(InvalidIdentifierError {
                reason: "identifier must be non-empty".to_string(),
            });
        }
        if bytes.len() > Self::MAX_LEN {
            return Err(InvalidIdentifierError {
                reason: format!(
                    "identifier length {} exceeds maximum of {}",
                    bytes.len(),
                    Self::MAX_LEN
                ),
            });
        }
        Ok(Self(bytes))
    }

    /// Returns the raw bytes of this identifier.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of this identifier in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the identifier is empty.
    ///
    /// Always `false` for identifiers constructed through [`Identifier::new`];
    /// provided for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error type for invalid identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidIdentifierError {
    /// The reason the identifier is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidIdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid identifier: {}", self.reason)
    }
}

impl std::error::Error for InvalidIdentifierError {}

/// An ordered sequence of identifiers, root to leaf.
///
/// A list is *absolute* when rooted at the namespace's global root and
/// *relative* when rooted at some folder; the distinction is a usage
/// convention, not a type-level one. The empty list denotes "this folder
/// itself".
///
/// Concatenating a folder's absolute list with a relative list yields a
/// valid absolute list for the descendant.
///
/// # Examples
///
/// ```
/// use junction::{IdList, Identifier};
///
/// let a = Identifier::new(b"a".to_vec()).unwrap();
/// let b = Identifier::new(b"b".to_vec()).unwrap();
///
/// let parent = IdList::single(a);
/// let child = parent.concat(&IdList::single(b));
///
/// assert_eq!(child.len(), 2);
/// assert!(parent.is_prefix_of(&child));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IdList(Vec<Identifier>);

impl IdList {
    /// Creates an empty identifier list, denoting "this folder itself".
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates a list from a vector of identifiers.
    #[must_use]
    pub fn from_ids(ids: Vec<Identifier>) -> Self {
        Self(ids)
    }

    /// Creates a single-segment list.
    #[must_use]
    pub fn single(id: Identifier) -> Self {
        Self(vec![id])
    }

    /// Returns the number of segments in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the list has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends an identifier to the end of the list.
    pub fn push(&mut self, id: Identifier) {
        self.0.push(id);
    }

    /// Returns the first (root-most) identifier, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Identifier> {
        self.0.first()
    }

    /// Returns the last (leaf-most) identifier, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Identifier> {
        self.0.last()
    }

    /// Returns an iterator over the segments, root to leaf.
    pub fn iter(&self) -> std::slice::Iter<'_, Identifier> {
        self.0.iter()
    }

    /// Splits off the first identifier, returning it and the remainder.
    ///
    /// Returns `None` for the empty list.
    #[must_use]
    pub fn split_first(&self) -> Option<(&Identifier, IdList)> {
        let (first, rest) = self.0.split_first()?;
        Some((first, Self(rest.to_vec())))
    }

    /// Returns the list without its last segment, if any.
    ///
    /// For a relative list this addresses the parent folder of the node the
    /// list addresses.
    #[must_use]
    pub fn parent(&self) -> Option<IdList> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    /// Concatenates this list with another, yielding a new list.
    ///
    /// # Examples
    ///
    /// ```
    /// use junction::{IdList, Identifier};
    ///
    /// let a = IdList::single(Identifier::new(b"a".to_vec()).unwrap());
    /// let b = IdList::single(Identifier::new(b"b".to_vec()).unwrap());
    /// let joined = a.concat(&b);
    /// assert_eq!(joined.len(), 2);
    /// ```
    #[must_use]
    pub fn concat(&self, other: &IdList) -> IdList {
        let mut ids = self.0.clone();
        ids.extend(other.0.iter().cloned());
        Self(ids)
    }

    /// Returns `true` if this list is a prefix of `other`.
    ///
    /// The empty list is a prefix of every list, and every list is a prefix
    /// of itself.
    #[must_use]
    pub fn is_prefix_of(&self, other: &IdList) -> bool {
        other.0.len() >= self.0.len() && other.0[..self.0.len()] == self.0[..]
    }

    /// Returns `true` if this is a single-segment list matching `id`.
    ///
    /// # Examples
    ///
    /// ```
    /// use junction::{IdList, Identifier};
    ///
    /// let id = Identifier::new(b"a".to_vec()).unwrap();
    /// let list = IdList::single(id.clone());
    /// assert!(list.matches(&id));
    /// assert!(!IdList::new().matches(&id));
    /// ```
    #[must_use]
    pub fn matches(&self, id: &Identifier) -> bool {
        self.0.len() == 1 && &self.0[0] == id
    }

    /// Compares two lists by raw segment bytes.
    ///
    /// Used as the comparison of last resort: it imposes a total order on
    /// arbitrary lists, including ones holding foreign identifiers.
    #[must_use]
    pub fn raw_cmp(&self, other: &IdList) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }

    /// Encodes the list into its wire form.
    ///
    /// # Examples
    ///
    /// ```
    /// use junction::IdList;
    ///
    /// // An empty list is just the zero-length sentinel.
    /// assert_eq!(IdList::new().encode(), vec![0, 0]);
    /// ```
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let payload: usize = self.0.iter().map(|id| 2 + id.len()).sum();
        let mut bytes = Vec::with_capacity(payload + 2);
        for id in &self.0 {
            // Length bounded by Identifier::MAX_LEN, so the cast is exact.
            #[allow(clippy::cast_possible_truncation)]
            let len = id.len() as u16;
            bytes.extend_from_slice(&len.to_le_bytes());
            bytes.extend_from_slice(id.as_bytes());
        }
        bytes.extend_from_slice(&0u16.to_le_bytes());
        bytes
    }

    /// Decodes a list from its wire form.
    ///
    /// Tolerates opaque segment contents produced by other providers; only
    /// the list structure itself is validated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedIdentifier`] on a truncated length prefix,
    /// a truncated segment, a missing terminator, or trailing bytes after
    /// the terminator.
    ///
    /// # Examples
    ///
    /// ```
    /// use junction::IdList;
    ///
    /// let decoded = IdList::decode(&[1, 0, 0xAB, 0, 0]).unwrap();
    /// assert_eq!(decoded.len(), 1);
    ///
    /// // Truncated input fails
    /// assert!(IdList::decode(&[1, 0]).is_err());
    /// ```
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut ids = Vec::new();
        let mut offset = 0usize;
        loop {
            let Some(prefix) = bytes.get(offset..offset + 2) else {
                return Err(Error::MalformedIdentifier {
                    offset,
                    reason: "missing list terminator".to_string(),
                });
            };
            let len = usize::from(u16::from_le_bytes([prefix[0], prefix[1]]));
            offset += 2;
            if len == 0 {
                if offset != bytes.len() {
                    return Err(Error::MalformedIdentifier {
                        offset,
                        reason: format!("{} trailing bytes after terminator", bytes.len() - offset),
                    });
                }
                return Ok(Self(ids));
            }
            let Some(segment) = bytes.get(offset..offset + len) else {
                return Err(Error::MalformedIdentifier {
                    offset,
                    reason: format!("segment truncated: expected {len} bytes"),
                });
            };
            // Segments are non-empty by construction here (len > 0), so this
            // cannot fail.
            let id = Identifier::new(segment.to_vec()).map_err(|e| Error::MalformedIdentifier {
                offset,
                reason: e.reason,
            })?;
            ids.push(id);
            offset += len;
        }
    }
}

impl fmt::Display for IdList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

impl FromIterator<Identifier> for IdList {
    fn from_iter<I: IntoIterator<Item = Identifier>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a IdList {
    type Item = &'a Identifier;
    type IntoIter = std::slice::Iter<'a, Identifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(bytes: &[u8]) -> Identifier {
        Identifier::new(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_identifier_rejects_empty() {
        let err = Identifier::new(Vec::new()).unwrap_err();
        assert!(err.reason.contains("non-empty"));
    }

    #[test]
    fn test_identifier_rejects_oversized() {
        let err = Identifier::new(vec![0u8; Identifier::MAX_LEN + 1]).unwrap_err();
        assert!(err.reason.contains("exceeds maximum"));
    }

    #[test]
    fn test_identifier_accessors() {
        let ident = id(b"alpha");
        assert_eq!(ident.as_bytes(), b"alpha");
        assert_eq!(ident.len(), 5);
        assert!(!ident.is_empty());
    }

    #[test]
    fn test_identifier_display_is_hex() {
        assert_eq!(format!("{}", id(&[0x01, 0xAB])), "01ab");
    }

    #[test]
    fn test_identifier_equality_is_byte_exact() {
        assert_eq!(id(b"a"), id(b"a"));
        assert_ne!(id(b"a"), id(b"A"));
    }

    #[test]
    fn test_empty_list_round_trip() {
        let list = IdList::new();
        assert!(list.is_empty());
        let bytes = list.encode();
        assert_eq!(bytes, vec![0, 0]);
        assert_eq!(IdList::decode(&bytes).unwrap(), list);
    }

    #[test]
    fn test_round_trip_multiple_segments() {
        let list = IdList::from_ids(vec![id(b"alpha"), id(&[0x00, 0xFF]), id(b"x")]);
        let decoded = IdList::decode(&list.encode()).unwrap();
        assert_eq!(decoded, list);
    }

    #[test]
    fn test_decode_rejects_empty_input() {
        let err = IdList::decode(&[]).unwrap_err();
        assert!(matches!(err, Error::MalformedIdentifier { offset: 0, .. }));
    }

    #[test]
    fn test_decode_rejects_truncated_length_prefix() {
        let err = IdList::decode(&[1]).unwrap_err();
        assert!(matches!(err, Error::MalformedIdentifier { .. }));
    }

    #[test]
    fn test_decode_rejects_truncated_segment() {
        // Declares a 4-byte segment but provides only 2.
        let err = IdList::decode(&[4, 0, 0xAA, 0xBB]).unwrap_err();
        match err {
            Error::MalformedIdentifier { offset, reason } => {
                assert_eq!(offset, 2);
                assert!(reason.contains("truncated"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_rejects_missing_terminator() {
        let err = IdList::decode(&[1, 0, 0xAA]).unwrap_err();
        match err {
            Error::MalformedIdentifier { reason, .. } => {
                assert!(reason.contains("terminator"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let err = IdList::decode(&[1, 0, 0xAA, 0, 0, 0xFF]).unwrap_err();
        match err {
            Error::MalformedIdentifier { reason, .. } => {
                assert!(reason.contains("trailing"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_foreign_bytes() {
        // Structurally valid list with opaque contents from another provider.
        let foreign = IdList::from_ids(vec![id(&[0xDE, 0xAD]), id(&[0xBE, 0xEF, 0x00])]);
        let decoded = IdList::decode(&foreign.encode()).unwrap();
        assert_eq!(decoded, foreign);
    }

    #[test]
    fn test_concat() {
        let parent = IdList::single(id(b"a"));
        let child = IdList::from_ids(vec![id(b"b"), id(b"c")]);
        let joined = parent.concat(&child);
        assert_eq!(joined.len(), 3);
        assert_eq!(joined.first().unwrap(), &id(b"a"));
        assert_eq!(joined.last().unwrap(), &id(b"c"));
    }

    #[test]
    fn test_concat_with_empty_is_identity() {
        let list = IdList::from_ids(vec![id(b"a"), id(b"b")]);
        assert_eq!(list.concat(&IdList::new()), list);
        assert_eq!(IdList::new().concat(&list), list);
    }

    #[test]
    fn test_is_prefix_of() {
        let parent = IdList::single(id(b"a"));
        let child = IdList::from_ids(vec![id(b"a"), id(b"b")]);
        let other = IdList::single(id(b"x"));

        assert!(parent.is_prefix_of(&child));
        assert!(parent.is_prefix_of(&parent));
        assert!(IdList::new().is_prefix_of(&child));
        assert!(!child.is_prefix_of(&parent));
        assert!(!other.is_prefix_of(&child));
    }

    #[test]
    fn test_matches_single_segment_only() {
        let a = id(b"a");
        assert!(IdList::single(a.clone()).matches(&a));
        assert!(!IdList::new().matches(&a));
        assert!(!IdList::from_ids(vec![a.clone(), a.clone()]).matches(&a));
        assert!(!IdList::single(id(b"b")).matches(&a));
    }

    #[test]
    fn test_split_first() {
        let list = IdList::from_ids(vec![id(b"a"), id(b"b")]);
        let (first, rest) = list.split_first().unwrap();
        assert_eq!(first, &id(b"a"));
        assert_eq!(rest, IdList::single(id(b"b")));
        assert!(IdList::new().split_first().is_none());
    }

    #[test]
    fn test_parent() {
        let list = IdList::from_ids(vec![id(b"a"), id(b"b")]);
        assert_eq!(list.parent().unwrap(), IdList::single(id(b"a")));
        assert_eq!(IdList::single(id(b"a")).parent().unwrap(), IdList::new());
        assert!(IdList::new().parent().is_none());
    }

    #[test]
    fn test_raw_cmp_total_order_basics() {
        use std::cmp::Ordering;

        let a = IdList::single(id(b"a"));
        let b = IdList::single(id(b"b"));
        let ab = IdList::from_ids(vec![id(b"a"), id(b"b")]);

        assert_eq!(a.raw_cmp(&a), Ordering::Equal);
        assert_eq!(a.raw_cmp(&b), Ordering::Less);
        assert_eq!(b.raw_cmp(&a), Ordering::Greater);
        // Prefix sorts first.
        assert_eq!(a.raw_cmp(&ab), Ordering::Less);
    }

    #[test]
    fn test_display() {
        let list = IdList::from_ids(vec![id(&[0x01]), id(&[0xAB, 0xCD])]);
        assert_eq!(format!("{list}"), "01/abcd");
    }
}
