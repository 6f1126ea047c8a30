//! Property-based tests for the comparator's total-order invariants.

use std::cmp::Ordering;

use proptest::prelude::*;

use super::{compare, SortKey};
use crate::idlist::{IdList, Identifier};
use crate::memory::{MemoryFolder, MemoryItem};
use crate::node::{EnumFlags, NamespaceFolder, NamespaceNode};

fn fixture() -> MemoryFolder {
    let sub = MemoryFolder::builder("Sub")
        .item(MemoryItem::new("one").unwrap())
        .item(MemoryItem::new("two").unwrap())
        .build()
        .unwrap();
    MemoryFolder::builder("Root")
        .folder(sub)
        .item(MemoryItem::new("apple").unwrap().with_detail(0, "30"))
        .item(MemoryItem::new("Banana").unwrap().with_detail(0, "10"))
        .item(MemoryItem::new("cherry").unwrap())
        .build()
        .unwrap()
}

// Draws either a known child identifier or a foreign byte token.
fn identifier_strategy() -> impl Strategy<Value = Identifier> {
    let folder = fixture();
    let known: Vec<Identifier> = folder
        .children(EnumFlags::ALL)
        .map(|c| c.identifier().clone())
        .collect();
    prop_oneof![
        prop::sample::select(known),
        prop::collection::vec(any::<u8>(), 1..8)
            .prop_map(|bytes| Identifier::new(bytes).unwrap()),
    ]
}

fn id_list_strategy() -> impl Strategy<Value = IdList> {
    prop::collection::vec(identifier_strategy(), 0..3).prop_map(IdList::from_ids)
}

fn sort_key_strategy() -> impl Strategy<Value = SortKey> {
    prop_oneof![Just(SortKey::DisplayName), Just(SortKey::Column(0))]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // compare(a, a) == Equal
    #[test]
    fn reflexive(a in id_list_strategy(), key in sort_key_strategy()) {
        let folder = fixture();
        prop_assert_eq!(compare(&folder, &a, &a, key), Ordering::Equal);
    }

    // compare(a, b) == compare(b, a).reverse()
    #[test]
    fn antisymmetric(a in id_list_strategy(), b in id_list_strategy(), key in sort_key_strategy()) {
        let folder = fixture();
        prop_assert_eq!(
            compare(&folder, &a, &b, key),
            compare(&folder, &b, &a, key).reverse()
        );
    }

    // a <= b && b <= c implies a <= c
    #[test]
    fn transitive(
        a in id_list_strategy(),
        b in id_list_strategy(),
        c in id_list_strategy(),
        key in sort_key_strategy(),
    ) {
        let folder = fixture();
        let ab = compare(&folder, &a, &b, key);
        let bc = compare(&folder, &b, &c, key);
        if ab != Ordering::Greater && bc != Ordering::Greater {
            prop_assert_ne!(compare(&folder, &a, &c, key), Ordering::Greater);
        }
    }

    // Equal only for identical lists (strict total order)
    #[test]
    fn equality_implies_identity(a in id_list_strategy(), b in id_list_strategy(), key in sort_key_strategy()) {
        let folder = fixture();
        if compare(&folder, &a, &b, key) == Ordering::Equal {
            prop_assert_eq!(a, b);
        }
    }
}
