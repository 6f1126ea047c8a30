//! Property-based tests for the identifier codec.

use super::{IdList, Identifier};
use proptest::prelude::*;

fn identifier_strategy() -> impl Strategy<Value = Identifier> {
    prop::collection::vec(any::<u8>(), 1..32).prop_map(|bytes| Identifier::new(bytes).unwrap())
}

fn id_list_strategy() -> impl Strategy<Value = IdList> {
    prop::collection::vec(identifier_strategy(), 0..6).prop_map(IdList::from_ids)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 10000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // decode(encode(x)) == x for every list the codec produces
    #[test]
    fn codec_round_trip(list in id_list_strategy()) {
        let decoded = IdList::decode(&list.encode()).unwrap();
        prop_assert_eq!(decoded, list);
    }

    // A list is always a prefix of itself concatenated with anything
    #[test]
    fn concat_preserves_prefix(a in id_list_strategy(), b in id_list_strategy()) {
        let joined = a.concat(&b);
        prop_assert!(a.is_prefix_of(&joined));
        prop_assert_eq!(joined.len(), a.len() + b.len());
    }

    // Concatenation with the empty list is the identity
    #[test]
    fn concat_empty_identity(a in id_list_strategy()) {
        prop_assert_eq!(a.concat(&IdList::new()), a.clone());
        prop_assert_eq!(IdList::new().concat(&a), a);
    }

    // Raw byte comparison is a total order: antisymmetric and reflexive
    #[test]
    fn raw_cmp_antisymmetric(a in id_list_strategy(), b in id_list_strategy()) {
        prop_assert_eq!(a.raw_cmp(&a), std::cmp::Ordering::Equal);
        prop_assert_eq!(a.raw_cmp(&b), b.raw_cmp(&a).reverse());
        if a.raw_cmp(&b) == std::cmp::Ordering::Equal {
            prop_assert_eq!(&a, &b);
        }
    }

    // Truncating an encoded list never panics, it fails cleanly
    #[test]
    fn decode_truncation_is_clean(list in id_list_strategy(), cut in 0usize..16) {
        let bytes = list.encode();
        if cut > 0 && cut <= bytes.len() {
            let truncated = &bytes[..bytes.len() - cut];
            // Either a shorter valid list or a malformed-identifier error.
            let _ = IdList::decode(truncated);
        }
    }
}
