use autotag_fs::NormalizedPath;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_normalization_invariants(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        let as_str = path.as_str();

        prop_assert!(!as_str.contains('\\'));
        prop_assert!(!as_str.contains("//"));
        prop_assert!(as_str == "/" || !as_str.ends_with('/'));

        // Cleaning is idempotent
        let again = NormalizedPath::new(as_str);
        prop_assert_eq!(path, again);
    }

    #[test]
    fn test_join_then_strip_prefix(base in "[a-z]{1,8}(/[a-z]{1,8}){0,3}", leaf in "[a-z]{1,8}\\.md") {
        let root = NormalizedPath::new(&base);
        let joined = root.join(&leaf);
        let stripped = joined.strip_prefix(&root).unwrap();
        prop_assert_eq!(stripped.as_str(), leaf.as_str());
    }
}
