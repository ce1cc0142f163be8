use bug_lib::IssueStore;
use proptest::prelude::*;
use std::collections::BTreeSet;
use tempfile::TempDir;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Issues come back in directory-name order and `resolve(i)` is the
    /// issue at scan position `i - 1`.
    #[test]
    fn scan_order_matches_index_resolution(names in prop::collection::btree_set("[a-z][a-z0-9]{0,8}", 1..12)) {
        let temp = TempDir::new().expect("tempdir");
        let store = IssueStore::new(temp.path());
        for name in &names {
            store.create(name).expect("create");
        }

        let issues = store.all_issues();
        prop_assert_eq!(issues.len(), names.len());

        let dirs: Vec<&str> = issues.iter().map(|i| i.directory_name()).collect();
        let sorted: Vec<&str> = names.iter().map(String::as_str).collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(&dirs, &sorted);

        for (index, expected) in dirs.iter().enumerate() {
            let token = (index + 1).to_string();
            let resolved = store.resolve(&token).expect("resolve index");
            prop_assert_eq!(resolved.directory_name(), *expected);
        }

        prop_assert!(store.resolve("0").is_err());
        let past_end = (names.len() + 1).to_string();
        prop_assert!(store.resolve(&past_end).is_err());
    }
}
