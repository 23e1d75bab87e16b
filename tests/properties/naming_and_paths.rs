//! Property tests for name normalization and path construction.

use proptest::prelude::*;

use rappmenu::{MenuError, MenuTree, PATH_DELIMITER};

fn padding() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ \t]{0,4}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Names are stored trimmed, whatever padding they arrive
    /// with.
    #[test]
    fn property_names_stored_trimmed(
        core in "[A-Za-z][A-Za-z0-9 ]{0,10}[A-Za-z0-9]",
        left in padding(),
        right in padding(),
    ) {
        let padded = format!("{left}{core}{right}");
        let mut tree = MenuTree::new(&padded).unwrap();
        prop_assert_eq!(tree.name(tree.root_id()), core.as_str());

        let menu = tree.add_menu(tree.root_id(), &padded).unwrap();
        prop_assert_eq!(tree.name(menu), core.as_str());

        tree.set_name(menu, &format!("  {core}")).unwrap();
        prop_assert_eq!(tree.name(menu), core.as_str());
    }

    /// PROPERTY: Whitespace-only names always fail with InvalidName.
    #[test]
    fn property_blank_names_rejected(
        blank in "[ \t\r\n]{0,8}"
    ) {
        prop_assert!(matches!(MenuTree::new(&blank), Err(MenuError::InvalidName)));

        let mut tree = MenuTree::new("Apps").unwrap();
        let root = tree.root_id();
        prop_assert!(matches!(tree.add_menu(root, &blank), Err(MenuError::InvalidName)));
        prop_assert!(matches!(tree.set_name(root, &blank), Err(MenuError::InvalidName)));
    }

    /// PROPERTY: The path of a node nested under menus A1..An is exactly
    /// the ancestor names joined by the delimiter, root and self
    /// excluded, with no trailing delimiter.
    #[test]
    fn property_path_joins_ancestors(
        names in proptest::collection::vec("[A-Za-z][A-Za-z0-9]{0,8}", 1..6),
    ) {
        let mut tree = MenuTree::new("Apps").unwrap();
        let mut parent = tree.root_id();
        for name in &names {
            parent = tree.add_menu(parent, name).unwrap();
        }
        let leaf = tree.add_pdf_file(parent, "leaf.pdf").unwrap();

        let expected = names.join(PATH_DELIMITER);
        prop_assert_eq!(tree.path_as_string(leaf), expected);

        // The first menu sits directly under the root: empty path.
        let first = tree.children(tree.root_id())[0];
        prop_assert_eq!(tree.path_as_string(first), "");
    }
}
