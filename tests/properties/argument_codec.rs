//! Property tests for the argument XML codec.

use proptest::prelude::*;

use rappmenu::{Argument, Document, Viewer};

fn viewer_strategy() -> impl Strategy<Value = Viewer> {
    proptest::sample::select(Viewer::ALL.to_vec())
}

// Printable, no surrounding whitespace: trimming setters and the
// whitespace-trimming reader make leading/trailing blanks non-observable
// by design, so they are excluded from round-trip inputs.
fn token() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9._&<>-]{1,12}").unwrap()
}

fn optional_token() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9._&<>-]{0,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Any valid argument survives a full document round trip
    /// with every field intact.
    #[test]
    fn property_argument_round_trip(
        name in token(),
        required in any::<bool>(),
        read_only in any::<bool>(),
        multiselect in any::<bool>(),
        viewer in viewer_strategy(),
        depends in optional_token(),
        value in optional_token(),
        description in optional_token(),
        value_set in proptest::collection::vec(
            proptest::string::string_regex("[A-Za-z0-9._-]{1,8}").unwrap(),
            0..4,
        ),
    ) {
        let mut argument = Argument::new(&name).expect("token names are valid");
        argument.set_required(required);
        argument.set_read_only(read_only);
        argument.set_allow_multiselect(multiselect);
        argument.set_viewer(viewer);
        argument.set_depends_from(&depends);
        argument.set_value(&value);
        argument.set_description(&description);
        if argument.needs_value_set() {
            // A value set is only carried by value-set viewers.
            argument.set_value_set(value_set.clone());
        }

        let mut doc = Document::with_root_name("Apps").unwrap();
        let root = doc.root_id();
        let fun = doc.tree_mut().add_function(root, "fn").unwrap();
        doc.tree_mut().arguments_mut(fun).unwrap().push(argument.clone());

        let xml = doc.to_xml_string().unwrap();
        let loaded = Document::from_xml_str(&xml).unwrap();
        let fun = loaded.tree().children(loaded.root_id())[0];
        let loaded_argument = &loaded.tree().arguments(fun).unwrap()[0];

        prop_assert_eq!(loaded_argument, &argument);
    }

    /// PROPERTY: The reader never panics on arbitrary input; it returns
    /// a document or an error.
    #[test]
    fn property_reader_never_panics(
        input in "(?s).{0,512}"
    ) {
        let _ = Document::from_xml_str(&input);
    }

    /// PROPERTY: A canonical serialization is a fixed point: writing the
    /// loaded document reproduces the same string.
    #[test]
    fn property_serialization_is_fixed_point(
        names in proptest::collection::vec("[A-Za-z][A-Za-z0-9]{0,8}", 1..6),
    ) {
        let mut doc = Document::with_root_name("Apps").unwrap();
        let root = doc.root_id();
        for name in &names {
            doc.tree_mut().add_menu(root, name).unwrap();
        }

        let xml = doc.to_xml_string().unwrap();
        let reloaded = Document::from_xml_str(&xml).unwrap();
        prop_assert_eq!(reloaded.to_xml_string().unwrap(), xml);
    }
}
