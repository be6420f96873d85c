#![no_main]
use libfuzzer_sys::fuzz_target;
use xmlarbor::serial::render;
use xmlarbor::validation::{is_valid_name, is_valid_value, validate_encoding, validate_version};
use xmlarbor::Tree;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = validate_version(input);
        let _ = validate_encoding(input);

        // Whatever the validators accept must be storable and renderable,
        // and whatever they reject must leave the tree untouched.
        let mut tree = Tree::new();
        let before = tree.node_count();
        match tree.create_entity(input, None) {
            Ok(e) => {
                assert!(is_valid_name(input));
                let _ = tree.create_text(input, Some(e));
                assert!(render(&tree, e).contains(input));
            }
            Err(_) => {
                assert!(!is_valid_name(input));
                assert_eq!(tree.node_count(), before);
            }
        }
        if is_valid_name(input) {
            assert!(is_valid_value(input));
        }
    }
});
