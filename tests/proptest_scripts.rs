//! Property tests for in-page script construction
//!
//! The storage-injection script embeds caller-supplied strings into
//! JavaScript. These properties pin down that arbitrary keys and values are
//! encoded as closed string literals and cannot alter the script shape.

use proptest::prelude::*;
use session_keeper_verify::LocalStorage;

proptest! {
    #[test]
    fn set_item_script_keeps_call_shape(key in ".*", value in ".*") {
        let script = LocalStorage::set_item_script(&key, &value);
        prop_assert!(script.starts_with("localStorage.setItem("));
        prop_assert!(script.ends_with(')'));
    }

    #[test]
    fn set_item_script_embeds_json_literals(key in ".*", value in ".*") {
        let script = LocalStorage::set_item_script(&key, &value);
        let key_lit = serde_json::to_string(&key).unwrap();
        let value_lit = serde_json::to_string(&value).unwrap();

        prop_assert!(script.contains(&key_lit));
        prop_assert!(script.contains(&value_lit));

        // The literals decode back to the originals
        let key_back: String = serde_json::from_str(&key_lit).unwrap();
        let value_back: String = serde_json::from_str(&value_lit).unwrap();
        prop_assert_eq!(key_back, key);
        prop_assert_eq!(value_back, value);
    }

    #[test]
    fn set_item_script_is_single_line(key in ".*", value in ".*") {
        // Control characters are escaped, so the script never spans lines
        let script = LocalStorage::set_item_script(&key, &value);
        prop_assert!(!script.contains('\n'));
        prop_assert!(!script.contains('\r'));
    }
}
