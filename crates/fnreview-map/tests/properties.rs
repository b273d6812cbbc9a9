//! Property tests for normalization and alias resolution.

use fnreview_map::{AliasMap, HeaderTarget, builtin_labels, normalize, normalize_loose};
use fnreview_model::CanonicalField;
use proptest::prelude::*;

fn field_strategy() -> impl Strategy<Value = CanonicalField> {
    prop::sample::select(CanonicalField::ALL.to_vec())
}

proptest! {
    #[test]
    fn normalize_is_idempotent(text in "[a-zA-Z0-9äöüÄÖÜß :?/().,\\\\\r\n\t-]{0,40}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once.clone());
        let loose = normalize_loose(&text);
        prop_assert_eq!(normalize_loose(&loose), loose);
    }

    #[test]
    fn normalize_ignores_case_and_spacing(text in "[a-zA-Z ]{1,30}") {
        let spaced = format!("  {}\r\n", text.to_uppercase().replace(' ', "   "));
        prop_assert_eq!(normalize(&spaced), normalize(&text));
    }

    #[test]
    fn resolve_is_total_without_collisions(
        aliases in prop::collection::btree_map("[a-z]{3,10}", field_strategy(), 0..8),
        header in "[a-z ]{0,20}",
    ) {
        let configured: Vec<_> = aliases
            .iter()
            .map(|(alias, field)| (HeaderTarget::Field(*field), format!("custom {alias}")))
            .collect();
        let map = AliasMap::build(builtin_labels(), configured).expect("no collisions");

        for (alias, field) in &aliases {
            prop_assert_eq!(
                map.resolve(&format!("Custom {alias}")),
                Some(HeaderTarget::Field(*field))
            );
        }
        // Unknown headers resolve to nothing rather than failing.
        let resolved = map.resolve(&header);
        if let Some(target) = resolved {
            prop_assert!(map.iter().any(|(_, t)| t == target));
        }
    }

    #[test]
    fn colliding_alias_is_rejected(
        alias in "[a-z]{3,10}",
        first in field_strategy(),
        second in field_strategy(),
    ) {
        prop_assume!(first != second);
        let result = AliasMap::build(
            builtin_labels(),
            [
                (HeaderTarget::Field(first), alias.clone()),
                (HeaderTarget::Field(second), alias.to_uppercase()),
            ],
        );
        prop_assert!(result.is_err());
    }
}
