//! Property-based tests for the selection store
//!
//! Tests invariants:
//! - After n toggles the sidebar is open iff n is even
//! - close_sidebar after any toggle sequence leaves it closed
//! - The last brand/module written is the one read back

use proptest::prelude::*;

use crate::core::models::ModuleId;
use crate::core::selection::SelectionStore;
use crate::tests::common::fixtures::sample_brands;

proptest! {
    #[test]
    fn toggle_parity(n in 0usize..50) {
        let store = SelectionStore::new(None);
        for _ in 0..n {
            store.toggle_sidebar();
        }
        prop_assert_eq!(store.is_sidebar_open(), n % 2 == 0);
    }

    #[test]
    fn close_after_toggles_is_closed(n in 0usize..20, closes in 1usize..4) {
        let store = SelectionStore::new(None);
        for _ in 0..n {
            store.toggle_sidebar();
        }
        for _ in 0..closes {
            store.close_sidebar();
        }
        prop_assert!(!store.is_sidebar_open());
    }

    #[test]
    fn last_write_wins(
        brand_writes in prop::collection::vec(prop::option::of(0usize..3), 1..10),
        module_writes in prop::collection::vec(prop::option::of(0usize..ModuleId::ALL.len()), 1..10),
    ) {
        let brands = sample_brands();
        let store = SelectionStore::new(None);

        for write in &brand_writes {
            store.select_brand(write.map(|i| brands[i].clone()));
        }
        for write in &module_writes {
            store.select_module(write.map(|i| ModuleId::ALL[i]));
        }

        let expected_brand = brand_writes.last().copied().flatten().map(|i| brands[i].id.clone());
        prop_assert_eq!(store.selected_brand().map(|b| b.id), expected_brand);

        let expected_module = module_writes.last().copied().flatten().map(|i| ModuleId::ALL[i]);
        prop_assert_eq!(store.selected_module(), expected_module);
    }
}
