use super::*;
use crate::foundation::error::StackError;

fn t(category: Category, selector: u32) -> Slot {
    Slot::Trait { category, selector }
}

fn sel(values: [u32; 7]) -> Selectors {
    Selectors::new(values).unwrap()
}

fn position(slots: &[Slot], category: Category) -> usize {
    slots
        .iter()
        .position(|s| matches!(s, Slot::Trait { category: c, .. } if *c == category))
        .unwrap()
}

fn count(slots: &[Slot], category: Category) -> usize {
    slots
        .iter()
        .filter(|s| matches!(s, Slot::Trait { category: c, .. } if *c == category))
        .count()
}

fn every_tuple() -> impl Iterator<Item = Selectors> {
    (1..=12u32).flat_map(|d| {
        (1..=10u32).flat_map(move |f| (1..=12u32).map(move |g| sel([1, 1, 1, d, 1, f, g])))
    })
}

#[test]
fn all_ones_plan_order() {
    let slots = plan_slots(sel([1; 7]), false);
    assert_eq!(
        slots,
        vec![
            t(Category::A, 1),
            t(Category::B, 1),
            t(Category::C, 1),
            t(Category::E, 1),
            t(Category::G, 1),
            t(Category::F, 1),
            t(Category::D, 1),
        ]
    );
}

#[test]
fn default_branches_put_d_low() {
    let slots = plan_slots(sel([2, 3, 4, 5, 6, 7, 2]), false);
    assert_eq!(
        slots,
        vec![
            t(Category::A, 2),
            t(Category::B, 3),
            t(Category::C, 4),
            t(Category::E, 6),
            t(Category::D, 5),
            t(Category::G, 2),
            t(Category::F, 7),
        ]
    );
}

#[test]
fn g6_goes_under_e() {
    let slots = plan_slots(sel([1, 1, 1, 2, 1, 1, 6]), false);
    assert_eq!(
        slots,
        vec![
            t(Category::A, 1),
            t(Category::B, 1),
            t(Category::C, 1),
            t(Category::G, 6),
            t(Category::E, 1),
            t(Category::D, 2),
            t(Category::F, 1),
        ]
    );
}

#[test]
fn g8_sits_between_f_and_mid_d() {
    let slots = plan_slots(sel([1, 1, 1, 10, 1, 2, 8]), false);
    assert_eq!(
        &slots[3..],
        &[
            t(Category::E, 1),
            t(Category::F, 2),
            t(Category::G, 8),
            t(Category::D, 10),
        ]
    );
}

#[test]
fn g7_and_g9_go_above_mid_d() {
    for g in [7, 9] {
        let slots = plan_slots(sel([1, 1, 1, 1, 1, 2, g]), false);
        assert_eq!(
            &slots[3..],
            &[
                t(Category::E, 1),
                t(Category::F, 2),
                t(Category::D, 1),
                t(Category::G, g),
            ]
        );
    }
}

#[test]
fn f8_and_d3_go_on_top() {
    let slots = plan_slots(sel([1, 1, 1, 3, 1, 8, 9]), true);
    assert_eq!(
        &slots[3..],
        &[
            t(Category::E, 1),
            t(Category::G, 9),
            t(Category::F, 8),
            t(Category::D, 3),
            Slot::Signature,
        ]
    );
}

#[test]
fn every_category_appears_exactly_once() {
    for selectors in every_tuple() {
        let slots = plan_slots(selectors, false);
        assert_eq!(slots.len(), 7, "{selectors}");
        for category in Category::ALL {
            assert_eq!(count(&slots, category), 1, "{category} in {selectors}");
        }
    }
}

#[test]
fn f_position_relative_to_g() {
    for selectors in every_tuple() {
        let slots = plan_slots(selectors, false);
        let (f, g) = (position(&slots, Category::F), position(&slots, Category::G));
        let g_late = matches!(selectors.get(Category::G), 7..=9);
        if selectors.get(Category::F) == 8 || !g_late {
            assert!(f > g, "{selectors}");
        } else {
            assert!(f < g, "{selectors}");
        }
    }
}

#[test]
fn d3_is_inserted_once_at_the_top_trait_position() {
    for selectors in every_tuple().filter(|s| s.get(Category::D) == 3) {
        let slots = plan_slots(selectors, false);
        assert_eq!(position(&slots, Category::D), 6, "{selectors}");
    }
}

#[test]
fn signature_is_always_last() {
    for selectors in every_tuple().step_by(7) {
        let slots = plan_slots(selectors, true);
        assert_eq!(slots.len(), 8);
        assert_eq!(slots.last(), Some(&Slot::Signature));
    }
}

#[test]
fn planning_is_deterministic() {
    let s = sel([3, 1, 4, 1, 5, 9, 2]);
    assert_eq!(plan_slots(s, true), plan_slots(s, true));
}

fn catalog_with(len: usize) -> AssetCatalog {
    let mut catalog = AssetCatalog::new();
    for (i, category) in Category::ALL.into_iter().enumerate() {
        let layers = (1..=len as u32)
            .map(|n| PreparedImage::transparent(n, i as u32 + 1))
            .collect();
        catalog.insert(category, layers);
    }
    catalog
}

#[test]
fn select_layers_resolves_images_in_slot_order() {
    let catalog = catalog_with(10);
    let signature = PreparedImage::transparent(99, 99);
    let plan = select_layers(sel([2, 1, 1, 1, 1, 1, 1]), true, &catalog, &signature).unwrap();

    assert_eq!(plan.len(), 8);
    assert_eq!(plan.slots(), plan_slots(sel([2, 1, 1, 1, 1, 1, 1]), true));
    assert_eq!(plan.layers[0].image.width, 2);
    assert_eq!(plan.layers[0].image.height, 1);
    assert_eq!(plan.layers[6].image.height, 4);
    assert_eq!(plan.layers[7].image.width, 99);
}

#[test]
fn select_layers_out_of_range_is_index_error() {
    let catalog = catalog_with(5);
    let signature = PreparedImage::transparent(1, 1);
    let err = select_layers(sel([6, 1, 1, 1, 1, 1, 1]), false, &catalog, &signature).unwrap_err();
    assert!(matches!(
        err,
        StackError::Index {
            category: Category::A,
            selector: 6,
            len: 5
        }
    ));
}

#[test]
fn select_layers_missing_category_is_configuration_error() {
    let mut catalog = AssetCatalog::new();
    catalog.insert(Category::A, vec![PreparedImage::transparent(1, 1)]);
    let signature = PreparedImage::transparent(1, 1);
    let err = select_layers(sel([1; 7]), false, &catalog, &signature).unwrap_err();
    assert!(matches!(err, StackError::Configuration(_)));
}
