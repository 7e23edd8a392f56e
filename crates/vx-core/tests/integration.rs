//! Integration tests exercising the public API end to end:
//! table → engine → relation / matrix / color / sound → catalog export.

use vx_core::{
    BASE_FREQUENCY_HZ, ColorPolicy, Convention, Digit, HarmonicEngine, MultiplierTable,
    RelationCatalog, build_matrix, digital_root, export_json, import_json, remap_zero,
};

fn d(v: u8) -> Digit {
    Digit::new(v).unwrap()
}

fn values(flow: &[Digit]) -> Vec<u8> {
    flow.iter().map(|x| x.value()).collect()
}

/// The worked examples everything downstream depends on.
#[test]
fn reference_cases() {
    let engine = HarmonicEngine::default();

    let unity = engine.get_relation(d(1), d(1));
    assert_eq!(unity.consciousness.value(), 9);
    assert_eq!(unity.frequency_hz, 3888);
    assert!((1..=9).contains(&unity.result.value()));

    assert_eq!(engine.get_matrix(d(2))[(3, 4)].value(), 5);
    assert_eq!(values(&engine.get_vortex_flow(d(1))), vec![2, 4, 8, 7, 5, 1]);
    assert_eq!(values(&engine.get_vortex_flow(d(3))), vec![6, 9]);
}

/// digital_root keeps 0 as 0; only harmonic sites remap.
#[test]
fn zero_conventions_stay_distinct() {
    assert_eq!(digital_root(0), 0);
    assert_eq!(remap_zero(digital_root(0)), 9);
    for anchor in Digit::all() {
        assert_eq!(build_matrix(anchor)[(0, 0)].value(), 9);
    }
}

/// Every pair under every built-in convention lands on the 432 grid.
#[test]
fn frequencies_on_base_grid_for_all_conventions() {
    for table in [MultiplierTable::relation(), MultiplierTable::main()] {
        let engine = HarmonicEngine::new(table, ColorPolicy::Unclamped);
        for a in Digit::all() {
            for b in Digit::all() {
                let r = engine.get_relation(a, b);
                assert_eq!(r.frequency_hz % BASE_FREQUENCY_HZ, 0);
                assert!(r.color_hsl.starts_with("hsl("));
                assert!(r.sound_hz > 0.0);
            }
        }
    }
}

/// The two conventions only diverge where a relation touches digit 8 as `b`.
#[test]
fn convention_divergence_is_localized() {
    let rel = HarmonicEngine::new(MultiplierTable::relation(), ColorPolicy::Unclamped);
    let main = HarmonicEngine::new(MultiplierTable::main(), ColorPolicy::Unclamped);
    for a in Digit::all() {
        for b in Digit::all() {
            let same = rel.get_relation(a, b) == main.get_relation(a, b);
            if b.value() != 8 {
                assert!(same, "({a}, {b}) should not depend on convention");
            }
        }
    }
    let diffs = MultiplierTable::relation().discrepancies(&MultiplierTable::main());
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].left, Convention::Relation.to_string());
    assert_eq!(diffs[0].right, Convention::Main.to_string());
}

/// Out-of-range digits are reported, not clamped or wrapped.
#[test]
fn domain_violation_at_boundary() {
    let engine = HarmonicEngine::default();
    assert!(engine.relation_for(10, 0).is_err());
    assert!(engine.relation_for(-1, 0).is_err());
    assert!(Digit::new(10).is_err());
}

/// Export → import preserves the whole catalog.
#[test]
fn catalog_json_roundtrip() {
    let engine = HarmonicEngine::default();
    let catalog = RelationCatalog::build(&engine);
    let json = export_json(&catalog).unwrap();
    let restored = import_json(&json).unwrap();
    assert_eq!(restored.relations(), catalog.relations());
    assert_eq!(restored.matrices(), catalog.matrices());
    assert_eq!(restored.table, catalog.table);
}

/// An export edited by hand no longer matches its table and is refused.
#[test]
fn catalog_import_refuses_edited_relations() {
    let catalog = RelationCatalog::build(&HarmonicEngine::default());
    let mut v: serde_json::Value = serde_json::from_str(&export_json(&catalog).unwrap()).unwrap();
    v["relations"][23]["colorHSL"] = serde_json::json!("hsl(0, 0%, 0%)");
    let err = import_json(&v.to_string()).unwrap_err();
    assert!(err.to_string().contains("(2, 3)"), "got {err}");
}
