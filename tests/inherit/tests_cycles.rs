#![allow(clippy::unwrap_used)]

use strata::inherit::codes;
use strata::{CyclePolicy, InheritError, InheritOptions, InheritanceEngine, Node};

use crate::helpers::fixtures::{layer, thing, thing_of};
use crate::helpers::tree_assertions::{assert_inherited, assert_not_inherited};

fn cyclic_layers() -> Vec<strata::Layer> {
    vec![
        layer(
            "Core",
            [
                thing("Root").with_child(Node::field("label", "root")),
                thing_of("Leaf", "Root").with_child(Node::field("defName", "Leaf")),
            ],
        ),
        layer(
            "Mod",
            [
                thing_of("A", "B").with_child(Node::field("a", "1")),
                thing_of("B", "A").with_child(Node::field("b", "2")),
                thing_of("Hanger", "A").with_child(Node::field("h", "3")),
            ],
        ),
    ]
}

#[test]
fn test_reject_fails_before_touching_any_layer() {
    let original = cyclic_layers();
    let mut layers = original.clone();

    let err = InheritanceEngine::new(InheritOptions::default())
        .resolve(&mut layers)
        .unwrap_err();

    let InheritError::Cycle { def_type, chain, .. } = &err;
    assert_eq!(def_type, "ThingDef");
    assert_eq!(chain.first(), chain.last());
    assert_eq!(chain.len(), 3);
    assert_eq!(layers, original);
}

#[test]
fn test_skip_resolves_everything_outside_the_cycle() {
    let mut layers = cyclic_layers();
    let engine =
        InheritanceEngine::new(InheritOptions::default().with_cycle_policy(CyclePolicy::Skip));

    let report = engine.resolve(&mut layers).unwrap();

    assert_inherited(&layers[0].defs("ThingDef")[1]);
    for position in 0..3 {
        assert_not_inherited(&layers[1].defs("ThingDef")[position]);
    }
    assert_eq!(report.merged, 1);
    assert_eq!(report.diagnostics_with_code(codes::INHERITANCE_CYCLE).count(), 1);
}

#[test]
fn test_self_reference_is_a_cycle() {
    let mut layers = vec![layer("Core", [thing_of("Me", "Me")])];

    let err = InheritanceEngine::default().resolve(&mut layers).unwrap_err();

    assert_eq!(
        err.to_string(),
        "inheritance cycle in ThingDef (layer#0): Me -> Me"
    );
}
