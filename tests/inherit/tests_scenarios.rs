#![allow(clippy::unwrap_used)]

use rstest::rstest;
use strata::inherit::{MergeOutcome, merge_node};
use strata::{InheritOptions, Node, resolve_inheritance};

use crate::helpers::fixtures::{anonymous_of, layer, list, thing, thing_of};
use crate::helpers::tree_assertions::{assert_inherited, field_texts, list_values};

fn pairs(items: &[(&str, &str)]) -> Vec<(String, Option<String>)> {
    items
        .iter()
        .map(|(name, value)| (name.to_string(), Some(value.to_string())))
        .collect()
}

#[test]
fn test_scalar_field_kept_and_missing_field_adopted() {
    let mut child = Node::new("ThingDef").with_child(Node::field("a", "1"));
    let parent = Node::new("ThingDef")
        .with_child(Node::field("a", "2"))
        .with_child(Node::field("b", "3"));

    merge_node(&mut child, &parent, &InheritOptions::default());

    assert_eq!(field_texts(&child), pairs(&[("a", "1"), ("b", "3")]));
}

#[test]
fn test_empty_child_adopts_parent_list() {
    let mut child = Node::new("comps");
    let parent = list("comps", &["x", "y"]);

    merge_node(&mut child, &parent, &InheritOptions::default());

    assert_eq!(child.children(), parent.children());
    assert_eq!(field_texts(&child), pairs(&[("li", "x"), ("li", "y")]));
}

#[rstest]
#[case::lowercase("false")]
#[case::capitalized("False")]
#[case::uppercase("FALSE")]
fn test_opted_out_child_stays_empty(#[case] sentinel: &str) {
    let mut child = Node::new("comps").with_attr("Inherit", sentinel);
    let parent = list("comps", &["x"]);

    let outcome = merge_node(&mut child, &parent, &InheritOptions::default());

    assert_eq!(outcome, MergeOutcome::OptedOut);
    assert!(child.children().is_empty());
}

#[test]
fn test_weapon_hierarchy() {
    let base_gun = thing("BaseGun")
        .with_attr("Abstract", "True")
        .with_child(Node::field("thingClass", "ThingWithComps"))
        .with_child(list("comps", &["Equippable", "Art"]))
        .with_child(
            Node::new("statBases")
                .with_child(Node::field("Mass", "2"))
                .with_child(Node::field("Beauty", "0")),
        );
    let base_pistol = thing_of("BasePistol", "BaseGun")
        .with_attr("Abstract", "True")
        .with_child(Node::new("statBases").with_child(Node::field("Mass", "1")));
    let revolver = thing_of("Revolver", "BasePistol")
        .with_child(Node::field("label", "revolver"))
        .with_child(list("comps", &["Biocodable"]))
        .with_child(
            Node::new("tools")
                .with_attr("Inherit", "False")
                .with_child(list("li", &["grip"])),
        );
    let mut layers = vec![layer("Core", [base_gun, base_pistol, revolver])];

    let report = resolve_inheritance(&mut layers, &InheritOptions::default()).unwrap();
    assert_eq!(report.merged, 2);

    let revolver = &layers[0].defs("ThingDef")[2];
    assert_inherited(revolver);
    assert_eq!(
        revolver.elements().map(Node::name).collect::<Vec<_>>(),
        vec!["label", "comps", "tools", "statBases", "thingClass"]
    );
    assert_eq!(list_values(revolver, "comps"), vec!["Biocodable", "Equippable", "Art"]);
    let stats = revolver.element("statBases").unwrap();
    assert_eq!(field_texts(stats), pairs(&[("Mass", "1"), ("Beauty", "0")]));
    // Abstract is an attribute; attributes never travel
    assert!(!revolver.has_attr("Abstract"));

    let options = InheritOptions::default();
    let concrete: Vec<_> = layers[0]
        .concrete_defs(&options)
        .filter_map(|n| n.attr("Name"))
        .collect();
    assert_eq!(concrete, vec!["Revolver"]);
}

#[test]
fn test_overlay_patches_base_definition_through_anonymous_child() {
    let mut layers = vec![
        layer(
            "Core",
            [thing("BaseHuman")
                .with_child(Node::field("race", "human"))
                .with_child(list("traits", &["Tough"]))],
        ),
        layer(
            "Mod",
            [anonymous_of("BaseHuman")
                .with_child(Node::field("defName", "Colonist"))
                .with_child(list("traits", &["Nimble"]))],
        ),
    ];

    let report = resolve_inheritance(&mut layers, &InheritOptions::default()).unwrap();

    assert_eq!(report.anonymous, 1);
    let colonist = &layers[1].defs("ThingDef")[0];
    assert_inherited(colonist);
    assert_eq!(list_values(colonist, "traits"), vec!["Nimble", "Tough"]);
    assert_eq!(colonist.element("race").and_then(Node::text).as_deref(), Some("human"));
}

#[test]
fn test_deep_chain_flows_through_every_level() {
    let mut defs = vec![thing("L0").with_child(Node::field("root", "yes"))];
    for level in 1..50 {
        defs.push(
            thing_of(&format!("L{level}"), &format!("L{}", level - 1))
                .with_child(Node::field(format!("f{level}"), level.to_string())),
        );
    }
    let mut layers = vec![layer("Core", defs)];

    let report = resolve_inheritance(&mut layers, &InheritOptions::default()).unwrap();

    assert_eq!(report.merged, 49);
    let last = &layers[0].defs("ThingDef")[49];
    assert_eq!(last.elements().count(), 50);
    assert_eq!(last.element("root").and_then(Node::text).as_deref(), Some("yes"));
}
