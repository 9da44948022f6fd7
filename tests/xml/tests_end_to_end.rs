#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use strata::inherit::codes;
use strata::project::LayerLoader;
use strata::xml::{read_defs, write_defs};
use strata::{InheritOptions, Position, resolve_inheritance};

use crate::helpers::fixtures::find;
use crate::helpers::tree_assertions::{field, list_values};

const CORE_WEAPONS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Defs>
  <ThingDef Name="BaseWeapon" Abstract="True">
    <thingClass>ThingWithComps</thingClass>
    <comps>
      <li>Equippable</li>
    </comps>
    <statBases>
      <Mass>2</Mass>
      <Beauty>0</Beauty>
    </statBases>
  </ThingDef>
  <ThingDef Name="BaseGun" ParentName="BaseWeapon" Abstract="True">
    <techLevel>Industrial</techLevel>
  </ThingDef>
</Defs>
"#;

const CORE_ITEMS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Defs>
  <ThingDef ParentName="BaseGun">
    <defName>Revolver</defName>
    <statBases>
      <Mass>1.4</Mass>
    </statBases>
  </ThingDef>
</Defs>
"#;

const MOD_PATCH: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Defs>
  <!-- Overlay gun: everything inherited is stripped of art -->
  <ThingDef Name="BaseGun" ParentName="BaseWeapon" Abstract="True">
    <techLevel>Spacer</techLevel>
    <comps Inherit="False">
      <li>Biocodable</li>
    </comps>
  </ThingDef>
  <ThingDef ParentName="BaseGun">
    <defName>ChargeRifle</defName>
  </ThingDef>
  <ThingDef ParentName="DlcGun">
    <defName>Missing</defName>
  </ThingDef>
</Defs>
"#;

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn by_def_name<'a>(layer: &'a strata::Layer, name: &str) -> &'a strata::Node {
    layer
        .defs("ThingDef")
        .iter()
        .find(|n| field(n, "defName").as_deref() == Some(name))
        .unwrap()
}

#[test]
fn test_load_resolve_and_write() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Core/Defs/Weapons.xml", CORE_WEAPONS);
    write(temp.path(), "Core/Defs/Items/Guns.xml", CORE_ITEMS);
    write(temp.path(), "Mod/Defs/Patch.xml", MOD_PATCH);

    let mut layers = LayerLoader::new()
        .load_layers([temp.path().join("Core"), temp.path().join("Mod")])
        .unwrap();
    assert_eq!(layers[0].len(), 3);
    assert_eq!(layers[1].len(), 3);

    let report = resolve_inheritance(&mut layers, &InheritOptions::default()).unwrap();

    // Core revolver sees Core's BaseGun
    let revolver = by_def_name(&layers[0], "Revolver");
    assert_eq!(field(revolver, "techLevel").as_deref(), Some("Industrial"));
    assert_eq!(list_values(revolver, "comps"), vec!["Equippable"]);
    let stats = revolver.element("statBases").unwrap();
    assert_eq!(field(stats, "Mass").as_deref(), Some("1.4"));
    assert_eq!(field(stats, "Beauty").as_deref(), Some("0"));

    // Mod's BaseGun overrides for Mod children only
    let mod_gun = find(&layers[1], "BaseGun");
    assert_eq!(list_values(mod_gun, "comps"), vec!["Biocodable"]);
    let rifle = by_def_name(&layers[1], "ChargeRifle");
    assert_eq!(field(rifle, "techLevel").as_deref(), Some("Spacer"));
    assert_eq!(list_values(rifle, "comps"), vec!["Biocodable"]);
    assert_eq!(field(rifle, "thingClass").as_deref(), Some("ThingWithComps"));

    // Unresolved parent points at its source document
    let unresolved: Vec<_> = report.diagnostics_with_code(codes::UNRESOLVED_PARENT).collect();
    assert_eq!(unresolved.len(), 1);
    assert_eq!(unresolved[0].position, Some(Position::new(12, 2)));
    assert!(!by_def_name(&layers[1], "Missing").has_attr("Inherited"));

    // Resolved definitions written out read back identically
    let written = write_defs(layers[1].defs("ThingDef")).unwrap();
    let reread = read_defs(&written).unwrap();
    assert_eq!(reread.len(), 3);
    assert_eq!(reread[1].attr("Inherited"), Some("true"));
    assert_eq!(list_values(&reread[1], "comps"), vec!["Biocodable"]);
    assert_eq!(write_defs(&reread).unwrap(), written);
}

const COMMENTED_COMPS: &str = r#"<Defs>
  <ThingDef Name="BaseItem">
    <comps>
      <li Class="Forbiddable"><allow>true</allow></li>
      <li Class="Art"><tier>1</tier></li>
    </comps>
  </ThingDef>
  <ThingDef Name="Statue" ParentName="BaseItem">
    <comps>
      <!-- mine -->
      <li Class="Quality"><level>5</level></li>
    </comps>
  </ThingDef>
</Defs>
"#;

#[test]
fn test_commented_list_still_appends_parent_items() {
    let mut layer = strata::Layer::new("Core");
    for def in read_defs(COMMENTED_COMPS.as_bytes()).unwrap() {
        layer.push_def(def);
    }
    let mut layers = vec![layer];

    resolve_inheritance(&mut layers, &InheritOptions::default()).unwrap();

    let comps = find(&layers[0], "Statue").element("comps").unwrap();
    let classes: Vec<_> = comps.elements().filter_map(|n| n.attr("Class")).collect();
    assert_eq!(classes, vec!["Quality", "Forbiddable", "Art"]);
    let own = comps.elements().next().unwrap();
    assert_eq!(field(own, "level").as_deref(), Some("5"));
    assert!(own.element("allow").is_none());
    assert!(own.element("tier").is_none());
}
