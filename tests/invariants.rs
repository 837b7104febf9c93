//! Contract Invariant Tests
//!
//! These tests verify the non-negotiable guarantees of the composition
//! engine: deterministic traversal, idempotent manifests, per-node skip
//! isolation, tag set semantics, and the reactive cascade rules.

use packforge_core::equipment::register_equipment;
use packforge_core::{
    fields::FieldValue,
    pipeline::{CardSpec, GenerationPipeline, GenerationReport},
    settings::PackSettings,
    templates::{OptionBag, TemplateRegistry},
    CardInstance,
};

fn create_pipeline() -> GenerationPipeline {
    let mut registry = TemplateRegistry::new();
    register_equipment(&mut registry);
    GenerationPipeline::new(registry)
}

fn new_card(pipeline: &GenerationPipeline, template_id: &str) -> CardInstance {
    let template = pipeline.registry().get(template_id).unwrap().clone();
    CardInstance::new(template, OptionBag::new())
}

fn tool_card(pipeline: &GenerationPipeline, name: &str, id: &str) -> CardInstance {
    let mut card = new_card(pipeline, "tool");
    card.set_field("itemName", FieldValue::text(name)).unwrap();
    card.set_field("itemId", FieldValue::text(id)).unwrap();
    card
}

fn text_artifact<'a>(report: &'a GenerationReport, path: &str) -> &'a str {
    match &report.manifest.files[path] {
        packforge_core::FileContent::Text(text) => text,
        other => panic!("expected text artifact at {path}, got {other:?}"),
    }
}

#[test]
fn invariant_same_pass_twice_is_byte_identical() {
    let pipeline = create_pipeline();
    let settings = PackSettings::named("foo");

    let mut set = new_card(&pipeline, "armorSet");
    set.set_field("setName", FieldValue::text("Emerald")).unwrap();
    set.add_child("Add Helmet").unwrap();
    let roots = vec![set, tool_card(&pipeline, "Emerald Sword", "emerald_sword")];

    let first = pipeline.generate(&roots, &settings).unwrap();
    let second = pipeline.generate(&roots, &settings).unwrap();

    assert_eq!(first.manifest_hash, second.manifest_hash);
    assert_eq!(
        serde_json::to_string(&first.manifest).unwrap(),
        serde_json::to_string(&second.manifest).unwrap()
    );
    assert!(!first.manifest.is_empty());
    assert!(first.skipped.is_empty());
}

#[test]
fn invariant_output_path_is_a_function_of_namespace_and_id() {
    let pipeline = create_pipeline();
    let settings = PackSettings::named("foo");
    let roots = vec![tool_card(&pipeline, "Emerald Sword", "emerald_sword")];

    let report = pipeline.generate(&roots, &settings).unwrap();
    assert!(report
        .manifest
        .files
        .contains_key("data/foo/filament/item/emerald_sword.json"));
    assert!(report
        .manifest
        .files
        .contains_key("assets/foo/models/item/emerald_sword.json"));
}

#[test]
fn invariant_missing_id_skips_node_but_not_siblings() {
    let pipeline = create_pipeline();
    let settings = PackSettings::named("foo");

    let broken = new_card(&pipeline, "tool"); // itemId left empty
    let roots = vec![broken, tool_card(&pipeline, "Good Sword", "good_sword")];

    let report = pipeline.generate(&roots, &settings).unwrap();

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].template_id, "tool");
    assert_eq!(report.skipped[0].path, "tool[0]");
    // The broken card contributed nothing; the sibling generated fully.
    for path in report.manifest.files.keys() {
        assert!(path.contains("good_sword"), "unexpected artifact {path}");
    }
    assert!(report
        .manifest
        .tag_entries("minecraft", "swords")
        .unwrap()
        .contains("foo:good_sword"));
}

#[test]
fn invariant_missing_namespace_skips_every_node() {
    let pipeline = create_pipeline();
    let roots = vec![tool_card(&pipeline, "Sword", "sword")];

    let report = pipeline.generate(&roots, &PackSettings::default()).unwrap();
    assert!(report.manifest.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].reason.contains("namespace"));
}

#[test]
fn invariant_duplicate_tag_entries_collapse() {
    let pipeline = create_pipeline();
    let settings = PackSettings::named("foo");

    // Duplicate item ids: last write wins on files, set semantics on tags.
    let roots = vec![
        tool_card(&pipeline, "Sword A", "shared_sword"),
        tool_card(&pipeline, "Sword B", "shared_sword"),
    ];

    let report = pipeline.generate(&roots, &settings).unwrap();
    let entries = report.manifest.tag_entries("minecraft", "swords").unwrap();
    assert_eq!(entries.len(), 1);

    let def = &report.manifest.files["data/foo/filament/item/shared_sword.json"];
    match def {
        packforge_core::FileContent::Text(text) => assert!(text.contains("Sword B")),
        other => panic!("expected text artifact, got {other:?}"),
    }
}

#[test]
fn invariant_derived_id_respects_hand_edits() {
    let pipeline = create_pipeline();

    let mut set = new_card(&pipeline, "armorSet");
    let helmet = set.add_child("Add Helmet").unwrap();

    // Empty derived id gets auto-populated on the first cascade.
    set.set_field("setName", FieldValue::text("Emerald")).unwrap();
    assert_eq!(set.children()[helmet].text("itemId"), Some("emerald_helmet"));
    assert_eq!(set.children()[helmet].text("itemName"), Some("Emerald Helmet"));

    // Still matching the `_helmet` suffix: follows the next derivation.
    set.set_field("setName", FieldValue::text("Ruby")).unwrap();
    assert_eq!(set.children()[helmet].text("itemId"), Some("ruby_helmet"));

    // Hand-edited away from the pattern: the user's value survives.
    set.children_mut()[helmet]
        .set_field("itemId", FieldValue::text("my_special_hat"))
        .unwrap();
    set.set_field("setName", FieldValue::text("Topaz")).unwrap();
    assert_eq!(set.children()[helmet].text("itemId"), Some("my_special_hat"));
    assert_eq!(set.children()[helmet].text("itemName"), Some("Topaz Helmet"));
}

#[test]
fn invariant_base_set_cascade_seeds_new_children() {
    let pipeline = create_pipeline();

    let mut set = new_card(&pipeline, "armorSet");
    set.set_field("baseSet", FieldValue::text("diamond")).unwrap();
    let boots = set.add_child("Add Boots").unwrap();

    let piece = &set.children()[boots];
    assert_eq!(piece.text("vanilla"), Some("minecraft:diamond_boots"));
    assert_eq!(piece.number("durability"), Some(429.0));
    assert_eq!(piece.number("armor"), Some(3.0));
}

#[test]
fn invariant_parent_generates_before_child() {
    // Root with namespace "foo", identifier "bar", child "baz": both paths
    // appear, parent's first.
    let pipeline = create_pipeline();
    let settings = PackSettings::named("foo");

    let mut set = new_card(&pipeline, "armorSet");
    set.set_field("setName", FieldValue::text("bar")).unwrap();
    set.set_field("wornTextureFile", FieldValue::Binary(vec![1, 2, 3]))
        .unwrap();
    let helmet = set.add_child("Add Helmet").unwrap();
    set.children_mut()[helmet]
        .set_field("itemId", FieldValue::text("baz"))
        .unwrap();

    let report = pipeline.generate(&[set], &settings).unwrap();

    let paths: Vec<&String> = report.manifest.files.keys().collect();
    let parent_pos = paths
        .iter()
        .position(|p| p.contains("bar") && p.contains("foo"))
        .expect("parent artifact present");
    let child_pos = paths
        .iter()
        .position(|p| p.contains("baz") && p.contains("foo"))
        .expect("child artifact present");
    assert!(parent_pos < child_pos);

    // The child reads the parent's already-materialized set name.
    assert_eq!(
        report.manifest.equipment_textures["bar"]["humanoid"],
        "foo:bar"
    );
}

#[test]
fn invariant_dependent_dropdown_cascade() {
    let pipeline = create_pipeline();
    let mut tool = tool_card(&pipeline, "Pick", "pick");

    // Defaults seeded on add: sword list, first variant selected.
    assert_eq!(tool.text("vanilla"), Some("minecraft:wooden_sword"));
    assert_eq!(tool.number("durability"), Some(59.0));

    // Switching the type repopulates the candidate list and reselects.
    tool.set_field("itemType", FieldValue::text("pickaxe")).unwrap();
    let choices = tool.choices("vanilla");
    assert_eq!(choices.len(), 6);
    assert_eq!(choices[0].value, "minecraft:wooden_pickaxe");
    assert_eq!(choices[0].label, "Wooden Pickaxe");
    assert_eq!(tool.text("vanilla"), Some("minecraft:wooden_pickaxe"));

    // Selecting from the refreshed list overwrites every dependent stat.
    tool.set_field("vanilla", FieldValue::text("minecraft:diamond_pickaxe"))
        .unwrap();
    assert_eq!(tool.number("durability"), Some(1561.0));
    assert_eq!(tool.number("enchantability"), Some(10.0));
    assert_eq!(tool.number("miningSpeed"), Some(8.0));
    assert_eq!(tool.text("harvestability"), Some("diamond"));
}

#[test]
fn invariant_horse_armor_joins_the_set_cascade() {
    let pipeline = create_pipeline();
    let settings = PackSettings::named("foo");

    let mut set = new_card(&pipeline, "armorSet");
    set.set_field("baseSet", FieldValue::text("diamond")).unwrap();
    set.set_field("setName", FieldValue::text("Emerald")).unwrap();
    let horse = set.add_child("Add Horse Armor").unwrap();

    // Name and stat cascades land on the fields horse armor declares.
    let piece = &set.children()[horse];
    assert_eq!(piece.text("itemName"), Some("Emerald Horse Armor"));
    assert_eq!(piece.text("itemId"), Some("emerald_horse_armor"));
    assert_eq!(piece.text("vanilla"), Some("minecraft:diamond_horse_armor"));
    assert_eq!(piece.number("armor"), Some(11.0));
    // Humanoid-only stats are dropped, not invented.
    assert!(!piece.has_field("durability"));
    assert!(!piece.has_field("enchantability"));

    let report = pipeline.generate(&[set], &settings).unwrap();
    assert!(report.skipped.is_empty());

    let def = text_artifact(&report, "data/foo/filament/item/emerald_horse_armor.json");
    assert!(def.contains("\"slot\": \"body\""));
    assert!(def.contains("\"asset_id\": \"foo:emerald\""));
    assert_eq!(
        report.manifest.equipment_textures["emerald"]["horse_body"],
        "foo:emerald"
    );
}

#[test]
fn invariant_horse_armor_without_vanilla_counterpart_keeps_defaults() {
    let pipeline = create_pipeline();

    let mut set = new_card(&pipeline, "armorSet");
    set.set_field("baseSet", FieldValue::text("netherite")).unwrap();
    let horse = set.add_child("Add Horse Armor").unwrap();

    // No netherite horse armor exists: the title still tracks the piece
    // type, and the declared armor default stands.
    let piece = &set.children()[horse];
    assert_eq!(piece.text("pieceTitle"), Some("Horse Armor"));
    assert_eq!(piece.text("vanilla"), None);
    assert_eq!(piece.number("armor"), Some(7.0));
}

#[test]
fn invariant_sword_rules_and_stat_displays() {
    let pipeline = create_pipeline();
    let settings = PackSettings::named("foo");
    let roots = vec![tool_card(&pipeline, "Sword", "sword")];

    let report = pipeline.generate(&roots, &settings).unwrap();
    let def = text_artifact(&report, "data/foo/filament/item/sword.json");

    assert!(def.contains("#minecraft:sword_efficient"));
    assert!(def.contains("#minecraft:sword_instantly_mines"));
    assert!(def.contains("minecraft:cobweb"));
    // Tooltip overrides show the configured stats, not the deltas.
    assert!(def.contains(" 4 Attack Damage"));
    assert!(def.contains(" -2.4 Attack Speed"));
    assert!(def.contains("dark_green"));
}

#[test]
fn invariant_axe_disables_blocking() {
    let pipeline = create_pipeline();
    let settings = PackSettings::named("foo");

    let mut axe = tool_card(&pipeline, "Axe", "axe");
    axe.set_field("itemType", FieldValue::text("axe")).unwrap();

    let report = pipeline.generate(&[axe], &settings).unwrap();
    let def = text_artifact(&report, "data/foo/filament/item/axe.json");

    assert!(def.contains("\"disable_blocking_for_seconds\": 5"));
    assert!(def.contains("stripper"));
    // Non-sword tools mine by material instead of the fixed sword rules.
    assert!(def.contains("#minecraft:mineable/axe"));
    assert!(!def.contains("sword_instantly_mines"));
}

#[test]
fn invariant_validation_is_advisory() {
    let pipeline = create_pipeline();
    let settings = PackSettings::named("foo");

    // itemName is required but empty: validation flags it, generation does
    // not care (only identifying fields gate a node).
    let mut tool = new_card(&pipeline, "tool");
    tool.set_field("itemId", FieldValue::text("quiet_sword")).unwrap();
    let roots = vec![tool];

    let report = pipeline.validate(&roots);
    assert!(!report.valid);
    assert!(report.violations.iter().any(|v| v.field == "itemName"));

    let generated = pipeline.generate(&roots, &settings).unwrap();
    assert!(generated.skipped.is_empty());
    assert!(!generated.manifest.is_empty());
}

#[test]
fn invariant_spec_instantiation_replays_cascades() {
    let pipeline = create_pipeline();

    let spec: CardSpec = serde_json::from_str(
        r#"{
            "template": "armorSet",
            "values": { "setName": { "text": "Emerald" }, "baseSet": { "text": "gold" } },
            "children": [
                { "button": "Add Helmet" },
                { "button": "Add Boots", "values": { "itemId": { "text": "lucky_boots" } } }
            ]
        }"#,
    )
    .unwrap();

    let card = pipeline.instantiate(&spec).unwrap();
    // Helmet inherited the derived id and the gold baseline.
    assert_eq!(card.children()[0].text("itemId"), Some("emerald_helmet"));
    assert_eq!(card.children()[0].number("durability"), Some(77.0));
    // Explicit child values override the derivation.
    assert_eq!(card.children()[1].text("itemId"), Some("lucky_boots"));
}

#[test]
fn invariant_child_only_template_rejected_at_top_level() {
    let pipeline = create_pipeline();
    let spec = CardSpec {
        template: "armorPiece".to_string(),
        values: Default::default(),
        children: Vec::new(),
    };
    let err = pipeline.instantiate(&spec).unwrap_err();
    assert!(err.to_string().contains("child-only"));
}

#[test]
fn invariant_unknown_template_is_an_error() {
    let pipeline = create_pipeline();
    let spec = CardSpec {
        template: "nonexistent".to_string(),
        values: Default::default(),
        children: Vec::new(),
    };
    let err = pipeline.instantiate(&spec).unwrap_err();
    assert!(err.to_string().contains("Template not found"));
}
