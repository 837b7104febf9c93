//! Armor Set, Armor Piece, and Horse Armor Templates
//!
//! An armor set is a parent card whose child slot hosts the individual
//! pieces, including horse armor. The set name cascades derived item names
//! and ids onto every piece, and the base-set choice cascades baseline
//! stats from the vanilla reference table. Piece ids hand-edited away from
//! the derived `<set>_<piece>` pattern are left alone.

use serde_json::json;

use super::vanilla::{armor_stats, horse_armor_stats};
use super::{num, qualify, slugify, title_case};
use crate::card::CardInstance;
use crate::context::{GenerationContext, Skip};
use crate::fields::{Choice, Field, FieldValue};
use crate::sink::ArtifactSink;
use crate::templates::{ChildButton, ChildSlot, Template};

fn piece_slot(piece_type: &str) -> Option<&'static str> {
    match piece_type {
        "helmet" => Some("head"),
        "chestplate" => Some("chest"),
        "leggings" => Some("legs"),
        "boots" => Some("feet"),
        _ => None,
    }
}

fn piece_tag(piece_type: &str) -> Option<&'static str> {
    match piece_type {
        "helmet" => Some("head_armor"),
        "chestplate" => Some("chest_armor"),
        "leggings" => Some("leg_armor"),
        "boots" => Some("foot_armor"),
        _ => None,
    }
}

/// Cascade: set name changed, re-derive every piece's name and id.
fn update_piece_names(card: &mut CardInstance) {
    let set_name = match card.text("setName") {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => return,
    };
    for index in 0..card.children().len() {
        apply_name_to_piece(card, index, &set_name);
    }
}

fn apply_name_to_piece(card: &mut CardInstance, index: usize, set_name: &str) {
    let piece_type = match card.children()[index].option("piece_type") {
        Some(p) => p.to_string(),
        None => return,
    };
    let derived_id = format!("{}_{piece_type}", slugify(set_name));
    let derived_name = format!("{set_name} {}", title_case(&piece_type));

    let piece = &mut card.children_mut()[index];
    piece.write_field("itemName", FieldValue::text(derived_name));

    // Preserve hand-edits: only overwrite an id that is empty or still
    // carries the previous derivation's `_<piece_type>` suffix.
    let current_id = piece.text("itemId").unwrap_or("");
    if current_id.is_empty() || current_id.ends_with(&format!("_{piece_type}")) {
        piece.write_field("itemId", FieldValue::text(derived_id));
    }
}

/// Cascade: base vanilla set changed, overwrite every piece's baseline stats.
fn update_piece_stats(card: &mut CardInstance) {
    let base_set = match card.text("baseSet") {
        Some(base) => base.to_string(),
        None => return,
    };
    for index in 0..card.children().len() {
        apply_stats_to_piece(card, index, &base_set);
    }
}

fn apply_stats_to_piece(card: &mut CardInstance, index: usize, base_set: &str) {
    let piece_type = match card.children()[index].option("piece_type") {
        Some(p) => p.to_string(),
        None => return,
    };
    // The title always tracks the piece type, even when the base set has no
    // stats for it.
    card.children_mut()[index]
        .write_field("pieceTitle", FieldValue::text(title_case(&piece_type)));

    if piece_type == "horse_armor" {
        let stats = match horse_armor_stats(base_set) {
            Some(stats) => stats,
            None => return,
        };
        let piece = &mut card.children_mut()[index];
        piece.write_field("vanilla", FieldValue::text(stats.vanilla));
        piece.write_field("armor", FieldValue::Number(stats.armor));
        return;
    }

    let stats = match armor_stats(base_set, &piece_type) {
        Some(stats) => stats,
        None => return,
    };
    let piece = &mut card.children_mut()[index];
    piece.write_field("vanilla", FieldValue::text(stats.vanilla));
    piece.write_field("durability", FieldValue::Number(stats.durability));
    piece.write_field("enchantability", FieldValue::Number(stats.enchantability));
    piece.write_field("armor", FieldValue::Number(stats.armor));
}

pub struct ArmorSetTemplate {
    fields: Vec<Field>,
    slot: ChildSlot,
}

impl ArmorSetTemplate {
    pub fn new() -> Self {
        let fields = vec![
            Field::text("setName", "Armor Set Name")
                .required()
                .on_change(update_piece_names),
            Field::choice(
                "baseSet",
                "Base Vanilla Set",
                vec![
                    Choice::new("leather", "Leather"),
                    Choice::new("chainmail", "Chainmail"),
                    Choice::new("iron", "Iron"),
                    Choice::new("gold", "Gold"),
                    Choice::new("diamond", "Diamond"),
                    Choice::new("netherite", "Netherite"),
                ],
            )
            .with_default(FieldValue::text("iron"))
            .on_change(update_piece_stats),
            Field::text("repairItem", "Repair Item"),
            Field::file("wornTextureFile", "Worn Armor Texture (Set)", "image/png"),
            Field::file(
                "wornLeggingsTextureFile",
                "Worn Leggings Texture (Set)",
                "image/png",
            ),
        ];

        let piece = std::sync::Arc::new(ArmorPieceTemplate::new());
        let slot = ChildSlot::new(
            "Armor Pieces",
            vec![
                ChildButton::new("Add Helmet", piece.clone()).option("piece_type", "helmet"),
                ChildButton::new("Add Chestplate", piece.clone())
                    .option("piece_type", "chestplate"),
                ChildButton::new("Add Leggings", piece.clone()).option("piece_type", "leggings"),
                ChildButton::new("Add Boots", piece).option("piece_type", "boots"),
                ChildButton::new("Add Horse Armor", std::sync::Arc::new(HorseArmorTemplate::new()))
                    .option("piece_type", "horse_armor"),
            ],
        );

        Self { fields, slot }
    }
}

impl Default for ArmorSetTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl Template for ArmorSetTemplate {
    fn id(&self) -> &str {
        "armorSet"
    }

    fn name(&self) -> &str {
        "Armor Set"
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn child_slot(&self) -> Option<&ChildSlot> {
        Some(&self.slot)
    }

    fn on_card_added(&self, card: &mut CardInstance) {
        update_piece_stats(card);
    }

    fn on_child_added(&self, card: &mut CardInstance, child: usize) {
        if let Some(base_set) = card.text("baseSet").map(str::to_string) {
            apply_stats_to_piece(card, child, &base_set);
        }
        if let Some(set_name) = card.text("setName").map(str::to_string) {
            if !set_name.trim().is_empty() {
                apply_name_to_piece(card, child, set_name.trim());
            }
        }
    }

    fn on_generate(
        &self,
        ctx: &GenerationContext<'_>,
        sink: &mut ArtifactSink,
    ) -> Result<(), Skip> {
        let namespace = ctx
            .settings()
            .namespace()
            .ok_or_else(|| Skip::missing("a pack namespace"))?;
        let set_name = ctx
            .text("setName")
            .map(slugify)
            .ok_or_else(|| Skip::missing("a set name"))?;

        if let Some(texture) = ctx.binary("wornTextureFile") {
            sink.create_file(
                format!("assets/{namespace}/textures/entity/equipment/humanoid/{set_name}.png"),
                texture,
            );
        }
        if let Some(texture) = ctx.binary("wornLeggingsTextureFile") {
            sink.create_file(
                format!(
                    "assets/{namespace}/textures/entity/equipment/humanoid_leggings/{set_name}.png"
                ),
                texture,
            );
        }

        sink.add_equipment_texture(&set_name, "humanoid", format!("{namespace}:{set_name}"));
        sink.add_equipment_texture(
            &set_name,
            "humanoid_leggings",
            format!("{namespace}:{set_name}"),
        );
        Ok(())
    }
}

pub struct ArmorPieceTemplate {
    fields: Vec<Field>,
}

impl ArmorPieceTemplate {
    pub fn new() -> Self {
        let fields = vec![
            Field::title("pieceTitle"),
            Field::text("itemName", "Item Name").required(),
            Field::text("itemId", "Item ID").required(),
            Field::text("vanilla", "Base Vanilla Item"),
            Field::number("durability", "Durability")
                .with_default(FieldValue::Number(165.0))
                .required()
                .range(Some(1.0), None),
            Field::number("enchantability", "Enchantability")
                .with_default(FieldValue::Number(9.0))
                .required()
                .range(Some(0.0), None),
            Field::number("armor", "Armor Points")
                .with_default(FieldValue::Number(2.0))
                .required()
                .range(Some(0.0), None),
            Field::file("textureFile", "Item Texture (.png)", "image/png"),
        ];
        Self { fields }
    }
}

impl Default for ArmorPieceTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl Template for ArmorPieceTemplate {
    fn id(&self) -> &str {
        "armorPiece"
    }

    fn name(&self) -> &str {
        "Armor Piece"
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn child_only(&self) -> bool {
        true
    }

    fn on_generate(
        &self,
        ctx: &GenerationContext<'_>,
        sink: &mut ArtifactSink,
    ) -> Result<(), Skip> {
        let namespace = ctx
            .settings()
            .namespace()
            .ok_or_else(|| Skip::missing("a pack namespace"))?;
        let id = ctx.text("itemId").ok_or_else(|| Skip::missing("an item ID"))?;
        let piece_type = ctx
            .option("piece_type")
            .ok_or_else(|| Skip::missing("a piece type"))?;
        let slot = piece_slot(piece_type)
            .ok_or_else(|| Skip::new(format!("unknown piece type '{piece_type}'")))?;

        let item_name = ctx.text("itemName").unwrap_or(id);
        let set_name = ctx
            .parent()
            .and_then(|parent| parent.text("setName"))
            .map(slugify)
            .unwrap_or_default();

        let mut item_def = json!({
            "id": format!("{namespace}:{id}"),
            "vanillaItem": ctx.text("vanilla"),
            "itemResource": {
                "models": { "default": format!("{namespace}:item/{id}") }
            },
            "properties": {
                "stackSize": 1,
                "durability": num(ctx.number("durability").unwrap_or(1.0)),
            },
            "translations": { "en_us": item_name },
            "components": {
                "minecraft:equippable": {
                    "slot": slot,
                    "asset_id": format!("{namespace}:{set_name}"),
                },
                "minecraft:enchantable": {
                    "value": num(ctx.number("enchantability").unwrap_or(0.0)),
                },
                "minecraft:repair_cost": 0,
                "minecraft:attribute_modifiers": [{
                    "type": "minecraft:armor",
                    "slot": slot,
                    "id": format!("{namespace}:{id}_armor"),
                    "amount": num(ctx.number("armor").unwrap_or(0.0)),
                    "operation": "add_value",
                }],
            },
        });

        // Repair item lives on the parent set card.
        if let Some(repair) = ctx.parent().and_then(|parent| parent.text("repairItem")) {
            item_def["components"]["minecraft:repairable"] = json!({
                "items": [qualify(repair)],
            });
        }
        if let Some(group) = ctx.settings().qualified_group_id() {
            item_def["group"] = json!(group);
        }

        sink.create_file(
            format!("data/{namespace}/filament/item/{id}.json"),
            serde_json::to_string_pretty(&item_def).unwrap_or_default(),
        );
        sink.create_file(
            format!("assets/{namespace}/models/item/{id}.json"),
            serde_json::to_string_pretty(&json!({
                "parent": "minecraft:item/generated",
                "textures": { "layer0": format!("{namespace}:item/{id}") },
            }))
            .unwrap_or_default(),
        );

        if let Some(texture) = ctx.binary("textureFile") {
            sink.create_file(format!("assets/{namespace}/textures/item/{id}.png"), texture);
        }

        if let Some(tag) = piece_tag(piece_type) {
            sink.add_tag("minecraft", tag, format!("{namespace}:{id}"));
        }
        Ok(())
    }
}

/// Body-slot armor for horses. Unlike the humanoid pieces it has no
/// durability or enchantability, so the set-level stat cascade only lands
/// on the fields this template actually declares.
pub struct HorseArmorTemplate {
    fields: Vec<Field>,
}

impl HorseArmorTemplate {
    pub fn new() -> Self {
        let fields = vec![
            Field::title("pieceTitle"),
            Field::text("itemName", "Item Name").required(),
            Field::text("itemId", "Item ID").required(),
            Field::text("vanilla", "Base Vanilla Item"),
            Field::number("armor", "Armor Points")
                .with_default(FieldValue::Number(7.0))
                .required()
                .range(Some(0.0), None),
            Field::file("textureFile", "Item Texture (.png)", "image/png"),
            Field::file("wornTextureFile", "Worn Horse Armor Texture", "image/png"),
        ];
        Self { fields }
    }
}

impl Default for HorseArmorTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl Template for HorseArmorTemplate {
    fn id(&self) -> &str {
        "horseArmor"
    }

    fn name(&self) -> &str {
        "Horse Armor"
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn child_only(&self) -> bool {
        true
    }

    fn on_generate(
        &self,
        ctx: &GenerationContext<'_>,
        sink: &mut ArtifactSink,
    ) -> Result<(), Skip> {
        let namespace = ctx
            .settings()
            .namespace()
            .ok_or_else(|| Skip::missing("a pack namespace"))?;
        let id = ctx.text("itemId").ok_or_else(|| Skip::missing("an item ID"))?;
        let item_name = ctx.text("itemName").unwrap_or(id);
        let set_name = ctx
            .parent()
            .and_then(|parent| parent.text("setName"))
            .map(slugify)
            .unwrap_or_default();

        let mut item_def = json!({
            "id": format!("{namespace}:{id}"),
            "vanillaItem": ctx.text("vanilla"),
            "itemResource": {
                "models": { "default": format!("{namespace}:item/{id}") }
            },
            "properties": { "stackSize": 1 },
            "translations": { "en_us": item_name },
            "components": {
                "minecraft:equippable": {
                    "slot": "body",
                    "asset_id": format!("{namespace}:{set_name}"),
                },
                "minecraft:attribute_modifiers": [{
                    "type": "minecraft:armor",
                    "slot": "body",
                    "id": format!("{namespace}:{id}_armor"),
                    "amount": num(ctx.number("armor").unwrap_or(0.0)),
                    "operation": "add_value",
                }],
            },
        });
        if let Some(group) = ctx.settings().qualified_group_id() {
            item_def["group"] = json!(group);
        }

        sink.create_file(
            format!("data/{namespace}/filament/item/{id}.json"),
            serde_json::to_string_pretty(&item_def).unwrap_or_default(),
        );
        sink.create_file(
            format!("assets/{namespace}/models/item/{id}.json"),
            serde_json::to_string_pretty(&json!({
                "parent": "minecraft:item/generated",
                "textures": { "layer0": format!("{namespace}:item/{id}") },
            }))
            .unwrap_or_default(),
        );

        if let Some(texture) = ctx.binary("textureFile") {
            sink.create_file(format!("assets/{namespace}/textures/item/{id}.png"), texture);
        }
        if let Some(texture) = ctx.binary("wornTextureFile") {
            sink.create_file(
                format!("assets/{namespace}/textures/entity/equipment/horse_body/{set_name}.png"),
                texture,
            );
        }

        sink.add_equipment_texture(&set_name, "horse_body", format!("{namespace}:{set_name}"));
        Ok(())
    }
}
