//! Tool Template
//!
//! The tool type drives the base-item dropdown (populate the candidate list,
//! then select the first entry), and the base-item selection drives the
//! numeric stats via the vanilla reference table.

use serde_json::json;

use super::vanilla::{tool_stats, tool_variants};
use super::{num, qualify, title_case};
use crate::card::CardInstance;
use crate::context::{GenerationContext, Skip};
use crate::fields::{Choice, Field, FieldValue};
use crate::sink::ArtifactSink;
use crate::templates::Template;

fn tool_tag(tool_type: &str) -> Option<&'static str> {
    match tool_type {
        "sword" => Some("swords"),
        "pickaxe" => Some("pickaxes"),
        "axe" => Some("axes"),
        "shovel" => Some("shovels"),
        "hoe" => Some("hoes"),
        _ => None,
    }
}

/// Cascade: tool type changed. Refresh the base-item candidate list, select
/// its first entry, then pull that entry's stats.
fn update_tool_type(card: &mut CardInstance) {
    let tool_type = match card.text("itemType") {
        Some(t) => t.to_string(),
        None => return,
    };
    let variants = tool_variants(&tool_type);
    let choices: Vec<Choice> = variants
        .iter()
        .map(|v| Choice::new(v.vanilla, title_case(&format!("{}_{tool_type}", v.material))))
        .collect();
    card.set_choices("vanilla", choices);
    if let Some(first) = variants.first() {
        card.write_field("vanilla", FieldValue::text(first.vanilla));
    }
    update_tool_stats(card);
}

/// Cascade: base item changed. Copy its baseline stats onto the card.
fn update_tool_stats(card: &mut CardInstance) {
    let tool_type = match card.text("itemType") {
        Some(t) => t.to_string(),
        None => return,
    };
    let vanilla_id = match card.text("vanilla") {
        Some(v) => v.to_string(),
        None => return,
    };
    let stats = match tool_stats(&tool_type, &vanilla_id) {
        Some(stats) => stats,
        None => return,
    };
    card.write_field("durability", FieldValue::Number(stats.durability));
    card.write_field("enchantability", FieldValue::Number(stats.enchantability));
    card.write_field("damage", FieldValue::Number(stats.damage));
    card.write_field("speed", FieldValue::Number(stats.speed));
    card.write_field("harvestability", FieldValue::text(stats.harvestability));
    card.write_field("miningSpeed", FieldValue::Number(stats.mining_speed));
}

pub struct ToolTemplate {
    fields: Vec<Field>,
}

impl ToolTemplate {
    pub fn new() -> Self {
        let fields = vec![
            Field::text("itemName", "Item Name").required(),
            Field::text("itemId", "Item ID").required(),
            Field::choice(
                "itemType",
                "Tool Type",
                vec![
                    Choice::new("sword", "Sword"),
                    Choice::new("pickaxe", "Pickaxe"),
                    Choice::new("axe", "Axe"),
                    Choice::new("shovel", "Shovel"),
                    Choice::new("hoe", "Hoe"),
                ],
            )
            .on_change(update_tool_type),
            Field::choice("vanilla", "Base Vanilla Item", Vec::new())
                .on_change(update_tool_stats),
            Field::number("durability", "Durability")
                .with_default(FieldValue::Number(250.0))
                .required()
                .range(Some(1.0), Some(2147483647.0)),
            Field::number("enchantability", "Enchantability")
                .with_default(FieldValue::Number(14.0))
                .required()
                .range(Some(0.0), None),
            Field::number("damage", "Attack Damage")
                .with_default(FieldValue::Number(6.0))
                .required()
                .range(Some(0.0), None),
            Field::number("speed", "Attack Speed")
                .with_default(FieldValue::Number(-2.4))
                .required(),
            Field::number("miningSpeed", "Mining Speed")
                .with_default(FieldValue::Number(1.0))
                .range(Some(0.0), None),
            Field::choice(
                "harvestability",
                "Harvest Level",
                vec![
                    Choice::new("wooden", "Wooden"),
                    Choice::new("stone", "Stone"),
                    Choice::new("iron", "Iron"),
                    Choice::new("gold", "Golden"),
                    Choice::new("diamond", "Diamond"),
                    Choice::new("netherite", "Netherite"),
                ],
            ),
            Field::text("repairItem", "Repair Item"),
            Field::file("textureFile", "Item Texture (.png)", "image/png"),
        ];
        Self { fields }
    }
}

impl Default for ToolTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl Template for ToolTemplate {
    fn id(&self) -> &str {
        "tool"
    }

    fn name(&self) -> &str {
        "Tool"
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn on_card_added(&self, card: &mut CardInstance) {
        update_tool_type(card);
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
        let tool_type = ctx
            .text("itemType")
            .ok_or_else(|| Skip::missing("a tool type"))?;
        let item_name = ctx.text("itemName").unwrap_or(id);

        let full_id = format!("{namespace}:{id}");
        let damage = ctx.number("damage").unwrap_or(0.0);
        let speed = ctx.number("speed").unwrap_or(0.0);

        let mut item_def = json!({
            "id": full_id.as_str(),
            "vanillaItem": ctx.text("vanilla"),
            "itemResource": {
                "models": { "default": format!("{namespace}:item/{id}") }
            },
            "properties": {
                "stackSize": 1,
                "durability": num(ctx.number("durability").unwrap_or(1.0)),
            },
            "translations": { "en_us": item_name },
            "behaviors": {},
            "components": {
                "minecraft:enchantable": {
                    "value": num(ctx.number("enchantability").unwrap_or(0.0)),
                },
                "minecraft:weapon": {},
                "minecraft:attribute_modifiers": [
                    {
                        "type": "minecraft:attack_damage",
                        "slot": "mainhand",
                        "id": format!("{namespace}:{id}_attack_damage"),
                        "amount": num(damage - 1.0),
                        "operation": "add_value",
                        // Show the configured value, not the vanilla-relative delta.
                        "display": {
                            "type": "override",
                            "value": ["", {
                                "color": "dark_green",
                                "text": format!(" {} Attack Damage", num(damage)),
                            }],
                        },
                    },
                    {
                        "type": "minecraft:attack_speed",
                        "slot": "mainhand",
                        "id": format!("{namespace}:{id}_attack_speed"),
                        "amount": num(speed - 4.0),
                        "operation": "add_value",
                        "display": {
                            "type": "override",
                            "value": ["", {
                                "color": "dark_green",
                                "text": format!(" {} Attack Speed", num(speed)),
                            }],
                        },
                    },
                ],
            },
        });

        if let Some(repair) = ctx.text("repairItem") {
            item_def["components"]["minecraft:repairable"] = json!({
                "items": [qualify(repair)],
            });
        }

        // Swords get fixed cutting rules; everything else mines by material.
        if tool_type == "sword" {
            item_def["components"]["minecraft:tool"] = json!({
                "can_destroy_blocks_in_creative": false,
                "rules": [
                    {
                        "blocks": "#minecraft:sword_efficient",
                        "speed": 1.5,
                        "correct_for_drops": true,
                    },
                    {
                        "blocks": "#minecraft:sword_instantly_mines",
                        "speed": 30,
                        "correct_for_drops": true,
                    },
                    {
                        "blocks": "minecraft:cobweb",
                        "speed": 20,
                        "correct_for_drops": true,
                    },
                ],
            });
        } else {
            let harvest = ctx.text("harvestability").unwrap_or("wooden");
            item_def["components"]["minecraft:tool"] = json!({
                "default_mining_speed": 1,
                "rules": [
                    {
                        "blocks": format!("#minecraft:incorrect_for_{harvest}_tool"),
                        "correct_for_drops": false,
                    },
                    {
                        "blocks": format!("#minecraft:mineable/{tool_type}"),
                        "speed": num(ctx.number("miningSpeed").unwrap_or(1.0)),
                        "correct_for_drops": true,
                    },
                ],
            });
        }

        match tool_type {
            "axe" => {
                item_def["components"]["minecraft:weapon"]["disable_blocking_for_seconds"] =
                    json!(5);
                item_def["behaviors"]["stripper"] = json!({});
            }
            "shovel" => item_def["behaviors"]["shovel"] = json!({}),
            "hoe" => item_def["behaviors"]["hoe"] = json!({}),
            _ => {}
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
                "parent": "minecraft:item/handheld",
                "textures": { "layer0": format!("{namespace}:item/{id}") },
            }))
            .unwrap_or_default(),
        );

        if let Some(texture) = ctx.binary("textureFile") {
            sink.create_file(format!("assets/{namespace}/textures/item/{id}.png"), texture);
        }

        if let Some(tag) = tool_tag(tool_type) {
            sink.add_tag("minecraft", tag, full_id);
        }
        Ok(())
    }
}
