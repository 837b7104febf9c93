//! Vanilla Reference Tables
//!
//! Baseline stats the cascade hooks copy onto cards when a base set or base
//! item is picked. Compiled-in; nothing here is loaded at runtime.

#[derive(Debug, Clone, Copy)]
pub struct ArmorStats {
    pub vanilla: &'static str,
    pub durability: f64,
    pub enchantability: f64,
    pub armor: f64,
}

pub const ARMOR_PIECE_TYPES: [&str; 4] = ["helmet", "chestplate", "leggings", "boots"];

/// Baseline armor stats per (base set, piece type).
pub fn armor_stats(base_set: &str, piece_type: &str) -> Option<ArmorStats> {
    let (durability, enchantability, armor) = match (base_set, piece_type) {
        ("leather", "helmet") => (55.0, 15.0, 1.0),
        ("leather", "chestplate") => (80.0, 15.0, 3.0),
        ("leather", "leggings") => (75.0, 15.0, 2.0),
        ("leather", "boots") => (65.0, 15.0, 1.0),
        ("chainmail", "helmet") => (165.0, 12.0, 2.0),
        ("chainmail", "chestplate") => (240.0, 12.0, 5.0),
        ("chainmail", "leggings") => (225.0, 12.0, 4.0),
        ("chainmail", "boots") => (195.0, 12.0, 1.0),
        ("iron", "helmet") => (165.0, 9.0, 2.0),
        ("iron", "chestplate") => (240.0, 9.0, 6.0),
        ("iron", "leggings") => (225.0, 9.0, 5.0),
        ("iron", "boots") => (195.0, 9.0, 2.0),
        ("gold", "helmet") => (77.0, 25.0, 2.0),
        ("gold", "chestplate") => (112.0, 25.0, 5.0),
        ("gold", "leggings") => (105.0, 25.0, 3.0),
        ("gold", "boots") => (91.0, 25.0, 1.0),
        ("diamond", "helmet") => (363.0, 10.0, 3.0),
        ("diamond", "chestplate") => (528.0, 10.0, 8.0),
        ("diamond", "leggings") => (495.0, 10.0, 6.0),
        ("diamond", "boots") => (429.0, 10.0, 3.0),
        ("netherite", "helmet") => (407.0, 15.0, 3.0),
        ("netherite", "chestplate") => (592.0, 15.0, 8.0),
        ("netherite", "leggings") => (555.0, 15.0, 6.0),
        ("netherite", "boots") => (481.0, 15.0, 3.0),
        _ => return None,
    };
    let vanilla = match (base_set, piece_type) {
        ("leather", "helmet") => "minecraft:leather_helmet",
        ("leather", "chestplate") => "minecraft:leather_chestplate",
        ("leather", "leggings") => "minecraft:leather_leggings",
        ("leather", "boots") => "minecraft:leather_boots",
        ("chainmail", "helmet") => "minecraft:chainmail_helmet",
        ("chainmail", "chestplate") => "minecraft:chainmail_chestplate",
        ("chainmail", "leggings") => "minecraft:chainmail_leggings",
        ("chainmail", "boots") => "minecraft:chainmail_boots",
        ("iron", "helmet") => "minecraft:iron_helmet",
        ("iron", "chestplate") => "minecraft:iron_chestplate",
        ("iron", "leggings") => "minecraft:iron_leggings",
        ("iron", "boots") => "minecraft:iron_boots",
        ("gold", "helmet") => "minecraft:golden_helmet",
        ("gold", "chestplate") => "minecraft:golden_chestplate",
        ("gold", "leggings") => "minecraft:golden_leggings",
        ("gold", "boots") => "minecraft:golden_boots",
        ("diamond", "helmet") => "minecraft:diamond_helmet",
        ("diamond", "chestplate") => "minecraft:diamond_chestplate",
        ("diamond", "leggings") => "minecraft:diamond_leggings",
        ("diamond", "boots") => "minecraft:diamond_boots",
        ("netherite", "helmet") => "minecraft:netherite_helmet",
        ("netherite", "chestplate") => "minecraft:netherite_chestplate",
        ("netherite", "leggings") => "minecraft:netherite_leggings",
        ("netherite", "boots") => "minecraft:netherite_boots",
        _ => return None,
    };
    Some(ArmorStats {
        vanilla,
        durability,
        enchantability,
        armor,
    })
}

#[derive(Debug, Clone, Copy)]
pub struct HorseArmorStats {
    pub vanilla: &'static str,
    pub armor: f64,
}

/// Baseline horse armor stats per base set. Chainmail and netherite have no
/// vanilla horse armor, so those sets return `None` and leave the card's
/// values alone.
pub fn horse_armor_stats(base_set: &str) -> Option<HorseArmorStats> {
    let (vanilla, armor) = match base_set {
        "leather" => ("minecraft:leather_horse_armor", 3.0),
        "iron" => ("minecraft:iron_horse_armor", 5.0),
        "gold" => ("minecraft:golden_horse_armor", 7.0),
        "diamond" => ("minecraft:diamond_horse_armor", 11.0),
        _ => return None,
    };
    Some(HorseArmorStats { vanilla, armor })
}

#[derive(Debug, Clone, Copy)]
pub struct ToolStats {
    /// Material key, e.g. `diamond_pickaxe` minus the tool suffix.
    pub material: &'static str,
    pub vanilla: &'static str,
    pub durability: f64,
    pub enchantability: f64,
    pub damage: f64,
    pub speed: f64,
    pub harvestability: &'static str,
    pub mining_speed: f64,
}

const fn tool(
    material: &'static str,
    vanilla: &'static str,
    durability: f64,
    enchantability: f64,
    damage: f64,
    speed: f64,
    harvestability: &'static str,
    mining_speed: f64,
) -> ToolStats {
    ToolStats {
        material,
        vanilla,
        durability,
        enchantability,
        damage,
        speed,
        harvestability,
        mining_speed,
    }
}

const SWORDS: [ToolStats; 6] = [
    tool("wooden", "minecraft:wooden_sword", 59.0, 15.0, 4.0, -2.4, "wooden", 1.5),
    tool("stone", "minecraft:stone_sword", 131.0, 5.0, 5.0, -2.4, "stone", 1.5),
    tool("iron", "minecraft:iron_sword", 250.0, 14.0, 6.0, -2.4, "iron", 1.5),
    tool("golden", "minecraft:golden_sword", 32.0, 22.0, 4.0, -2.4, "gold", 1.5),
    tool("diamond", "minecraft:diamond_sword", 1561.0, 10.0, 7.0, -2.4, "diamond", 1.5),
    tool("netherite", "minecraft:netherite_sword", 2031.0, 15.0, 8.0, -2.4, "netherite", 1.5),
];

const PICKAXES: [ToolStats; 6] = [
    tool("wooden", "minecraft:wooden_pickaxe", 59.0, 15.0, 2.0, -2.8, "wooden", 2.0),
    tool("stone", "minecraft:stone_pickaxe", 131.0, 5.0, 3.0, -2.8, "stone", 4.0),
    tool("iron", "minecraft:iron_pickaxe", 250.0, 14.0, 4.0, -2.8, "iron", 6.0),
    tool("golden", "minecraft:golden_pickaxe", 32.0, 22.0, 2.0, -2.8, "gold", 12.0),
    tool("diamond", "minecraft:diamond_pickaxe", 1561.0, 10.0, 5.0, -2.8, "diamond", 8.0),
    tool("netherite", "minecraft:netherite_pickaxe", 2031.0, 15.0, 6.0, -2.8, "netherite", 9.0),
];

const AXES: [ToolStats; 6] = [
    tool("wooden", "minecraft:wooden_axe", 59.0, 15.0, 7.0, -3.2, "wooden", 2.0),
    tool("stone", "minecraft:stone_axe", 131.0, 5.0, 9.0, -3.2, "stone", 4.0),
    tool("iron", "minecraft:iron_axe", 250.0, 14.0, 9.0, -3.1, "iron", 6.0),
    tool("golden", "minecraft:golden_axe", 32.0, 22.0, 7.0, -3.0, "gold", 12.0),
    tool("diamond", "minecraft:diamond_axe", 1561.0, 10.0, 9.0, -3.0, "diamond", 8.0),
    tool("netherite", "minecraft:netherite_axe", 2031.0, 15.0, 10.0, -3.0, "netherite", 9.0),
];

const SHOVELS: [ToolStats; 6] = [
    tool("wooden", "minecraft:wooden_shovel", 59.0, 15.0, 2.5, -3.0, "wooden", 2.0),
    tool("stone", "minecraft:stone_shovel", 131.0, 5.0, 3.5, -3.0, "stone", 4.0),
    tool("iron", "minecraft:iron_shovel", 250.0, 14.0, 4.5, -3.0, "iron", 6.0),
    tool("golden", "minecraft:golden_shovel", 32.0, 22.0, 2.5, -3.0, "gold", 12.0),
    tool("diamond", "minecraft:diamond_shovel", 1561.0, 10.0, 5.5, -3.0, "diamond", 8.0),
    tool("netherite", "minecraft:netherite_shovel", 2031.0, 15.0, 6.5, -3.0, "netherite", 9.0),
];

const HOES: [ToolStats; 6] = [
    tool("wooden", "minecraft:wooden_hoe", 59.0, 15.0, 1.0, -3.0, "wooden", 2.0),
    tool("stone", "minecraft:stone_hoe", 131.0, 5.0, 1.0, -2.0, "stone", 4.0),
    tool("iron", "minecraft:iron_hoe", 250.0, 14.0, 1.0, -1.0, "iron", 6.0),
    tool("golden", "minecraft:golden_hoe", 32.0, 22.0, 1.0, -3.0, "gold", 12.0),
    tool("diamond", "minecraft:diamond_hoe", 1561.0, 10.0, 1.0, 0.0, "diamond", 8.0),
    tool("netherite", "minecraft:netherite_hoe", 2031.0, 15.0, 1.0, 0.0, "netherite", 9.0),
];

/// Baseline variants for a tool type, in vanilla progression order.
pub fn tool_variants(tool_type: &str) -> &'static [ToolStats] {
    match tool_type {
        "sword" => &SWORDS,
        "pickaxe" => &PICKAXES,
        "axe" => &AXES,
        "shovel" => &SHOVELS,
        "hoe" => &HOES,
        _ => &[],
    }
}

/// Find a tool variant by its vanilla item id.
pub fn tool_stats(tool_type: &str, vanilla_id: &str) -> Option<ToolStats> {
    tool_variants(tool_type)
        .iter()
        .find(|s| s.vanilla == vanilla_id)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_base_set_covers_every_piece() {
        for base in ["leather", "chainmail", "iron", "gold", "diamond", "netherite"] {
            for piece in ARMOR_PIECE_TYPES {
                assert!(armor_stats(base, piece).is_some(), "{base}/{piece}");
            }
        }
    }

    #[test]
    fn unknown_combination_is_none() {
        assert!(armor_stats("emerald", "helmet").is_none());
        assert!(armor_stats("iron", "horse_armor").is_none());
    }

    #[test]
    fn horse_armor_only_for_sets_with_a_vanilla_item() {
        assert_eq!(
            horse_armor_stats("diamond").map(|s| s.armor),
            Some(11.0)
        );
        assert_eq!(
            horse_armor_stats("gold").map(|s| s.vanilla),
            Some("minecraft:golden_horse_armor")
        );
        assert!(horse_armor_stats("chainmail").is_none());
        assert!(horse_armor_stats("netherite").is_none());
    }

    #[test]
    fn tool_lookup_by_vanilla_id() {
        let stats = tool_stats("pickaxe", "minecraft:diamond_pickaxe").unwrap();
        assert_eq!(stats.durability, 1561.0);
        assert_eq!(stats.harvestability, "diamond");
        assert!(tool_stats("pickaxe", "minecraft:diamond_sword").is_none());
    }

    #[test]
    fn every_tool_type_has_six_variants() {
        for tool_type in ["sword", "pickaxe", "axe", "shovel", "hoe"] {
            assert_eq!(tool_variants(tool_type).len(), 6, "{tool_type}");
        }
        assert!(tool_variants("wand").is_empty());
    }
}
