use isle_blocks::config::{BlockDef, BlocksConfig, TexturesDef};
use isle_blocks::{Block, BlockRegistry, FaceRole, RenderKind};
use proptest::prelude::*;

fn assets_registry() -> BlockRegistry {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    BlockRegistry::load_from_path(root.join("../../assets/voxels/blocks.toml"))
        .expect("load shipped blocks.toml")
}

fn def(id: u8, name: &str) -> BlockDef {
    BlockDef {
        id,
        name: name.into(),
        transparent: false,
        textures: TexturesDef::default(),
        render: None,
        collidable: None,
    }
}

#[test]
fn shipped_blocks_load() {
    let reg = assets_registry();
    assert_eq!(reg.id_by_name("air"), Some(0));
    let water = reg.expect_type(reg.id_by_name("water").unwrap());
    assert!(water.transparent);
    assert_eq!(water.behavior.render, RenderKind::Liquid);
    assert!(!water.behavior.collidable);
    let grass = reg.expect_type(reg.id_by_name("grass").unwrap());
    assert_eq!(grass.texture_for(FaceRole::Top), Some("grass_top"));
    assert_eq!(grass.texture_for(FaceRole::Side), Some("grass_side"));
    assert_eq!(grass.texture_for(FaceRole::Bottom), Some("dirt"));
    let leaf = reg.expect_type(reg.id_by_name("leaf").unwrap());
    assert!(leaf.transparent);
    assert_eq!(leaf.behavior.render, RenderKind::Cube);
    assert!(leaf.behavior.collidable);
}

#[test]
fn air_defaults_to_empty_behavior() {
    let reg = assets_registry();
    let air = reg.behavior(Block::AIR);
    assert!(air.is_empty());
    assert!(!air.collidable);
    assert!(reg.is_transparent(Block::AIR));
}

#[test]
#[should_panic(expected = "block id 42 is not registered")]
fn behavior_of_unregistered_id_panics() {
    assets_registry().behavior(Block::new(42));
}

#[test]
#[should_panic(expected = "block id 42 is not registered")]
fn transparency_of_unregistered_id_panics() {
    assets_registry().is_transparent(Block::new(42));
}

#[test]
fn render_kind_parses_from_toml() {
    let reg = BlockRegistry::from_toml_str(
        r#"
        [[blocks]]
        id = 0
        name = "air"

        [[blocks]]
        id = 1
        name = "lava"
        render = "liquid"

        [[blocks]]
        id = 2
        name = "barrier"
        render = "none"
        collidable = true
        "#,
    )
    .unwrap();
    let lava = reg.behavior(Block::new(1));
    assert_eq!(lava.render, RenderKind::Liquid);
    assert!(!lava.collidable);
    let barrier = reg.behavior(Block::new(2));
    assert!(barrier.is_empty());
    assert!(barrier.collidable);
}

#[test]
fn toml_and_json_agree() {
    let toml_reg = BlockRegistry::from_toml_str(
        r#"
        [[blocks]]
        id = 0
        name = "Air"
        transparent = true

        [[blocks]]
        id = 3
        name = "Glass"
        transparent = true
        textures = { top = "g_top", bottom = "g_bot", side = "g_side" }
    "#,
    )
    .expect("toml");
    let json_reg = BlockRegistry::from_json_str(
        r#"{"blocks": [
            {"id": 0, "name": "Air", "transparant": true, "textures": {}},
            {"id": 3, "name": "Glass", "transparant": true,
             "textures": {"top": "g_top", "bottom": "g_bot", "side": "g_side"}}
        ]}"#,
    )
    .expect("json");
    for reg in [&toml_reg, &json_reg] {
        // Names are normalized to lowercase; lookups are case-insensitive
        assert_eq!(reg.id_by_name("glass"), Some(3));
        assert_eq!(reg.id_by_name("GLASS"), Some(3));
        let glass = reg.expect_type(3);
        assert_eq!(glass.name, "glass");
        assert!(glass.transparent);
        assert_eq!(glass.texture_for(FaceRole::Bottom), Some("g_bot"));
        assert!(reg.get(1).is_none());
        assert_eq!(reg.len(), 2);
    }
}

#[test]
fn explicit_render_overrides_name_default() {
    let mut water = def(1, "water");
    water.render = Some(RenderKind::Cube);
    let reg = BlockRegistry::from_config(BlocksConfig {
        blocks: vec![def(0, "air"), water],
    })
    .unwrap();
    let b = reg.expect_type(1).behavior;
    assert_eq!(b.render, RenderKind::Cube);
    assert!(b.collidable);
}

#[test]
fn rejects_empty_list() {
    assert!(BlockRegistry::from_config(BlocksConfig { blocks: vec![] }).is_err());
}

#[test]
fn rejects_duplicate_id() {
    let cfg = BlocksConfig {
        blocks: vec![def(0, "air"), def(1, "stone"), def(1, "dirt")],
    };
    let err = BlockRegistry::from_config(cfg).unwrap_err();
    assert!(err.to_string().contains("duplicate block id 1"));
}

#[test]
fn rejects_duplicate_name_ignoring_case() {
    let cfg = BlocksConfig {
        blocks: vec![def(0, "air"), def(1, "Stone"), def(2, "stone")],
    };
    let err = BlockRegistry::from_config(cfg).unwrap_err();
    assert!(err.to_string().contains("duplicate block name"));
}

#[test]
fn rejects_missing_air() {
    let cfg = BlocksConfig {
        blocks: vec![def(1, "stone")],
    };
    assert!(BlockRegistry::from_config(cfg).is_err());
}

#[test]
fn texture_names_are_sorted_and_unique() {
    let reg = assets_registry();
    let names = reg.texture_names();
    let mut sorted = names.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(names, sorted);
    assert!(names.contains(&"dirt".to_string()));
    assert!(!names.contains(&"water".to_string()));
}

#[test]
#[should_panic]
fn expect_type_panics_on_unknown_id() {
    let reg = assets_registry();
    let _ = reg.expect_type(200);
}

proptest! {
    // Any set of distinct ids containing 0 loads, and every id resolves back to its name.
    #[test]
    fn distinct_ids_resolve(ids in prop::collection::btree_set(1u8..=255, 0..24)) {
        let mut blocks = vec![def(0, "air")];
        for id in &ids {
            blocks.push(def(*id, &format!("b{id}")));
        }
        let reg = BlockRegistry::from_config(BlocksConfig { blocks }).unwrap();
        prop_assert_eq!(reg.len(), ids.len() + 1);
        for id in ids {
            prop_assert_eq!(reg.id_by_name(&format!("b{id}")), Some(id));
            prop_assert_eq!(reg.expect_type(id).behavior.render, RenderKind::Cube);
        }
    }
}
