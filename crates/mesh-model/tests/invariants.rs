use mesh_fixed::{fp, Vec2Fp};
use mesh_model::entity::{Entity, EntityKind, ZoomState};
use mesh_model::ids::EntityId;
use mesh_model::invariants::check_all;
use mesh_model::world::WorldState;

fn base_entity(id: &str) -> Entity {
    Entity {
        id: EntityId::from(id),
        kind: EntityKind::Generic,
        player_id: None,
        position: Vec2Fp::ZERO,
        velocity: Vec2Fp::ZERO,
        heading: fp(0.0),
        thrust: fp(0.0),
        mass: fp(1000.0),
        volume: fp(10.0),
        fuel_mass: fp(200.0),
        volatiles_mass: fp(0.0),
        reach: fp(50.0),
        airlock_sealed: false,
        optic_level: 0,
        parent_id: None,
        is_container: false,
        container_volume: fp(0.0),
        in_opacity: fp(0.0),
        weld_parent_id: None,
        relative_offset: None,
        orbit_target_id: None,
        zoom_state: ZoomState::Space,
    }
}

#[test]
fn clean_world_has_no_violations() {
    let mut world = WorldState::new("seed");
    world.upsert_entity(base_entity("a"));
    assert!(check_all(&world).is_empty());
}

#[test]
fn containment_cycle_is_detected() {
    let mut world = WorldState::new("seed");
    let mut a = base_entity("a");
    a.parent_id = Some(EntityId::from("b"));
    let mut b = base_entity("b");
    b.parent_id = Some(EntityId::from("a"));
    world.upsert_entity(a);
    world.upsert_entity(b);
    let violations = check_all(&world);
    assert!(violations
        .iter()
        .any(|v| matches!(v, mesh_model::ModelError::ContainmentCycle { .. })));
}

#[test]
fn position_binding_violation_is_detected() {
    let mut world = WorldState::new("seed");
    let container = base_entity("c");
    let mut child = base_entity("x");
    child.parent_id = Some(EntityId::from("c"));
    child.position = Vec2Fp::new(fp(5.0), fp(0.0));
    world.upsert_entity(container);
    world.upsert_entity(child);
    let violations = check_all(&world);
    assert!(violations
        .iter()
        .any(|v| matches!(v, mesh_model::ModelError::PositionBindingViolated { .. })));
}

#[test]
fn weld_offset_must_match_exactly() {
    let mut world = WorldState::new("seed");
    let root = base_entity("root");
    let mut child = base_entity("child");
    child.weld_parent_id = Some(EntityId::from("root"));
    child.relative_offset = Some(Vec2Fp::new(fp(1.0), fp(0.0)));
    child.position = Vec2Fp::new(fp(1.0), fp(0.0));
    world.upsert_entity(root);
    world.upsert_entity(child);
    assert!(check_all(&world).is_empty());
}

#[test]
fn mutual_exclusion_is_enforced() {
    let mut world = WorldState::new("seed");
    let mut a = base_entity("a");
    a.parent_id = Some(EntityId::from("p"));
    a.weld_parent_id = Some(EntityId::from("w"));
    world.upsert_entity(base_entity("p"));
    world.upsert_entity(base_entity("w"));
    world.upsert_entity(a);
    let violations = check_all(&world);
    assert!(violations
        .iter()
        .any(|v| matches!(v, mesh_model::ModelError::MutualExclusionViolated { .. })));
}

#[test]
fn containment_volume_cap_is_enforced() {
    let mut world = WorldState::new("seed");
    let mut container = base_entity("container");
    container.is_container = true;
    container.container_volume = fp(5.0);
    let mut child = base_entity("child");
    child.parent_id = Some(EntityId::from("container"));
    child.volume = fp(10.0);
    world.upsert_entity(container);
    world.upsert_entity(child);
    let violations = check_all(&world);
    assert!(violations
        .iter()
        .any(|v| matches!(v, mesh_model::ModelError::ContainmentVolumeExceeded { .. })));
}

#[test]
fn negative_resources_are_flagged() {
    let mut world = WorldState::new("seed");
    let mut entity = base_entity("a");
    entity.fuel_mass = fp(-1.0);
    world.upsert_entity(entity);
    let violations = check_all(&world);
    assert!(violations
        .iter()
        .any(|v| matches!(v, mesh_model::ModelError::NegativeResource { .. })));
}
