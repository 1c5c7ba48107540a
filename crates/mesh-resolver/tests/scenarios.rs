use mesh_fixed::{fp, Vec2Fp};
use mesh_model::action::{Action, ActionKind, ActionPayload};
use mesh_model::entity::{Entity, EntityKind, ZoomState};
use mesh_model::ids::{EntityId, PlayerId};
use mesh_model::world::WorldState;
use mesh_resolver::{resolve_tick, ResolverConfig};

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

fn thrust(entity_id: &str, magnitude: f64, order_index: u32) -> Action {
    Action {
        kind: ActionKind::Thrust,
        entity_id: EntityId::from(entity_id),
        player_id: None,
        order_index,
        target_ids: None,
        payload: ActionPayload::Thrust { magnitude: fp(magnitude), direction: None },
    }
}

// S1: pure THRUST, heading 0, one tick: velocity, fuel, mass, and the
// final translated position all match the worked example.
#[test]
fn s1_pure_thrust() {
    let mut world = WorldState::new("seed");
    world.upsert_entity(base_entity("A"));

    let config = ResolverConfig::default();
    let (next, _) = resolve_tick(&world, &[thrust("A", 50.0, 0)], &config);

    let a = next.entity(&EntityId::from("A")).unwrap();
    assert_eq!(a.velocity, Vec2Fp::new(fp(50.0), fp(0.0)));
    assert_eq!(a.fuel_mass, fp(150.0));
    assert_eq!(a.mass, fp(950.0));
    assert_eq!(a.position, Vec2Fp::new(fp(50.0), fp(0.0)));
    assert_eq!(next.tick, 1);
}

// S2: WELD in wave 0, THRUST in wave 1, settled in a single tick.
#[test]
fn s2_weld_then_thrust_one_tick() {
    let mut world = WorldState::new("seed");
    let mut a = base_entity("A");
    a.airlock_sealed = true;
    let mut b = base_entity("B");
    b.position = Vec2Fp::new(fp(100.0), fp(0.0));
    b.mass = fp(500.0);
    world.upsert_entity(a);
    world.upsert_entity(b);

    let weld = Action {
        kind: ActionKind::Weld,
        entity_id: EntityId::from("A"),
        player_id: None,
        order_index: 0,
        target_ids: Some(vec![EntityId::from("B")]),
        payload: ActionPayload::Weld { target_ids: vec![EntityId::from("B")] },
    };
    let thrust_action = thrust("A", 50.0, 1);

    let config = ResolverConfig::default();
    let (next, metrics) = resolve_tick(&world, &[weld, thrust_action], &config);

    assert_eq!(metrics.waves.len(), 2);

    let a = next.entity(&EntityId::from("A")).unwrap();
    let b = next.entity(&EntityId::from("B")).unwrap();
    assert_eq!(a.mass, fp(1500.0 - 50.0)); // welded mass, then propulsion loss
    assert!(a.velocity.x.raw() > 0);
    assert_eq!(b.position, a.position.add(Vec2Fp::new(fp(100.0), fp(0.0))));
}

// S3: translation-only over 10 ticks keeps a contained entity bound to
// its container at every tick boundary.
#[test]
fn s3_translation_keeps_containment_bound() {
    let mut world = WorldState::new("seed");
    let mut container = base_entity("C");
    container.mass = fp(3000.0);
    container.velocity = Vec2Fp::new(fp(100.0), fp(50.0));
    let mut content = base_entity("X");
    content.mass = fp(500.0);
    content.parent_id = Some(EntityId::from("C"));
    world.upsert_entity(container);
    world.upsert_entity(content);

    let config = ResolverConfig::default();
    for _ in 0..10 {
        let (next, _) = resolve_tick(&world, &[], &config);
        let c = next.entity(&EntityId::from("C")).unwrap();
        let x = next.entity(&EntityId::from("X")).unwrap();
        assert_eq!(c.position, x.position);
        world = next;
    }

    let c = world.entity(&EntityId::from("C")).unwrap();
    assert_eq!(c.position, Vec2Fp::new(fp(1000.0), fp(500.0)));
    assert_eq!(world.tick, 10);
}

// S4: two players' actions on the same asset that can never both succeed
// void the whole cluster rather than picking a winner.
#[test]
fn s4_stalemate_voids_all_actions() {
    let mut world = WorldState::new("seed");
    let mut ship = base_entity("ship");
    ship.fuel_mass = fp(0.0); // THRUST can never validate, regardless of order
    world.upsert_entity(ship);

    let mut action_a = thrust("ship", 10.0, 0);
    action_a.player_id = Some(PlayerId::from("p1"));
    let mut action_b = thrust("ship", 10.0, 0);
    action_b.player_id = Some(PlayerId::from("p2"));

    let config = ResolverConfig::default();
    let (next, metrics) = resolve_tick(&world, &[action_a, action_b], &config);

    let cluster = &metrics.waves[0].clusters[0];
    assert!(cluster.stalemate);
    assert!(cluster.executed_action_ids.is_empty());

    let ship = next.entity(&EntityId::from("ship")).unwrap();
    assert_eq!(ship.velocity, Vec2Fp::ZERO);
}
