//! Tick integration test
//!
//! Полный App с SimulationPlugin, headless, ManualDuration: один update
//! == ровно один фиксированный тик. Проверяем сквозные свойства тика:
//! - прибытие на базу: ровно одно событие, Dead в этом тике, despawn в
//!   следующем;
//! - захват/валидация целей, включительная граница радиуса;
//! - готовность: таймер замерзает под AttackReady и сбрасывается только
//!   диспетчеризацией;
//! - диспетчеризация всех трёх групп в том же тике, что и готовность;
//! - реакция на AnimationFinished и косметика ориентации.

use bevy::prelude::*;

use rampart_simulation::logger;
use rampart_simulation::*;

/// Helper: App + граф из одного далёкого узла (враги идут, но не доходят)
fn app_with_distant_node(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.insert_resource(WaypointGraph::from_nodes([WaypointNode {
        id: 0,
        position: Vec2::new(1000.0, 0.0),
        next_ids: vec![],
    }]));
    app
}

fn spawn_enemy(app: &mut App, position: Vec2, stats: Stats) -> Entity {
    app.world_mut()
        .spawn((
            Enemy {
                target_waypoint_id: 0,
                speed: 40.0,
            },
            stats,
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}

fn spawn_player(app: &mut App, position: Vec2, stats: Stats) -> Entity {
    app.world_mut()
        .spawn((
            Player { cost: 10 },
            stats,
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}

fn drain_play(app: &mut App) -> Vec<PlayAnimation> {
    app.world_mut()
        .resource_mut::<Events<PlayAnimation>>()
        .drain()
        .collect()
}

fn drain_arrivals(app: &mut App) -> usize {
    app.world_mut()
        .resource_mut::<Events<EnemyArriveHome>>()
        .drain()
        .count()
}

/// Прибытие: одно событие, Dead в тике прибытия, despawn в следующем
#[test]
fn test_arrival_emits_once_then_despawns_next_tick() {
    let mut app = create_headless_app(42);
    // Конечный узел прямо под врагом
    app.insert_resource(WaypointGraph::from_nodes([WaypointNode {
        id: 0,
        position: Vec2::ZERO,
        next_ids: vec![],
    }]));
    let enemy = spawn_enemy(&mut app, Vec2::ZERO, Stats::default());

    app.update();
    assert_eq!(drain_arrivals(&mut app), 1, "arrival must be emitted once");
    assert!(
        app.world().get_entity(enemy).is_ok(),
        "enemy survives the arrival tick"
    );
    assert!(
        app.world().get::<Dead>(enemy).is_some(),
        "enemy must be marked Dead on arrival"
    );

    app.update();
    assert_eq!(drain_arrivals(&mut app), 0, "no duplicate arrival");
    assert!(
        app.world().get_entity(enemy).is_err(),
        "enemy must be despawned at the start of the next tick"
    );

    logger::log("✓ Arrival: one event, Dead same tick, despawn next tick");
}

/// Навигация: достижение узла с рёбрами перецеливает и задаёт скорость
#[test]
fn test_waypoint_progression_sets_velocity() {
    let mut app = create_headless_app(42);
    app.insert_resource(WaypointGraph::from_nodes([
        WaypointNode {
            id: 0,
            position: Vec2::ZERO,
            next_ids: vec![1],
        },
        WaypointNode {
            id: 1,
            position: Vec2::new(100.0, 0.0),
            next_ids: vec![],
        },
    ]));
    let enemy = spawn_enemy(&mut app, Vec2::ZERO, Stats::default());

    app.update();

    let state = app.world().get::<Enemy>(enemy).unwrap();
    assert_eq!(state.target_waypoint_id, 1);
    let velocity = app.world().get::<Velocity>(enemy).unwrap().0;
    assert_eq!(velocity, Vec2::new(40.0, 0.0));

    logger::log("✓ Navigation: node reached, retargeted, velocity set");
}

/// Граница радиуса включительная: reach = range + UNIT_RADIUS
#[test]
fn test_acquisition_reach_boundary_is_inclusive() {
    // Дистанция ровно 66 при range 50: цель берётся
    let mut app = app_with_distant_node(42);
    let player = spawn_player(
        &mut app,
        Vec2::ZERO,
        Stats {
            range: 50.0,
            ..Default::default()
        },
    );
    let enemy = spawn_enemy(&mut app, Vec2::new(66.0, 0.0), Stats::default());
    app.update();
    let target = app.world().get::<Target>(player);
    assert_eq!(target.map(|t| t.entity), Some(enemy));

    // Дистанция 67: цели нет
    let mut app = app_with_distant_node(42);
    let player = spawn_player(
        &mut app,
        Vec2::ZERO,
        Stats {
            range: 50.0,
            ..Default::default()
        },
    );
    spawn_enemy(&mut app, Vec2::new(67.0, 0.0), Stats::default());
    app.update();
    assert!(app.world().get::<Target>(player).is_none());

    logger::log("✓ Acquisition boundary: 66 in, 67 out");
}

/// Повисшая цель снимается в первом же тике после despawn референта
#[test]
fn test_dangling_target_is_dropped() {
    let mut app = app_with_distant_node(42);
    let player = spawn_player(&mut app, Vec2::ZERO, Stats::default());
    let enemy = spawn_enemy(&mut app, Vec2::new(30.0, 0.0), Stats::default());

    app.update();
    assert!(app.world().get::<Target>(player).is_some());

    app.world_mut().despawn(enemy);
    app.update();
    assert!(
        app.world().get::<Target>(player).is_none(),
        "dangling target must be dropped"
    );

    logger::log("✓ Dangling target dropped after referent despawn");
}

/// Цель, ушедшая из радиуса, снимается
#[test]
fn test_out_of_reach_target_is_dropped() {
    let mut app = app_with_distant_node(42);
    let player = spawn_player(
        &mut app,
        Vec2::ZERO,
        Stats {
            range: 50.0,
            ..Default::default()
        },
    );
    let enemy = spawn_enemy(&mut app, Vec2::new(60.0, 0.0), Stats::default());

    app.update();
    assert!(app.world().get::<Target>(player).is_some());

    app.world_mut().get_mut::<Transform>(enemy).unwrap().translation = Vec3::new(200.0, 0.0, 0.0);
    app.update();
    assert!(app.world().get::<Target>(player).is_none());

    logger::log("✓ Out-of-reach target dropped");
}

/// Лекарь: выбирает минимальный hp/max_hp, пересчитывает каждый тик,
/// снимает цель при отсутствии раненых
#[test]
fn test_healer_retargets_every_tick() {
    let mut app = app_with_distant_node(42);
    let healer = app
        .world_mut()
        .spawn((
            Player { cost: 12 },
            Healer,
            Stats {
                range: 200.0,
                ..Default::default()
            },
            Transform::from_xyz(0.0, 0.0, 0.0),
        ))
        .id();
    let worst = app
        .world_mut()
        .spawn((
            Player { cost: 10 },
            Injured,
            Stats {
                hp: 30.0,
                ..Default::default()
            },
            Transform::from_xyz(50.0, 0.0, 0.0),
        ))
        .id();
    let lesser = app
        .world_mut()
        .spawn((
            Player { cost: 10 },
            Injured,
            Stats {
                hp: 80.0,
                ..Default::default()
            },
            Transform::from_xyz(-50.0, 0.0, 0.0),
        ))
        .id();

    app.update();
    assert_eq!(
        app.world().get::<Target>(healer).map(|t| t.entity),
        Some(worst),
        "healer must pick the lowest hp ratio"
    );

    // Самого раненого вылечили извне: лекарь перецеливается
    app.world_mut().get_mut::<Stats>(worst).unwrap().hp = 100.0;
    app.world_mut().entity_mut(worst).remove::<Injured>();
    app.update();
    assert_eq!(
        app.world().get::<Target>(healer).map(|t| t.entity),
        Some(lesser)
    );

    // Раненых не осталось: цель снимается
    app.world_mut().entity_mut(lesser).remove::<Injured>();
    app.update();
    assert!(app.world().get::<Target>(healer).is_none());

    logger::log("✓ Healer: lowest ratio, retarget, drop when none injured");
}

/// Готовность без цели висит, таймер заморожен до диспетчеризации
#[test]
fn test_ready_persists_and_timer_freezes() {
    let mut app = app_with_distant_node(42);
    let player = spawn_player(
        &mut app,
        Vec2::ZERO,
        Stats {
            atk_interval: 0.1,
            ..Default::default()
        },
    );

    for _ in 0..20 {
        app.update();
    }
    assert!(app.world().get::<AttackReady>(player).is_some());
    let frozen = app.world().get::<Stats>(player).unwrap().atk_timer;
    assert!(
        (0.09..0.15).contains(&frozen),
        "timer must stop right past the interval, got {frozen}"
    );

    for _ in 0..40 {
        app.update();
    }
    assert!(app.world().get::<AttackReady>(player).is_some());
    assert_eq!(
        app.world().get::<Stats>(player).unwrap().atk_timer,
        frozen,
        "timer must stay frozen while AttackReady holds"
    );

    logger::log("✓ Readiness persists, timer frozen until dispatch");
}

/// Ближняя атака: готовность и запуск в одном тике, таймер обнулён
#[test]
fn test_melee_dispatch_fires_same_tick_as_readiness() {
    let mut app = app_with_distant_node(42);
    let player = spawn_player(&mut app, Vec2::new(10.0, 0.0), Stats::default());
    let enemy = spawn_enemy(
        &mut app,
        Vec2::ZERO,
        Stats {
            atk_timer: 1.0,
            ..Default::default()
        },
    );
    app.world_mut()
        .entity_mut(enemy)
        .insert((MeleeUnit, BlockedBy { blocker: player }));

    app.update();

    assert!(app.world().get::<ActionLock>(enemy).is_some());
    assert!(app.world().get::<AttackReady>(enemy).is_none());
    assert_eq!(app.world().get::<Stats>(enemy).unwrap().atk_timer, 0.0);

    let events = drain_play(&mut app);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].entity, enemy);
    assert_eq!(events[0].animation, AnimationId::Attack);
    assert!(!events[0].looping);

    logger::log("✓ Melee dispatch: readiness converted within the same tick");
}

/// Дальняя атака: скорость обнуляется в тике запуска
#[test]
fn test_ranged_dispatch_zeroes_velocity() {
    let mut app = app_with_distant_node(42);
    let player = spawn_player(&mut app, Vec2::new(50.0, 0.0), Stats::default());
    let enemy = spawn_enemy(
        &mut app,
        Vec2::ZERO,
        Stats {
            range: 100.0,
            atk_timer: 1.0,
            ..Default::default()
        },
    );
    app.world_mut().entity_mut(enemy).insert(RangedUnit);

    app.update();

    assert_eq!(
        app.world().get::<Target>(enemy).map(|t| t.entity),
        Some(player)
    );
    assert!(app.world().get::<ActionLock>(enemy).is_some());
    assert_eq!(app.world().get::<Velocity>(enemy).unwrap().0, Vec2::ZERO);

    let events = drain_play(&mut app);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].animation, AnimationId::RangedAttack);

    logger::log("✓ Ranged dispatch: target acquired, stopped, RangedAttack");
}

/// Союзники: лекарь играет Heal, боец Attack; ActionLock не вешается
#[test]
fn test_friendly_dispatch_heal_vs_attack() {
    let mut app = app_with_distant_node(42);

    let healer = app
        .world_mut()
        .spawn((
            Player { cost: 12 },
            Healer,
            Stats {
                range: 200.0,
                atk_timer: 1.0,
                ..Default::default()
            },
            Transform::from_xyz(0.0, 100.0, 0.0),
        ))
        .id();
    let fighter = app
        .world_mut()
        .spawn((
            Player { cost: 10 },
            Injured,
            Stats {
                hp: 50.0,
                atk_timer: 1.0,
                ..Default::default()
            },
            Transform::from_xyz(0.0, 0.0, 0.0),
        ))
        .id();
    spawn_enemy(&mut app, Vec2::new(40.0, 0.0), Stats::default());

    app.update();

    let events = drain_play(&mut app);
    let healer_event = events.iter().find(|e| e.entity == healer).unwrap();
    assert_eq!(healer_event.animation, AnimationId::Heal);
    let fighter_event = events.iter().find(|e| e.entity == fighter).unwrap();
    assert_eq!(fighter_event.animation, AnimationId::Attack);

    assert!(app.world().get::<ActionLock>(healer).is_none());
    assert!(app.world().get::<ActionLock>(fighter).is_none());
    assert!(app.world().get::<AttackReady>(healer).is_none());
    assert!(app.world().get::<AttackReady>(fighter).is_none());

    logger::log("✓ Friendly dispatch: Heal for healer, Attack for fighter, no lock");
}

/// AnimationFinished: лок снят, базовая анимация по роли, повисший
/// entity молча пропущен
#[test]
fn test_animation_reconciliation_by_role() {
    let mut app = app_with_distant_node(42);

    let blocker = spawn_player(&mut app, Vec2::new(500.0, 500.0), Stats::default());
    let blocked_enemy = spawn_enemy(&mut app, Vec2::new(200.0, 200.0), Stats::default());
    app.world_mut()
        .entity_mut(blocked_enemy)
        .insert((ActionLock, BlockedBy { blocker }));

    let walking_enemy = spawn_enemy(&mut app, Vec2::new(-200.0, -200.0), Stats::default());
    app.world_mut().entity_mut(walking_enemy).insert(ActionLock);

    let friendly = spawn_player(&mut app, Vec2::new(-500.0, -500.0), Stats::default());

    let stale = app.world_mut().spawn_empty().id();
    app.world_mut().despawn(stale);

    for entity in [blocked_enemy, walking_enemy, friendly, stale] {
        app.world_mut().send_event(AnimationFinished { entity });
    }

    app.update();

    assert!(app.world().get::<ActionLock>(blocked_enemy).is_none());
    assert!(app.world().get::<ActionLock>(walking_enemy).is_none());

    let events = drain_play(&mut app);
    let by_entity = |e: Entity| events.iter().find(|ev| ev.entity == e);

    let blocked_event = by_entity(blocked_enemy).unwrap();
    assert_eq!(blocked_event.animation, AnimationId::Idle);
    assert!(blocked_event.looping);

    let walking_event = by_entity(walking_enemy).unwrap();
    assert_eq!(walking_event.animation, AnimationId::Walk);
    assert!(walking_event.looping);

    let friendly_event = by_entity(friendly).unwrap();
    assert_eq!(friendly_event.animation, AnimationId::Idle);
    assert!(friendly_event.looping);

    assert!(by_entity(stale).is_none(), "stale entity must be skipped");

    logger::log("✓ Reconciliation: Idle/Walk/Idle by role, stale skipped");
}

/// Ориентация: цель важнее скорости, FaceLeft инвертирует, мёртвая зона
/// сохраняет прошлое значение
#[test]
fn test_facing_priority_and_deadzone() {
    let mut app = app_with_distant_node(42);

    // FaceLeft-враг с целью справа: flip становится true
    let player = spawn_player(&mut app, Vec2::new(50.0, 0.0), Stats::default());
    let inverted = spawn_enemy(&mut app, Vec2::ZERO, Stats::default());
    app.world_mut()
        .entity_mut(inverted)
        .insert((FaceLeft, Target { entity: player }));

    // Обычный юнит с целью слева: flip тоже true (арт смотрит вправо)
    let enemy_left = spawn_enemy(&mut app, Vec2::new(-60.0, 10.0), Stats::default());
    let plain = app
        .world_mut()
        .spawn((
            Player { cost: 10 },
            Stats::default(),
            Transform::from_xyz(0.0, 10.0, 0.0),
            Target { entity: enemy_left },
        ))
        .id();

    // Микроскорость в мёртвой зоне: выставленный вручную flip не трогается
    let creeping = app
        .world_mut()
        .spawn((
            Enemy {
                target_waypoint_id: 0,
                speed: 0.05,
            },
            Stats::default(),
            SpriteOrientation { flip_x: true },
            Transform::from_xyz(0.0, -300.0, 0.0),
        ))
        .id();

    app.update();

    assert!(app.world().get::<SpriteOrientation>(inverted).unwrap().flip_x);
    assert!(app.world().get::<SpriteOrientation>(plain).unwrap().flip_x);
    assert!(
        app.world().get::<SpriteOrientation>(creeping).unwrap().flip_x,
        "deadzone velocity must not touch orientation"
    );

    logger::log("✓ Facing: target priority, FaceLeft inversion, deadzone hold");
}
