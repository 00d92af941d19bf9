//! Headless симуляция RAMPART
//!
//! Запускает Bevy App без рендера: ветвящийся граф путей, волна врагов,
//! пара защитников и лекарь. Внешние коллабораторы (интеграция движения,
//! playback анимаций, блокировка, game state) здесь представлены
//! простейшими демо-заглушками, чтобы ядру было на что реагировать.

use bevy::prelude::*;

use rampart_simulation::{
    create_headless_app, facing, logger, ActionLock, AnimationFinished, BlockedBy, Enemy,
    EnemyArriveHome, FaceLeft, Healer, Injured, MeleeUnit, PlayAnimation, Player, RangedUnit,
    Stats, Velocity, WaypointGraph, WaypointNode, UNIT_RADIUS,
};

/// Жизни базы (демо game state, потребитель EnemyArriveHome)
#[derive(Resource)]
struct BaseLives(i32);

/// Остаток разовой анимации (демо playback)
#[derive(Component)]
struct PlaybackTimer(f32);

const DEMO_ANIMATION_SECS: f32 = 0.4;

fn main() {
    let seed = 42;
    println!("Starting RAMPART headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);

    app.insert_resource(demo_graph())
        .insert_resource(BaseLives(3))
        .add_systems(Startup, spawn_demo_units)
        .add_systems(
            FixedUpdate,
            (
                integrate_motion,
                resolve_demo_blocking,
                drive_demo_playback,
                consume_arrivals,
            )
                .chain()
                .after(facing::resolve_facing),
        );

    // Запускаем 900 тиков симуляции (15 секунд игрового времени)
    for tick in 0..900 {
        app.update();

        if tick % 100 == 0 {
            let entity_count = app.world().entities().len();
            let lives = app.world().resource::<BaseLives>().0;
            println!("Tick {}: {} entities, {} lives", tick, entity_count, lives);
        }
    }

    println!("Simulation complete!");
}

/// Ветвящийся граф: spawn → развилка → две дуги → база
fn demo_graph() -> WaypointGraph {
    WaypointGraph::from_nodes([
        WaypointNode {
            id: 0,
            position: Vec2::new(-300.0, 0.0),
            next_ids: vec![1],
        },
        WaypointNode {
            id: 1,
            position: Vec2::new(-100.0, 0.0),
            next_ids: vec![2, 3],
        },
        WaypointNode {
            id: 2,
            position: Vec2::new(0.0, 100.0),
            next_ids: vec![4],
        },
        WaypointNode {
            id: 3,
            position: Vec2::new(0.0, -100.0),
            next_ids: vec![4],
        },
        WaypointNode {
            id: 4,
            position: Vec2::new(300.0, 0.0),
            next_ids: vec![],
        },
    ])
}

fn spawn_demo_units(mut commands: Commands) {
    // Волна: два ближних, один дальнобойный
    for i in 0..2 {
        commands.spawn((
            Enemy {
                target_waypoint_id: 1,
                speed: 40.0,
            },
            MeleeUnit,
            FaceLeft,
            Stats {
                hp: 60.0,
                max_hp: 60.0,
                atk: 8.0,
                ..Default::default()
            },
            Transform::from_xyz(-300.0 - 30.0 * i as f32, 0.0, 0.0),
        ));
    }
    commands.spawn((
        Enemy {
            target_waypoint_id: 1,
            speed: 30.0,
        },
        RangedUnit,
        FaceLeft,
        Stats {
            hp: 40.0,
            max_hp: 40.0,
            atk: 6.0,
            range: 120.0,
            ..Default::default()
        },
        Transform::from_xyz(-390.0, 0.0, 0.0),
    ));

    // Защитники у верхней дуги, один заранее ранен — лекарю есть работа
    commands.spawn((
        Player { cost: 10 },
        MeleeUnit,
        Stats {
            range: 40.0,
            ..Default::default()
        },
        Transform::from_xyz(-40.0, 80.0, 0.0),
    ));
    commands.spawn((
        Player { cost: 15 },
        RangedUnit,
        Injured,
        Stats {
            hp: 55.0,
            range: 150.0,
            ..Default::default()
        },
        Transform::from_xyz(40.0, 140.0, 0.0),
    ));
    commands.spawn((
        Player { cost: 12 },
        Healer,
        Stats {
            range: 180.0,
            atk_interval: 2.0,
            ..Default::default()
        },
        Transform::from_xyz(0.0, 180.0, 0.0),
    ));
}

/// Демо-коллаборатор: интеграция позиции по скорости.
/// ActionLock и BlockedBy исключены: юнит в разовой анимации или в
/// ближнем сцеплении стоит на месте
fn integrate_motion(
    time: Res<Time>,
    mut movers: Query<(&Velocity, &mut Transform), (Without<ActionLock>, Without<BlockedBy>)>,
) {
    for (velocity, mut transform) in movers.iter_mut() {
        transform.translation += velocity.0.extend(0.0) * time.delta_secs();
    }
}

/// Демо-коллаборатор: ближний враг упирается в защитника
fn resolve_demo_blocking(
    mut commands: Commands,
    mut enemies: Query<
        (Entity, &Transform, &mut Velocity),
        (With<Enemy>, With<MeleeUnit>, Without<BlockedBy>),
    >,
    blocked: Query<(Entity, &BlockedBy)>,
    players: Query<(Entity, &Transform), With<Player>>,
) {
    for (enemy, transform, mut velocity) in enemies.iter_mut() {
        for (player, player_transform) in players.iter() {
            let gap = transform
                .translation
                .truncate()
                .distance(player_transform.translation.truncate());
            if gap <= UNIT_RADIUS * 2.0 {
                commands.entity(enemy).insert(BlockedBy { blocker: player });
                velocity.0 = Vec2::ZERO;
                break;
            }
        }
    }

    // Блокер умер — врага отпускаем
    for (enemy, blocked_by) in blocked.iter() {
        if players.get(blocked_by.blocker).is_err() {
            commands.entity(enemy).remove::<BlockedBy>();
        }
    }
}

/// Демо-коллаборатор: playback разовых анимаций фиксированной длины
fn drive_demo_playback(
    mut commands: Commands,
    time: Res<Time>,
    mut play: EventReader<PlayAnimation>,
    mut finished: EventWriter<AnimationFinished>,
    mut playing: Query<(Entity, &mut PlaybackTimer)>,
) {
    for request in play.read() {
        if !request.looping {
            commands
                .entity(request.entity)
                .insert(PlaybackTimer(DEMO_ANIMATION_SECS));
        }
    }

    for (entity, mut timer) in playing.iter_mut() {
        timer.0 -= time.delta_secs();
        if timer.0 <= 0.0 {
            commands.entity(entity).remove::<PlaybackTimer>();
            finished.write(AnimationFinished { entity });
        }
    }
}

/// Демо game state: враг дошёл до базы — минус жизнь
fn consume_arrivals(mut arrivals: EventReader<EnemyArriveHome>, mut lives: ResMut<BaseLives>) {
    for _ in arrivals.read() {
        lives.0 -= 1;
        logger::log_warning(&format!("Base breached, {} lives left", lives.0));
    }
}
