//! RAMPART Simulation Core
//!
//! ECS-ядро боевой симуляции на Bevy 0.16 (decision layer).
//! Ядро решает, ЧТО происходит (цели, готовность, запуск действий,
//! смерть); внешние коллабораторы исполняют КАК (интеграция движения,
//! проигрывание анимаций, блокировка, нанесение урона, game state).
//!
//! Весь тик — одна жёсткая цепочка систем в FixedUpdate (60 Hz);
//! порядок и есть вся модель конкурентности, см. SimulationPlugin.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod animation;
pub mod combat;
pub mod components;
pub mod events;
pub mod facing;
pub mod lifecycle;
pub mod logger;
pub mod navigation;
pub mod targeting;

// Re-export базовых компонентов и событий для удобства
pub use components::*;
pub use events::{AnimationFinished, AnimationId, EnemyArriveHome, PlayAnimation};
pub use facing::FACING_DEADZONE;
pub use logger::{init_logger, set_log_level, set_logger, LogLevel, LogPrinter};
pub use navigation::{WaypointGraph, WaypointId, WaypointNode, ARRIVAL_THRESHOLD};
pub use targeting::UNIT_RADIUS;

/// Частота фиксированного тика симуляции
pub const TICK_RATE_HZ: f64 = 60.0;

/// Seed по умолчанию (когда хост не задал свой)
pub const DEFAULT_SEED: u64 = 42;

/// Главный plugin симуляции: вся цепочка тика
///
/// Порядок систем внутри тика фиксирован:
/// 1. despawn_dead — убрать помеченных в прошлом тике
/// 2. follow_path — движение врагов по графу (интеграцию позиции
///    выполняет внешний коллаборатор после цепочки)
/// 3. validate_targets — снять невалидные цели
/// 4. acquire_player_targets
/// 5. acquire_ranged_enemy_targets
/// 6. acquire_healer_targets
/// 7. tick_attack_timers — накопление готовности
/// 8. start_melee_attacks
/// 9. start_ranged_attacks
/// 10. start_friendly_actions
/// 11. reconcile_animation_state — реакция на AnimationFinished
/// 12. resolve_facing — косметика, строго последней
///
/// Между системами цепочки Bevy применяет Commands, поэтому тег,
/// повешенный проходом N, виден проходу N+1 в том же тике.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick (легче считать интервалы)
            .insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ))
            // Детерминистичный RNG: init_resource, чтобы не затирать
            // seed, выставленный хостом до добавления plugin'а
            .init_resource::<DeterministicRng>()
            .init_resource::<WaypointGraph>()
            .add_event::<PlayAnimation>()
            .add_event::<AnimationFinished>()
            .add_event::<EnemyArriveHome>()
            .add_systems(
                FixedUpdate,
                (
                    lifecycle::despawn_dead,
                    navigation::follow_path,
                    targeting::validate_targets,
                    targeting::acquire_player_targets,
                    targeting::acquire_ranged_enemy_targets,
                    targeting::acquire_healer_targets,
                    combat::tick_attack_timers,
                    combat::start_melee_attacks,
                    combat::start_ranged_attacks,
                    combat::start_friendly_actions,
                    animation::reconcile_animation_state,
                    facing::resolve_facing,
                )
                    .chain(),
            );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// ManualDuration привязывает время к вызовам update: один update ==
/// ровно один фиксированный тик, независимо от wall-clock. Иначе
/// детерминизм между запусками недостижим.
pub fn create_headless_app(seed: u64) -> App {
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / TICK_RATE_HZ,
        )))
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
