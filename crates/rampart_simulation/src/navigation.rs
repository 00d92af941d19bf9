//! Path Navigation — движение врагов по графу путевых точек
//!
//! Граф авторский, собран до старта симуляции и в рантайме не меняется;
//! ядро его только читает. Поиск пути не выполняется: пути — заранее
//! заданные (возможно ветвящиеся) ориентированные цепочки узлов.
//! Единственная недетерминированность во всём ядре — равномерный выбор
//! исходящего ребра при достижении узла, и она идёт через seeded
//! DeterministicRng.

use bevy::prelude::*;
use rand::Rng;
use std::collections::HashMap;

use crate::components::{Dead, Enemy, Velocity};
use crate::events::EnemyArriveHome;
use crate::{logger, DeterministicRng};

/// Порог достижения путевой точки (единиц)
pub const ARRIVAL_THRESHOLD: f32 = 5.0;

pub type WaypointId = u32;

/// Узел графа путевых точек
#[derive(Debug, Clone)]
pub struct WaypointNode {
    pub id: WaypointId,
    pub position: Vec2,
    /// Исходящие рёбра. Пустой список == конечный узел (база)
    pub next_ids: Vec<WaypointId>,
}

/// Граф путевых точек (resource, иммутабелен в рантайме)
#[derive(Resource, Debug, Default)]
pub struct WaypointGraph {
    nodes: HashMap<WaypointId, WaypointNode>,
}

impl WaypointGraph {
    pub fn from_nodes(nodes: impl IntoIterator<Item = WaypointNode>) -> Self {
        Self {
            nodes: nodes.into_iter().map(|n| (n.id, n)).collect(),
        }
    }

    pub fn get(&self, id: WaypointId) -> Option<&WaypointNode> {
        self.nodes.get(&id)
    }

    /// Узел по id. Неизвестный id — фатальное нарушение предусловия:
    /// битые данные уровня, продолжать нельзя (юнит уехал бы в
    /// неопределённую позицию)
    pub fn node(&self, id: WaypointId) -> &WaypointNode {
        self.nodes
            .get(&id)
            .unwrap_or_else(|| panic!("waypoint {id} is not in the graph: malformed level data"))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Система: ведёт врагов по графу путевых точек
///
/// Для каждого {Enemy, Transform, Velocity}:
/// 1. direction = узел − позиция
/// 2. |direction| < ARRIVAL_THRESHOLD:
///    - узел без исходящих рёбер → EnemyArriveHome + тег Dead, юнит в
///      этом тике больше не обрабатывается;
///    - иначе равномерно выбираем одно ребро, перецеливаемся,
///      пересчитываем direction.
/// 3. velocity = normalize(direction) * speed; нулевой вектор
///    нормализуется в ноль (деления на ноль нет).
pub fn follow_path(
    mut commands: Commands,
    graph: Res<WaypointGraph>,
    mut rng: ResMut<DeterministicRng>,
    mut arrivals: EventWriter<EnemyArriveHome>,
    mut enemies: Query<(Entity, &mut Enemy, &Transform, &mut Velocity)>,
) {
    for (entity, mut enemy, transform, mut velocity) in enemies.iter_mut() {
        let position = transform.translation.truncate();

        let mut node = graph.node(enemy.target_waypoint_id);
        let mut direction = node.position - position;

        if direction.length() < ARRIVAL_THRESHOLD {
            if node.next_ids.is_empty() {
                logger::log_info(&format!("Enemy {entity:?} reached the home base"));
                arrivals.write(EnemyArriveHome);
                commands.entity(entity).insert(Dead);
                continue;
            }

            // Равномерный независимый выбор ребра на каждое достижение узла
            let branch = rng.rng.gen_range(0..node.next_ids.len());
            enemy.target_waypoint_id = node.next_ids[branch];

            node = graph.node(enemy.target_waypoint_id);
            direction = node.position - position;
        }

        velocity.0 = direction.normalize_or_zero() * enemy.speed;
    }
}
