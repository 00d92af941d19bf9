//! Ролевые компоненты: Enemy и Player
//!
//! Роль задаётся присутствием компонента, не подтипами. Один entity
//! несёт ровно одну роль (гарантируется внешней фабрикой при спавне).

use bevy::prelude::*;

use super::{SpriteOrientation, Velocity};
use crate::navigation::WaypointId;

/// Враг — движется по графу путевых точек к базе
///
/// Required components покрывают то, что фабрика прикрепляет всегда:
/// Velocity (интеграция движения) и SpriteOrientation (рендер).
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Velocity, SpriteOrientation)]
pub struct Enemy {
    /// Текущая целевая путевая точка
    pub target_waypoint_id: WaypointId,
    /// Скорость движения (единиц/сек)
    pub speed: f32,
}

/// Дружественный юнит, размещённый игроком
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(SpriteOrientation)]
pub struct Player {
    /// Стоимость размещения
    pub cost: i32,
}
