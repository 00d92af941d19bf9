//! Velocity — выход навигации, вход внешней интеграции движения

use bevy::prelude::*;

/// Линейная скорость (единиц/сек). Ядро пишет, внешний мир интегрирует
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Velocity(pub Vec2);
