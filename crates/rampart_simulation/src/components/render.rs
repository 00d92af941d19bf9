//! SpriteOrientation — поле ориентации, потребляемое внешним рендером

use bevy::prelude::*;

/// Горизонтальное отзеркаливание спрайта
///
/// Пишется FacingResolution (facing.rs), читается внешним рендером.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct SpriteOrientation {
    pub flip_x: bool,
}
