//! Facing Resolution — горизонтальная ориентация спрайта
//!
//! Косметический проход, последний в тике: на решения ядра не влияет.
//! Приоритет источника направления: цель → блокер → скорость. Если ни
//! один не даёт знак по x (повисшая ссылка, |vx| в мёртвой зоне) —
//! ориентация не трогается, остаётся прошлотиковая.

use bevy::prelude::*;

use crate::components::{BlockedBy, FaceLeft, SpriteOrientation, Target, Velocity};

/// Мёртвая зона по |vx|: дрожание знака на микроскоростях не должно
/// дёргать спрайт
pub const FACING_DEADZONE: f32 = 0.1;

/// Система: выставляет flip_x по направлению интереса
///
/// FaceLeft инвертирует соглашение художника: спрайт нарисован влево,
/// flip_x меняет смысл на противоположный.
pub fn resolve_facing(
    mut units: Query<(
        &mut SpriteOrientation,
        &Transform,
        Option<&Target>,
        Option<&BlockedBy>,
        Option<&Velocity>,
        Option<&FaceLeft>,
    )>,
    positions: Query<&Transform>,
) {
    for (mut orientation, transform, target, blocked, velocity, face_left) in units.iter_mut() {
        let x = transform.translation.x;

        // Повисшие ссылки (positions.get == Err) проваливаются к
        // следующему источнику, а не к пропуску юнита
        let reference_x = target
            .and_then(|t| positions.get(t.entity).ok())
            .or_else(|| blocked.and_then(|b| positions.get(b.blocker).ok()))
            .map(|t| t.translation.x);

        let faces_right = match reference_x {
            Some(rx) => rx >= x,
            None => match velocity {
                Some(v) if v.0.x.abs() > FACING_DEADZONE => v.0.x > 0.0,
                _ => continue,
            },
        };

        let flip = if face_left.is_some() {
            faces_right
        } else {
            !faces_right
        };

        // Запись только при изменении: не будить change detection зря
        if orientation.flip_x != flip {
            orientation.flip_x = flip;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadzone_swallows_micro_velocity() {
        let creeping = Vec2::new(0.05, 0.0);
        assert!(creeping.x.abs() <= FACING_DEADZONE);

        let walking = Vec2::new(-0.5, 0.0);
        assert!(walking.x.abs() > FACING_DEADZONE);
    }
}
