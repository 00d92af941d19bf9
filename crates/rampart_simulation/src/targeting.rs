//! Target Acquisition — валидация и (пере)назначение целей
//!
//! Четыре прохода, строго валидация перед захватом:
//! 1. validate_targets — снять Target, если referent исчез/без позиции/
//!    вне радиуса (включительно);
//! 2. acquire_player_targets — игрок (не лекарь) без цели берёт первого
//!    врага в радиусе;
//! 3. acquire_ranged_enemy_targets — дальнобойный враг без цели и без
//!    блокера, симметрично;
//! 4. acquire_healer_targets — лекарь каждый тик пересчитывает цель:
//!    раненый союзник в радиусе с минимальным hp/max_hp.
//!
//! Политика "первое совпадение в порядке итерации" (проходы 2–3)
//! сохранена намеренно без ранжирования по дистанции; закреплена тестами.
//! Entity без нужных компонентов исключаются самим view, это не ошибки.

use bevy::prelude::*;

use crate::components::{BlockedBy, Enemy, Healer, Injured, Player, RangedUnit, Stats, Target};

/// Радиус юнита: компенсация дальности, чтобы радиус меряется
/// "край к краю", а не "центр к центру"
pub const UNIT_RADIUS: f32 = 16.0;

fn within_reach(a: &Transform, b: &Transform, reach: f32) -> bool {
    let d2 = a
        .translation
        .truncate()
        .distance_squared(b.translation.truncate());
    d2 <= reach * reach
}

/// Проход 1: валидация уже захваченных целей
///
/// Target — слабая ссылка и может повиснуть; повисшая ссылка не ошибка,
/// она снимается локально каждый тик и никогда не всплывает наружу.
pub fn validate_targets(
    mut commands: Commands,
    holders: Query<(Entity, &Transform, &Stats, &Target)>,
    positions: Query<&Transform>,
) {
    for (entity, transform, stats, target) in holders.iter() {
        // Query::get покрывает оба случая: entity уничтожен или без позиции
        let Ok(target_transform) = positions.get(target.entity) else {
            commands.entity(entity).remove::<Target>();
            continue;
        };

        let reach = stats.range + UNIT_RADIUS;
        if !within_reach(transform, target_transform, reach) {
            commands.entity(entity).remove::<Target>();
        }
    }
}

/// Проход 2: игрок → враг (первое совпадение)
pub fn acquire_player_targets(
    mut commands: Commands,
    players: Query<
        (Entity, &Transform, &Stats),
        (With<Player>, Without<Target>, Without<Healer>),
    >,
    enemies: Query<(Entity, &Transform), With<Enemy>>,
) {
    for (player, transform, stats) in players.iter() {
        let reach = stats.range + UNIT_RADIUS;

        for (enemy, enemy_transform) in enemies.iter() {
            if within_reach(transform, enemy_transform, reach) {
                commands.entity(player).insert(Target { entity: enemy });
                break; // одной захваченной цели достаточно
            }
        }
    }
}

/// Проход 3: дальнобойный враг → игрок (первое совпадение)
///
/// Заблокированные враги исключены: их ведёт ближний бой через BlockedBy.
pub fn acquire_ranged_enemy_targets(
    mut commands: Commands,
    enemies: Query<
        (Entity, &Transform, &Stats),
        (
            With<Enemy>,
            With<RangedUnit>,
            Without<Target>,
            Without<BlockedBy>,
        ),
    >,
    players: Query<(Entity, &Transform), With<Player>>,
) {
    for (enemy, transform, stats) in enemies.iter() {
        let reach = stats.range + UNIT_RADIUS;

        for (player, player_transform) in players.iter() {
            if within_reach(transform, player_transform, reach) {
                commands.entity(enemy).insert(Target { entity: player });
                break;
            }
        }
    }
}

/// Проход 4: лекарь пересчитывает цель каждый тик
///
/// Выбирается раненый (Injured) союзник в радиусе с минимальным
/// hp/max_hp; существующая цель перезаписывается. Если кандидатов нет —
/// цель снимается: протухшая цель лечения не удерживается никогда.
pub fn acquire_healer_targets(
    mut commands: Commands,
    healers: Query<(Entity, &Transform, &Stats), With<Healer>>,
    injured: Query<(Entity, &Transform, &Stats), (With<Player>, With<Injured>)>,
) {
    for (healer, transform, stats) in healers.iter() {
        let reach = stats.range + UNIT_RADIUS;

        let mut best: Option<(Entity, f32)> = None;
        for (ally, ally_transform, ally_stats) in injured.iter() {
            if !within_reach(transform, ally_transform, reach) {
                continue;
            }

            let ratio = ally_stats.hp_ratio();
            if best.is_none_or(|(_, lowest)| ratio < lowest) {
                best = Some((ally, ratio));
            }
        }

        match best {
            Some((ally, _)) => {
                commands.entity(healer).insert(Target { entity: ally });
            }
            None => {
                commands.entity(healer).remove::<Target>();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reach_boundary_is_inclusive() {
        // range 50 + UNIT_RADIUS 16 => reach 66; дистанция ровно 66 — в радиусе
        let a = Transform::from_xyz(0.0, 0.0, 0.0);
        let on_edge = Transform::from_xyz(66.0, 0.0, 0.0);
        let outside = Transform::from_xyz(67.0, 0.0, 0.0);

        let reach = 50.0 + UNIT_RADIUS;
        assert!(within_reach(&a, &on_edge, reach));
        assert!(!within_reach(&a, &outside, reach));
    }

    #[test]
    fn test_reach_uses_planar_distance() {
        // z не участвует: дистанция меряется в плоскости
        let a = Transform::from_xyz(0.0, 0.0, 0.0);
        let b = Transform::from_xyz(3.0, 4.0, 100.0);
        assert!(within_reach(&a, &b, 5.0));
    }
}
