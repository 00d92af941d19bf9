//! Теги — zero-size маркерные компоненты
//!
//! Присутствие тега кодирует булево состояние. Это sparse state machine
//! без наследования: системы фильтруют по With/Without.

use bevy::prelude::*;

/// Entity мёртв; уничтожается пакетно в начале следующего тика
/// (despawn_dead), чтобы никто не наблюдал полу-удалённый entity
#[derive(Component, Debug)]
pub struct Dead;

/// Арт по умолчанию смотрит влево — инвертирует вычисленный flip
#[derive(Component, Debug)]
pub struct FaceLeft;

/// Ближний юнит
#[derive(Component, Debug)]
pub struct MeleeUnit;

/// Дальнобойный юнит
#[derive(Component, Debug)]
pub struct RangedUnit;

/// Лекарь: цель пересчитывается каждый тик (см. targeting.rs)
#[derive(Component, Debug)]
pub struct Healer;

/// Кулдаун истёк, юнит готов действовать. Вешается tick_attack_timers,
/// снимается системами start_* в момент фактического старта атаки
#[derive(Component, Debug)]
pub struct AttackReady;

/// hp < max_hp. Поддерживается внешней damage/health логикой
#[derive(Component, Debug)]
pub struct Injured;

/// Занят неотменяемым действием (играет attack-анимация).
/// Снимается при AnimationFinished (animation.rs)
#[derive(Component, Debug)]
pub struct ActionLock;
