//! Action Timing + Attack Dispatch — накопление готовности и запуск атак
//!
//! Две фазы, разнесённые по системам:
//! - tick_attack_timers — единственное место, где время влияет на боевую
//!   логику: таймер копит delta, при atk_timer >= atk_interval вешается
//!   тег AttackReady. Таймер при этом НЕ сбрасывается — сброс происходит
//!   только при реальном запуске действия.
//! - start_*_attacks — три диспетчера по взаимоисключающим группам:
//!   ближний враг (по BlockedBy), дальний враг (по Target), союзник
//!   (атака или лечение по Target). Запуск = снять AttackReady, обнулить
//!   таймер, отправить PlayAnimation; урон/лечение наносит внешний
//!   обработчик по кадру анимации, ядро только диспетчеризует.
//!
//! ActionLock вешается только на врагов: их разовая анимация исключает
//! движение до AnimationFinished. Союзники не двигаются вовсе, им лок
//! не нужен; асимметрия намеренная.

use bevy::prelude::*;

use crate::components::{
    ActionLock, AttackReady, BlockedBy, Enemy, Healer, Player, Stats, Target, Velocity,
};
use crate::events::{AnimationId, PlayAnimation};

/// Система: накопление таймеров атаки
///
/// Without<AttackReady> — у уже готовых таймер заморожен: копить дальше
/// нечего, готовность одна. Переполнение невозможно.
pub fn tick_attack_timers(
    mut commands: Commands,
    time: Res<Time>,
    mut units: Query<(Entity, &mut Stats), Without<AttackReady>>,
) {
    for (entity, mut stats) in units.iter_mut() {
        stats.atk_timer += time.delta_secs();

        if stats.atk_timer >= stats.atk_interval {
            commands.entity(entity).insert(AttackReady);
        }
    }
}

/// Система: запуск ближних атак врагов
///
/// Условие — заблокирован (BlockedBy) и готов. Target не требуется:
/// жертва ближней атаки и есть блокер.
pub fn start_melee_attacks(
    mut commands: Commands,
    mut play: EventWriter<PlayAnimation>,
    mut attackers: Query<(Entity, &mut Stats), (With<Enemy>, With<BlockedBy>, With<AttackReady>)>,
) {
    for (entity, mut stats) in attackers.iter_mut() {
        commands
            .entity(entity)
            .insert(ActionLock)
            .remove::<AttackReady>();
        stats.atk_timer = 0.0;

        play.write(PlayAnimation {
            entity,
            animation: AnimationId::Attack,
            looping: false,
        });
    }
}

/// Система: запуск дальних атак врагов
///
/// Условие — есть валидная цель, не заблокирован, готов. Скорость
/// обнуляется немедленно: юнит останавливается стрелять в этом же тике,
/// не дожидаясь следующего прохода навигации.
pub fn start_ranged_attacks(
    mut commands: Commands,
    mut play: EventWriter<PlayAnimation>,
    mut attackers: Query<
        (Entity, &mut Stats, &mut Velocity),
        (
            With<Enemy>,
            With<Target>,
            With<AttackReady>,
            Without<BlockedBy>,
        ),
    >,
) {
    for (entity, mut stats, mut velocity) in attackers.iter_mut() {
        commands
            .entity(entity)
            .insert(ActionLock)
            .remove::<AttackReady>();
        stats.atk_timer = 0.0;
        velocity.0 = Vec2::ZERO;

        play.write(PlayAnimation {
            entity,
            animation: AnimationId::RangedAttack,
            looping: false,
        });
    }
}

/// Система: запуск действий союзников
///
/// Лекарь играет Heal, остальные Attack. ActionLock не вешается —
/// союзники стационарны, блокировать нечего.
pub fn start_friendly_actions(
    mut commands: Commands,
    mut play: EventWriter<PlayAnimation>,
    mut actors: Query<
        (Entity, &mut Stats, Option<&Healer>),
        (With<Player>, With<Target>, With<AttackReady>),
    >,
) {
    for (entity, mut stats, healer) in actors.iter_mut() {
        commands.entity(entity).remove::<AttackReady>();
        stats.atk_timer = 0.0;

        let animation = if healer.is_some() {
            AnimationId::Heal
        } else {
            AnimationId::Attack
        };

        play.write(PlayAnimation {
            entity,
            animation,
            looping: false,
        });
    }
}
