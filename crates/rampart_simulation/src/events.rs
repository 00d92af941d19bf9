//! События ядра симуляции
//!
//! Все очереди — внутрипроцессные Bevy Events (двойная буферизация),
//! эмиссия и потребление строго в одном потоке, порядок FIFO внутри тика.
//! Никаких cross-thread каналов.

use bevy::prelude::*;

/// Идентификатор анимации
///
/// Неявная машина состояний: текущая играющая анимация и есть состояние
/// юнита (владеет ею внешний playback). Attack/RangedAttack/Heal — разовые,
/// Idle/Walk — зацикленные.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationId {
    Idle,
    Walk,
    Attack,
    RangedAttack,
    Heal,
}

/// Запрос на проигрывание анимации
///
/// Потребляется внешним playback'ом. Для каждой не-зацикленной анимации
/// playback обязан вернуть ровно один AnimationFinished.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayAnimation {
    pub entity: Entity,
    pub animation: AnimationId,
    pub looping: bool,
}

/// Разовая анимация доиграла до конца (эмитится внешним playback'ом)
#[derive(Event, Debug, Clone, Copy)]
pub struct AnimationFinished {
    pub entity: Entity,
}

/// Враг дошёл до базы. Потребляется внешней game-state логикой
/// (потеря жизни и т.п.); ядро только производит
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct EnemyArriveHome;
