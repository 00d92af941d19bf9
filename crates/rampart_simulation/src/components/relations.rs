//! Слабые ссылки между entity: Target и BlockedBy
//!
//! Ни одна из них не владеет referent'ом. Bevy Entity — generational
//! handle: Query::get по уничтоженному entity возвращает Err, а не
//! повисший доступ. Валидация выполняется каждый тик (targeting.rs).

use bevy::prelude::*;

/// Захваченная цель (атака или лечение)
///
/// Присутствие компонента == "юнит в состоянии захвата". Поиск цели
/// (targeting) и действия над ней (combat) разнесены по системам.
#[derive(Component, Debug, Clone, Copy)]
pub struct Target {
    pub entity: Entity,
}

/// Активное ближнее сцепление: кто меня блокирует
///
/// Пишется внешним детектором сцеплений; ядро только читает присутствие.
#[derive(Component, Debug, Clone, Copy)]
pub struct BlockedBy {
    pub blocker: Entity,
}
