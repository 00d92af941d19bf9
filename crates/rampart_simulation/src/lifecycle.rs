//! Entity Removal — пакетное уничтожение помеченных мёртвыми
//!
//! Выполняется первой системой тика: всё, что получило тег Dead в
//! прошлом тике, исчезает до того, как решающие системы построят свои
//! view. Немедленное уничтожение внутри тика запрещено — иначе другие
//! системы могли бы наблюдать полу-удалённый entity.

use bevy::prelude::*;

use crate::components::Dead;
use crate::logger;

/// Система: уничтожает все entity с тегом Dead (вместе с компонентами)
pub fn despawn_dead(mut commands: Commands, dead: Query<Entity, With<Dead>>) {
    for entity in dead.iter() {
        commands.entity(entity).despawn();
        logger::log_info(&format!("Entity {entity:?} destroyed"));
    }
}
