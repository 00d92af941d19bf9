//! Animation State Reconciliation — возврат в базовое состояние
//!
//! Внешний playback доигрывает разовую анимацию и эмитит
//! AnimationFinished; ядро в ответ снимает ActionLock и запускает
//! зацикленную базовую анимацию по текущей роли. События обрабатываются
//! строго FIFO. Событие для уже уничтоженного entity — норма (юнит мог
//! умереть, пока доигрывала анимация), оно молча пропускается.

use bevy::prelude::*;

use crate::components::{ActionLock, BlockedBy, Enemy, Player};
use crate::events::{AnimationFinished, AnimationId, PlayAnimation};

/// Система: сверяет состояние анимации по завершении разовой
///
/// Враг: Idle, если заблокирован (стоит в ближнем бою), иначе Walk.
/// Союзник: всегда Idle. Ни то ни другое — только снять лок.
pub fn reconcile_animation_state(
    mut commands: Commands,
    mut finished: EventReader<AnimationFinished>,
    mut play: EventWriter<PlayAnimation>,
    roles: Query<(Option<&Enemy>, Option<&Player>, Option<&BlockedBy>)>,
) {
    for event in finished.read() {
        let Ok((enemy, player, blocked)) = roles.get(event.entity) else {
            continue;
        };

        commands.entity(event.entity).remove::<ActionLock>();

        let animation = if enemy.is_some() {
            if blocked.is_some() {
                AnimationId::Idle
            } else {
                AnimationId::Walk
            }
        } else if player.is_some() {
            AnimationId::Idle
        } else {
            continue;
        };

        play.write(PlayAnimation {
            entity: event.entity,
            animation,
            looping: true,
        });
    }
}
