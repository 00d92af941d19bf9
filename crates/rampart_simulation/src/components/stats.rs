//! Stats — боевые характеристики юнита
//!
//! Хранится на каждом боевом entity. hp/max_hp и тег Injured мутируются
//! внешней damage/health логикой; ядро их только читает. atk_timer
//! принадлежит системам таймера и диспетчеризации атак (combat.rs).

use bevy::prelude::*;

/// Боевые характеристики юнита
///
/// Инвариант: 0.0 ≤ hp ≤ max_hp
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Stats {
    /// Текущее здоровье
    pub hp: f32,
    /// Максимальное здоровье
    pub max_hp: f32,
    /// Атака
    pub atk: f32,
    /// Защита
    pub def: f32,
    /// Дальность атаки (без учёта компенсации UNIT_RADIUS)
    pub range: f32,
    /// Интервал между атаками (секунды)
    pub atk_interval: f32,
    /// Таймер готовности. Сбрасывается только при фактическом старте атаки
    pub atk_timer: f32,
    /// Уровень
    pub level: i32,
    /// Редкость
    pub rarity: i32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            hp: 100.0,
            max_hp: 100.0,
            atk: 10.0,
            def: 5.0,
            range: 100.0,
            atk_interval: 1.0,
            atk_timer: 0.0,
            level: 1,
            rarity: 1,
        }
    }
}

impl Stats {
    /// Доля здоровья (0.0..=1.0). Используется хилером для выбора цели
    pub fn hp_ratio(&self) -> f32 {
        self.hp / self.max_hp
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.hp = (self.hp - amount).max(0.0);
    }

    pub fn heal(&mut self, amount: f32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hp_ratio() {
        let stats = Stats {
            hp: 30.0,
            max_hp: 100.0,
            ..Default::default()
        };
        assert_eq!(stats.hp_ratio(), 0.3);
    }

    #[test]
    fn test_take_damage_floors_at_zero() {
        let mut stats = Stats::default();
        stats.take_damage(250.0);
        assert_eq!(stats.hp, 0.0);
        assert!(!stats.is_alive());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut stats = Stats::default();
        stats.take_damage(40.0);
        stats.heal(100.0);
        assert_eq!(stats.hp, stats.max_hp);
    }
}
