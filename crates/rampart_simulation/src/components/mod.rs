//! ECS Components для боевых entity
//!
//! Организация по доменам:
//! - stats: боевые характеристики (Stats)
//! - roles: ролевые компоненты (Enemy, Player)
//! - relations: слабые ссылки между entity (Target, BlockedBy)
//! - tags: zero-size маркеры состояний (Dead, AttackReady, ActionLock, ...)
//! - motion: скорость для внешней интеграции движения (Velocity)
//! - render: поле ориентации для внешнего рендера (SpriteOrientation)

pub mod motion;
pub mod relations;
pub mod render;
pub mod roles;
pub mod stats;
pub mod tags;

// Re-exports для удобного импорта
pub use motion::*;
pub use relations::*;
pub use render::*;
pub use roles::*;
pub use stats::*;
pub use tags::*;
