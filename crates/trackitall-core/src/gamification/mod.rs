//! Points, levels, rewards and badges.

mod badges;
mod points;
mod rewards;

pub use badges::{ActivitySnapshot, Badge, BadgeCatalog, BadgeCondition, BadgeDefinition};
pub use points::{
    level_for, LevelProgress, PointEvent, PointsLedger, PointsUpdate, UserStats, MAX_LEVEL,
    POINTS_PER_LEVEL,
};
pub use rewards::{RewardAction, RewardTable};
