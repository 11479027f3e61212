/// Mouse hit-testing and canvas scrolling
pub mod coordinates;
pub mod scroll;

pub use coordinates::{hit_test, HitTarget, ScreenLayout};
