pub mod balloons;
pub mod combat;
pub mod effects;
pub mod items;
pub mod players;
pub mod presentation;
pub mod projectiles;
pub mod session;
