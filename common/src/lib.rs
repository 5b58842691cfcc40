pub mod balloons;
pub mod camera;
pub mod collision;
pub mod config;
pub mod constants;
pub mod markers;
pub mod movement;
pub mod players;
pub mod spawning;
pub mod types;
pub mod weapons;
