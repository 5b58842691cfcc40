pub mod melee;
pub mod obstacles;
pub mod pickups;
pub mod projectiles;

pub use melee::{collect_melee_hits, in_melee_cone};
pub use obstacles::{ObstacleContact, check_obstacles, ground_height_at};
pub use pickups::overlap_player_vs_pickup;
pub use projectiles::{projectile_beyond_range, projectile_hits_balloon};
