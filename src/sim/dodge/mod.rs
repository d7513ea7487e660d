//! Dodge: drag the red square and stay clear of the bouncing enemies

mod input;
pub mod state;
pub mod tick;

pub use state::{DodgeState, Enemy, Player, generate_enemies};
pub use tick::{clock, move_enemy, random_event, tick};
