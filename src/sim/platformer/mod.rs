//! Platform: jump across gaps to reach the goal post on each level

mod input;
pub mod level;
pub mod state;
pub mod tick;

pub use input::Key;
pub use level::{Level, generate_level, generate_levels};
pub use state::{Inputs, Jump, PlatformerState, Player, generate_debris};
pub use tick::tick;
