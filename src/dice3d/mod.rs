pub mod meshes;
pub mod plugin;
pub mod replay;
pub mod roll;
pub mod shake_control;
pub mod systems;
pub mod types;

pub use meshes::*;
pub use plugin::*;
pub use replay::*;
pub use roll::*;
pub use shake_control::*;
pub use systems::*;
pub use types::*;
