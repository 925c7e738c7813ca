pub mod config;

pub use config::{
    parse_hex_color, FieldConfig, GameConfig, LadderConfig, LossConfig, PhysicsConfig,
    SpawnConfig, VisualsConfig, WindowConfig,
};
