//! Platform-agnostic core module - generation, motion, camera and state,
//! shared between the WASM and native frontends

pub mod animation;
pub mod camera;
pub mod config;
pub mod context;
pub mod distribution;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod motion;
pub mod orbit;
pub mod panel;
pub mod params;
pub mod scene;
pub mod viewport;

pub use animation::{AnimationDriver, DriverState};
pub use camera::PerspectiveCamera;
pub use config::{GalaxyConfig, CONFIG_ENV};
pub use context::GalaxyContext;
pub use error::ConfigError;
pub use generator::GalaxyGenerator;
pub use geometry::{PointAttributes, StarVertex};
pub use orbit::OrbitControls;
pub use panel::{PanelBinding, PanelEvent, UpdateMode};
pub use params::{BlendMode, GalaxyParams, Rgb};
pub use scene::{CloudId, Material, PointCloud, Scene};
pub use viewport::Viewport;
