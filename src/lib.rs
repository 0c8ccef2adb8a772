#![doc = include_str!("../README.md")]

pub use blur::box_blur;
pub use engine::{Engine, EngineKind, FirEngine, ImageOpsEngine, ResampleEngine, SkiaEngine};
pub use errors::*;
pub use letterbox::letterbox;
pub use plan::{Background, FitPlan, Letterbox};

mod blur;
pub mod engine;
mod errors;
mod letterbox;
mod plan;
