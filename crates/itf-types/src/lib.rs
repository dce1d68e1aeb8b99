pub mod geometry;
pub mod types;
pub mod wire;

pub use geometry::{LineGeometry, Point, Rect};
pub use types::*;
pub use wire::{TranslateRequest, TranslateResponse, WireMessage};
