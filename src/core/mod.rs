pub mod codec;
pub mod controller;
pub mod store;

pub use crate::domain::model::{Capsule, FieldUpdate, Wardrobe, WardrobeResponse};
pub use crate::domain::ports::{ConfigProvider, Navigator, WardrobeClient};
pub use crate::utils::error::Result;
