pub mod category;
pub mod fee;
pub mod jurisdiction;
pub mod money;
pub mod schedule;
pub mod transform;

pub use crate::domain::model::{CartTransformInput, CartTransformResult, CategoryFlag};
pub use crate::domain::ports::{AdminApi, AdminConfigProvider};
pub use crate::utils::error::Result;
