pub mod id;
pub mod search;
pub mod store;

pub use crate::domain::model::{Coordinate, PlaceDraft, PlaceRecord};
pub use crate::domain::ports::{
    ConfigProvider, CorruptFilePolicy, IdGenerator, PlaceRepository, Storage,
};
pub use crate::utils::error::Result;
