pub mod model;

pub use model::{AdditionalInformation, Ingredient, Recipe};
