pub mod narration;
pub mod recipe;
