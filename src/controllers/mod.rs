pub mod health;
pub mod narration;
