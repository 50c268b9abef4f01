pub mod health;
pub mod stories;

pub use health::health_check;
pub use stories::{insert, search, suggest_story};
