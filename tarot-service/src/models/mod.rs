pub mod card;
pub mod reading;

pub use card::{Card, CATALOG};
pub use reading::{Language, Question, Reading};
