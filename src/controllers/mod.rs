pub mod awesome;
pub mod health;
pub mod solo;
