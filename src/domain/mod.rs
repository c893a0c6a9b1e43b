pub mod awesome;
pub mod backup;
pub mod blog;
