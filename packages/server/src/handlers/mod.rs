pub mod extract;
pub mod file;
pub mod health;
pub mod invoice;
