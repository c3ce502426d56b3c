pub mod extract;
pub mod file;
pub mod invoice;
pub mod shared;
