pub mod invoice;
pub mod stored_file;
