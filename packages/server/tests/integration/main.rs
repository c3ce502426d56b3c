
mod invoice;
