//! End-to-end tests for object views over complete images.

mod arrays;
mod concurrency;
mod copies;
mod file_images;
mod maps;
mod streams;
mod vectors;
