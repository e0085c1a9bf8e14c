pub mod content_generator;
