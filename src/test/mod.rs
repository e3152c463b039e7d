//! Test modules, collected here rather than inline in each source file
//! (mirrors the teacher crate's `src/test/` layout).

mod byte_reader;
mod ewkb_reader;
mod ewkb_writer;
mod reproject;
