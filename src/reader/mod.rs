//! Binary decoders: a shared [`byte_reader`] cursor, the EWKB grammar, and
//! the TWKB grammar.

pub(crate) mod byte_reader;
mod ewkb;
mod twkb;

pub use byte_reader::ByteReader;
pub use ewkb::decode_ewkb;
pub use twkb::decode_twkb;
