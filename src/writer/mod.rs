//! EWKB encoding. TWKB has no writer (see the design notes: the system
//! encodes only back into EWKB).

mod ewkb;

pub use ewkb::encode_ewkb;
