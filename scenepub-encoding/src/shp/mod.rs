//! ESRI Shapefile (`.shp`) main-file codec.
//!
//! Layout: a 100-byte header, then records. Each record header is big-endian
//! (record number, content length in 16-bit words); the content is
//! little-endian (shape type, payload). The header's file length and bounding
//! box are only known once every shape is written, so [`Writer::close`]
//! seeks back and patches them in.

mod reader;
mod shape;
mod writer;

pub use reader::{Header, Reader};
pub use shape::{BBox, MultiPart, Point, Shape, ShapeType};
pub use writer::Writer;

/// Magic number at the start of every shapefile.
pub const FILE_CODE: i32 = 9994;

/// Format version stored in the header.
pub const VERSION: i32 = 1000;

/// Header size in bytes.
pub const HEADER_LEN: u64 = 100;
