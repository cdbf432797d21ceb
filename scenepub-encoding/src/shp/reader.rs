use super::{BBox, FILE_CODE, HEADER_LEN, Shape, ShapeType};
use crate::{EncodingError, EncodingResult};
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};

/// The fixed 100-byte file header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Header {
    /// Total file length in bytes.
    pub file_len: u64,
    pub version: i32,
    pub shape_type: ShapeType,
    pub bbox: BBox,
}

/// Reads records back out of a `.shp` file.
pub struct Reader<R: Read + Seek> {
    inner: R,
    header: Header,
    start: u64,
    pos: u64,
}

impl<R: Read + Seek> Reader<R> {
    /// Parses the header at the current position of `inner`.
    pub fn new(mut inner: R) -> EncodingResult<Self> {
        let start = inner.stream_position()?;
        let code = inner.read_i32::<BigEndian>()?;
        if code != FILE_CODE {
            return Err(EncodingError::Shapefile(format!("bad file code {code}")));
        }
        inner.seek(SeekFrom::Current(20))?;
        let words = inner.read_i32::<BigEndian>()?;
        let version = inner.read_i32::<LittleEndian>()?;
        let shape_type = ShapeType::from_code(inner.read_i32::<LittleEndian>()?)?;
        let bbox = BBox::read(&mut inner)?;
        inner.seek(SeekFrom::Start(start + HEADER_LEN))?;

        if words < 0 || (words as u64) * 2 < HEADER_LEN {
            return Err(EncodingError::Shapefile(format!("bad file length {words}")));
        }
        Ok(Self {
            inner,
            header: Header {
                file_len: words as u64 * 2,
                version,
                shape_type,
                bbox,
            },
            start,
            pos: HEADER_LEN,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Reads the next record as `(record number, shape)`; `None` at the end
    /// of the file.
    pub fn next_shape(&mut self) -> EncodingResult<Option<(i32, Shape)>> {
        if self.pos >= self.header.file_len {
            return Ok(None);
        }
        self.inner.seek(SeekFrom::Start(self.start + self.pos))?;
        let number = self.inner.read_i32::<BigEndian>()?;
        let words = self.inner.read_i32::<BigEndian>()?;
        if words < 2 {
            return Err(EncodingError::Shapefile(format!(
                "record {number} has invalid length {words}"
            )));
        }
        let shape = Shape::read(&mut self.inner)?;
        self.pos += 8 + words as u64 * 2;
        Ok(Some((number, shape)))
    }

    /// Reads every remaining record.
    pub fn shapes(mut self) -> EncodingResult<Vec<Shape>> {
        let mut shapes = Vec::new();
        while let Some((_, shape)) = self.next_shape()? {
            shapes.push(shape);
        }
        Ok(shapes)
    }
}
