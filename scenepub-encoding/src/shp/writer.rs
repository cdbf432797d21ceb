use super::{BBox, FILE_CODE, HEADER_LEN, Shape, ShapeType, VERSION};
use crate::{EncodingError, EncodingResult};
use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use std::io::{Seek, SeekFrom, Write};

/// Streams shapes into a `.shp` file.
///
/// The file's shape type is fixed by the first non-null shape written; later
/// shapes must match it. The header is reserved up front and filled in by
/// [`close`](Self::close).
pub struct Writer<W: Write + Seek> {
    inner: W,
    start: u64,
    shape_type: Option<ShapeType>,
    bbox: BBox,
    /// Bytes written so far, header included.
    len: u64,
    records: i32,
}

impl<W: Write + Seek> Writer<W> {
    /// Starts a new file at the current position of `inner`.
    pub fn new(mut inner: W) -> EncodingResult<Self> {
        let start = inner.stream_position()?;
        inner.write_all(&[0u8; HEADER_LEN as usize])?;
        Ok(Self {
            inner,
            start,
            shape_type: None,
            bbox: BBox::empty(),
            len: HEADER_LEN,
            records: 0,
        })
    }

    /// Whether a shape of `shape_type` may be written to this file. Null
    /// shapes fit any file.
    pub fn accepts(&self, shape_type: ShapeType) -> bool {
        shape_type == ShapeType::Null || self.shape_type.is_none_or(|t| t == shape_type)
    }

    /// Appends one record and returns its 1-based record number. A shape of
    /// another type than the file's is refused.
    pub fn write(&mut self, shape: &Shape) -> EncodingResult<i32> {
        let shape_type = shape.shape_type();
        if !self.accepts(shape_type) {
            return Err(EncodingError::Shapefile(format!(
                "cannot write {shape_type:?} to a {:?} file",
                self.shape_type.unwrap_or(ShapeType::Null)
            )));
        }
        if shape_type != ShapeType::Null {
            self.shape_type.get_or_insert(shape_type);
        }

        self.records += 1;
        let content_len = shape.content_len();
        self.inner.write_i32::<BigEndian>(self.records)?;
        self.inner.write_i32::<BigEndian>((content_len / 2) as i32)?;
        shape.write(&mut self.inner)?;

        self.bbox.union(&shape.bbox());
        self.len += 8 + content_len as u64;
        Ok(self.records)
    }

    pub fn shape_type(&self) -> Option<ShapeType> {
        self.shape_type
    }

    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    pub fn records(&self) -> i32 {
        self.records
    }

    /// Writes the header (file length, shape type, bounding box) and flushes.
    /// The writer stays positioned at the end of the file.
    pub fn close(&mut self) -> EncodingResult<()> {
        let end = self.start + self.len;
        self.inner.seek(SeekFrom::Start(self.start))?;

        self.inner.write_i32::<BigEndian>(FILE_CODE)?;
        for _ in 0..5 {
            self.inner.write_i32::<BigEndian>(0)?;
        }
        self.inner.write_i32::<BigEndian>((self.len / 2) as i32)?;
        self.inner.write_i32::<LittleEndian>(VERSION)?;
        self.inner
            .write_i32::<LittleEndian>(self.shape_type.unwrap_or(ShapeType::Null).code())?;
        self.bbox.write(&mut self.inner)?;
        // Z and M ranges are unused for 2D shapes.
        for _ in 0..4 {
            self.inner.write_f64::<LittleEndian>(0.0)?;
        }

        self.inner.seek(SeekFrom::Start(end))?;
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
