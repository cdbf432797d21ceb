use crate::{EncodingError, EncodingResult};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Shape types this codec reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ShapeType {
    Null = 0,
    Point = 1,
    PolyLine = 3,
    Polygon = 5,
}

impl ShapeType {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> EncodingResult<Self> {
        match code {
            0 => Ok(Self::Null),
            1 => Ok(Self::Point),
            3 => Ok(Self::PolyLine),
            5 => Ok(Self::Polygon),
            other => Err(EncodingError::Shapefile(format!("unsupported shape type {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned bounding box, grown one point at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    /// An empty box; the first `extend` sets all four edges.
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x
    }

    pub fn extend(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn union(&mut self, other: &BBox) {
        if other.is_empty() {
            return;
        }
        self.extend(Point { x: other.min_x, y: other.min_y });
        self.extend(Point { x: other.max_x, y: other.max_y });
    }

    /// The box as stored on disk; an empty box is written as zeros.
    pub(crate) fn or_zero(&self) -> Self {
        if self.is_empty() {
            Self { min_x: 0.0, min_y: 0.0, max_x: 0.0, max_y: 0.0 }
        } else {
            *self
        }
    }

    pub(crate) fn write<W: Write>(&self, w: &mut W) -> EncodingResult<()> {
        let b = self.or_zero();
        for v in [b.min_x, b.min_y, b.max_x, b.max_y] {
            w.write_f64::<LittleEndian>(v)?;
        }
        Ok(())
    }

    pub(crate) fn read<R: Read>(r: &mut R) -> EncodingResult<Self> {
        Ok(Self {
            min_x: r.read_f64::<LittleEndian>()?,
            min_y: r.read_f64::<LittleEndian>()?,
            max_x: r.read_f64::<LittleEndian>()?,
            max_y: r.read_f64::<LittleEndian>()?,
        })
    }
}

impl Default for BBox {
    fn default() -> Self {
        Self::empty()
    }
}

/// Parts-and-points payload shared by polylines and polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPart {
    pub bbox: BBox,
    /// Index into `points` where each part starts.
    pub parts: Vec<i32>,
    pub points: Vec<Point>,
}

impl MultiPart {
    pub fn new(parts: Vec<Vec<Point>>) -> Self {
        let mut bbox = BBox::empty();
        let mut starts = Vec::with_capacity(parts.len());
        let mut points = Vec::new();
        for part in parts {
            starts.push(points.len() as i32);
            for p in part {
                bbox.extend(p);
                points.push(p);
            }
        }
        Self {
            bbox: bbox.or_zero(),
            parts: starts,
            points,
        }
    }

    /// Points of each part, in order.
    pub fn part_points(&self) -> Vec<&[Point]> {
        let mut ends: Vec<usize> = self.parts.iter().skip(1).map(|&i| i as usize).collect();
        ends.push(self.points.len());
        self.parts
            .iter()
            .zip(ends)
            .map(|(&start, end)| &self.points[start as usize..end])
            .collect()
    }

    fn content_len(&self) -> usize {
        // bbox + numParts + numPoints + parts + points
        32 + 4 + 4 + 4 * self.parts.len() + 16 * self.points.len()
    }

    fn write<W: Write>(&self, w: &mut W) -> EncodingResult<()> {
        self.bbox.write(w)?;
        w.write_i32::<LittleEndian>(self.parts.len() as i32)?;
        w.write_i32::<LittleEndian>(self.points.len() as i32)?;
        for &part in &self.parts {
            w.write_i32::<LittleEndian>(part)?;
        }
        for p in &self.points {
            w.write_f64::<LittleEndian>(p.x)?;
            w.write_f64::<LittleEndian>(p.y)?;
        }
        Ok(())
    }

    fn read<R: Read>(r: &mut R) -> EncodingResult<Self> {
        let bbox = BBox::read(r)?;
        let num_parts = r.read_i32::<LittleEndian>()?;
        let num_points = r.read_i32::<LittleEndian>()?;
        if num_parts < 0 || num_points < 0 {
            return Err(EncodingError::Shapefile(format!(
                "negative part or point count ({num_parts}, {num_points})"
            )));
        }
        let parts = (0..num_parts)
            .map(|_| r.read_i32::<LittleEndian>())
            .collect::<Result<Vec<_>, _>>()?;
        if parts.iter().any(|&p| p < 0 || p > num_points) || parts.windows(2).any(|w| w[0] > w[1]) {
            return Err(EncodingError::Shapefile("part index out of range".into()));
        }
        let mut points = Vec::with_capacity(num_points as usize);
        for _ in 0..num_points {
            points.push(Point {
                x: r.read_f64::<LittleEndian>()?,
                y: r.read_f64::<LittleEndian>()?,
            });
        }
        Ok(Self { bbox, parts, points })
    }
}

/// One shapefile record.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Null,
    Point(Point),
    PolyLine(MultiPart),
    Polygon(MultiPart),
}

impl Shape {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Self::Null => ShapeType::Null,
            Self::Point(_) => ShapeType::Point,
            Self::PolyLine(_) => ShapeType::PolyLine,
            Self::Polygon(_) => ShapeType::Polygon,
        }
    }

    pub fn bbox(&self) -> BBox {
        match self {
            Self::Null => BBox::empty(),
            Self::Point(p) => {
                let mut b = BBox::empty();
                b.extend(*p);
                b
            }
            Self::PolyLine(m) | Self::Polygon(m) => m.bbox,
        }
    }

    /// Record content size in bytes, shape type included.
    pub(crate) fn content_len(&self) -> usize {
        4 + match self {
            Self::Null => 0,
            Self::Point(_) => 16,
            Self::PolyLine(m) | Self::Polygon(m) => m.content_len(),
        }
    }

    /// Writes the record content: shape type, then payload.
    pub(crate) fn write<W: Write>(&self, w: &mut W) -> EncodingResult<()> {
        w.write_i32::<LittleEndian>(self.shape_type().code())?;
        match self {
            Self::Null => Ok(()),
            Self::Point(p) => {
                w.write_f64::<LittleEndian>(p.x)?;
                w.write_f64::<LittleEndian>(p.y)?;
                Ok(())
            }
            Self::PolyLine(m) | Self::Polygon(m) => m.write(w),
        }
    }

    pub(crate) fn read<R: Read>(r: &mut R) -> EncodingResult<Self> {
        match ShapeType::from_code(r.read_i32::<LittleEndian>()?)? {
            ShapeType::Null => Ok(Self::Null),
            ShapeType::Point => Ok(Self::Point(Point {
                x: r.read_f64::<LittleEndian>()?,
                y: r.read_f64::<LittleEndian>()?,
            })),
            ShapeType::PolyLine => Ok(Self::PolyLine(MultiPart::read(r)?)),
            ShapeType::Polygon => Ok(Self::Polygon(MultiPart::read(r)?)),
        }
    }
}
