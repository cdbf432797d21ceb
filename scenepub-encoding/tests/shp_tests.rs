mod common;

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use common::{foreign_item, group, marker, polygon, polyline};
use pretty_assertions::assert_eq;
use scenepub_encoding::shp::{BBox, MultiPart, Point, Reader, Shape, ShapeType, Writer};
use scenepub_encoding::{Encoder, EncodingError, ShpEncoder};
use std::io::{Cursor, Seek, SeekFrom};

// ── Binary layout ────────────────────────────────────────────────

#[test]
fn header_is_backpatched_on_close() {
    let mut writer = Writer::new(Cursor::new(Vec::new())).unwrap();
    writer.write(&Shape::Point(Point { x: 1.0, y: 2.0 })).unwrap();
    writer.write(&Shape::Point(Point { x: -3.0, y: 5.0 })).unwrap();
    writer.close().unwrap();
    let bytes = writer.into_inner().into_inner();

    // 100 header + 2 * (8 record header + 20 content)
    assert_eq!(bytes.len(), 156);
    let mut c = Cursor::new(&bytes);
    assert_eq!(c.read_i32::<BigEndian>().unwrap(), 9994);
    c.seek(SeekFrom::Start(24)).unwrap();
    assert_eq!(c.read_i32::<BigEndian>().unwrap(), 78);
    assert_eq!(c.read_i32::<LittleEndian>().unwrap(), 1000);
    assert_eq!(c.read_i32::<LittleEndian>().unwrap(), 1);
    let bbox: Vec<f64> = (0..4).map(|_| c.read_f64::<LittleEndian>().unwrap()).collect();
    assert_eq!(bbox, vec![-3.0, 2.0, 1.0, 5.0]);

    c.seek(SeekFrom::Start(100)).unwrap();
    assert_eq!(c.read_i32::<BigEndian>().unwrap(), 1);
    assert_eq!(c.read_i32::<BigEndian>().unwrap(), 10);
    assert_eq!(c.read_i32::<LittleEndian>().unwrap(), 1);
    assert_eq!(c.read_f64::<LittleEndian>().unwrap(), 1.0);
}

#[test]
fn empty_file_has_zero_bbox_and_null_type() {
    let mut writer = Writer::new(Cursor::new(Vec::new())).unwrap();
    writer.close().unwrap();
    let reader = Reader::new(Cursor::new(writer.into_inner().into_inner())).unwrap();
    let header = *reader.header();
    assert_eq!(header.file_len, 100);
    assert_eq!(header.shape_type, ShapeType::Null);
    assert_eq!(header.bbox, BBox { min_x: 0.0, min_y: 0.0, max_x: 0.0, max_y: 0.0 });
    assert!(reader.shapes().unwrap().is_empty());
}

#[test]
fn first_shape_fixes_file_type() {
    let mut writer = Writer::new(Cursor::new(Vec::new())).unwrap();
    let line = MultiPart::new(vec![vec![Point { x: 0.0, y: 0.0 }, Point { x: 1.0, y: 1.0 }]]);
    writer.write(&Shape::PolyLine(line.clone())).unwrap();
    assert!(!writer.accepts(ShapeType::Point));
    assert!(writer.accepts(ShapeType::Null));

    let err = writer.write(&Shape::Point(Point { x: 9.0, y: 9.0 })).unwrap_err();
    assert!(matches!(err, EncodingError::Shapefile(_)));
    assert_eq!(writer.records(), 1);
    writer.close().unwrap();

    let reader = Reader::new(Cursor::new(writer.into_inner().into_inner())).unwrap();
    assert_eq!(reader.header().shape_type, ShapeType::PolyLine);
    assert_eq!(reader.shapes().unwrap(), vec![Shape::PolyLine(line)]);
}

#[test]
fn null_shape_does_not_fix_file_type() {
    let mut writer = Writer::new(Cursor::new(Vec::new())).unwrap();
    writer.write(&Shape::Null).unwrap();
    assert_eq!(writer.shape_type(), None);
    writer.write(&Shape::Point(Point { x: 1.0, y: 1.0 })).unwrap();
    assert_eq!(writer.shape_type(), Some(ShapeType::Point));
    assert_eq!(writer.records(), 2);
}

#[test]
fn bad_file_code_is_rejected() {
    let err = Reader::new(Cursor::new(vec![0u8; 100])).err().unwrap();
    assert!(err.to_string().contains("file code"));
}

// ── Encoder round trip ───────────────────────────────────────────

#[test]
fn points_round_trip_through_a_file() {
    let coords = [(35.0, 139.0), (34.7, 135.5), (43.1, 141.3), (26.2, 127.7)];
    let layer = group(
        "cities",
        vec![
            marker("tokyo", coords[0].0, coords[0].1),
            group("west", vec![marker("osaka", coords[1].0, coords[1].1)]),
            marker("sapporo", coords[2].0, coords[2].1),
            marker("naha", coords[3].0, coords[3].1),
        ],
    );

    let file = tempfile::tempfile().unwrap();
    let mut encoder = ShpEncoder::new(file).unwrap();
    encoder.encode(&layer).unwrap();
    let mut file = encoder.into_inner();
    file.seek(SeekFrom::Start(0)).unwrap();

    let reader = Reader::new(file).unwrap();
    assert_eq!(reader.header().shape_type, ShapeType::Point);
    assert_eq!(
        reader.header().bbox,
        BBox { min_x: 127.7, min_y: 26.2, max_x: 141.3, max_y: 43.1 }
    );
    let points: Vec<(f64, f64)> = reader
        .shapes()
        .unwrap()
        .into_iter()
        .map(|s| match s {
            Shape::Point(p) => (p.y, p.x),
            other => panic!("unexpected shape {other:?}"),
        })
        .collect();
    assert_eq!(points, coords.to_vec());
}

#[test]
fn polygon_rings_become_parts() {
    let layer = polygon("area", vec![]);
    let mut encoder = ShpEncoder::new(Cursor::new(Vec::new())).unwrap();
    encoder.encode(&layer).unwrap();

    let reader = Reader::new(Cursor::new(encoder.into_inner().into_inner())).unwrap();
    let shapes = reader.shapes().unwrap();
    let Shape::Polygon(p) = &shapes[0] else {
        panic!("expected polygon");
    };
    assert_eq!(p.parts, vec![0]);
    assert_eq!(p.points.len(), 5);
    assert_eq!(p.bbox, BBox { min_x: 0.0, min_y: 0.0, max_x: 1.0, max_y: 1.0 });
}

#[test]
fn mismatched_items_are_left_out() {
    let layer = group("mixed", vec![polyline("route", vec![]), marker("pin", 1.0, 2.0)]);
    let mut encoder = ShpEncoder::new(Cursor::new(Vec::new())).unwrap();
    encoder.encode(&layer).unwrap();
    assert_eq!(encoder.writer().records(), 1);

    let reader = Reader::new(Cursor::new(encoder.into_inner().into_inner())).unwrap();
    let file_type = reader.header().shape_type;
    assert_eq!(file_type, ShapeType::PolyLine);
    let types: Vec<ShapeType> = reader.shapes().unwrap().iter().map(Shape::shape_type).collect();
    assert_eq!(types, vec![ShapeType::PolyLine]);
}

#[test]
fn ineligible_items_contribute_nothing() {
    let layer = group(
        "mixed",
        vec![
            foreign_item("x", "thirdparty", "marker"),
            foreign_item("y", "reearth", "model"),
            marker("kept", 35.0, 139.0),
        ],
    );
    let mut encoder = ShpEncoder::new(Cursor::new(Vec::new())).unwrap();
    encoder.encode(&layer).unwrap();
    assert_eq!(encoder.writer().records(), 1);
    assert_eq!(encoder.writer().shape_type(), Some(ShapeType::Point));

    let reader = Reader::new(Cursor::new(encoder.into_inner().into_inner())).unwrap();
    assert_eq!(reader.header().shape_type, ShapeType::Point);
    assert_eq!(reader.shapes().unwrap(), vec![Shape::Point(Point { x: 139.0, y: 35.0 })]);
}

#[test]
fn polyline_is_single_part() {
    let mut encoder = ShpEncoder::new(Cursor::new(Vec::new())).unwrap();
    encoder.encode(&polyline("route", vec![])).unwrap();
    assert_eq!(encoder.writer().records(), 1);
    assert_eq!(encoder.writer().shape_type(), Some(ShapeType::PolyLine));
}
