use crate::feature::{Feature, MarkerFeature, PolygonFeature, PolylineFeature};
use crate::{Encoder, EncodingResult};
use scenepub_layer::merging::{SealedLayer, SealedLayerItem};
use scenepub_types::{LatLngHeight, LayerId};
use std::io::Write;

const KML_NS: &str = "http://www.opengis.net/kml/2.2";

/// Writes a KML 2.2 document.
///
/// Each drawn item gets a shared style; styles are collected in a
/// [`StyleRegistry`] during the walk and written at the top of the
/// `Document`, ahead of the placemarks that reference them. Groups nested
/// below the encoded layer become `Folder`s.
pub struct KmlEncoder<W> {
    writer: W,
}

impl<W: Write> KmlEncoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Encoder for KmlEncoder<W> {
    fn encode(&mut self, layer: &SealedLayer) -> EncodingResult<()> {
        let mut styles = StyleRegistry::default();
        let mut document = Element::new("Document");

        let body = match layer {
            SealedLayer::Item(item) => placemark(item, &mut styles)?.into_iter().collect(),
            SealedLayer::Group(group) => {
                document.push(Element::text("name", &group.common.name));
                let mut children = Vec::new();
                for child in &group.children {
                    children.extend(node(child, &mut styles)?);
                }
                children
            }
        };
        document.children.extend(styles.into_elements());
        document.children.extend(body);

        let mut kml = Element::new("kml").attr("xmlns", KML_NS);
        kml.push(document);

        writeln!(self.writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        kml.write(&mut self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

fn node(layer: &SealedLayer, styles: &mut StyleRegistry) -> EncodingResult<Option<Element>> {
    match layer {
        SealedLayer::Item(item) => placemark(item, styles),
        SealedLayer::Group(group) => {
            let mut folder = Element::new("Folder");
            folder.push(Element::text("name", &group.common.name));
            for child in &group.children {
                folder.children.extend(node(child, styles)?);
            }
            Ok(Some(folder))
        }
    }
}

fn placemark(item: &SealedLayerItem, styles: &mut StyleRegistry) -> EncodingResult<Option<Element>> {
    let Some(feature) = Feature::from_item(item)? else {
        return Ok(None);
    };

    let style_id = style_id(&item.common.name, item.common.id);
    let (style, geometry) = match &feature {
        Feature::Marker(m) => marker(m),
        Feature::Polygon(p) => polygon(p),
        Feature::Polyline(l) => polyline(l),
    };
    styles.register(&style_id, style);

    let mut placemark = Element::new("Placemark");
    placemark.push(Element::text("name", &item.common.name));
    placemark.push(Element::text("styleUrl", &format!("#{style_id}")));
    placemark.push(geometry);
    Ok(Some(placemark))
}

fn marker(m: &MarkerFeature) -> (Vec<Element>, Element) {
    let mut icon_style = Element::new("IconStyle");
    if let Some(color) = m.point_color {
        icon_style.push(Element::text("color", &color.to_kml()));
    }
    if let Some(size) = m.image_size {
        icon_style.push(Element::text("scale", &size.to_string()));
    }
    if let Some(image) = &m.image {
        let mut icon = Element::new("Icon");
        icon.push(Element::text("href", image));
        icon_style.push(icon);
    }

    let position = LatLngHeight {
        lat: m.location.lat,
        lng: m.location.lng,
        height: m.height.unwrap_or(0.0),
    };
    let mut point = Element::new("Point");
    point.push(Element::text("coordinates", &coordinates(&[position])));
    (vec![icon_style], point)
}

fn polygon(p: &PolygonFeature) -> (Vec<Element>, Element) {
    let mut poly_style = Element::new("PolyStyle");
    if let Some(color) = p.fill_color {
        poly_style.push(Element::text("color", &color.to_kml()));
    }
    if let Some(fill) = p.fill {
        poly_style.push(Element::text("fill", flag(fill)));
    }
    if let Some(stroke) = p.stroke {
        poly_style.push(Element::text("outline", flag(stroke)));
    }
    let line_style = line_style(p.stroke_color.map(|c| c.to_kml()), p.stroke_width);

    let mut geometry = Element::new("Polygon");
    for (i, ring) in p.polygon.iter().enumerate() {
        let boundary = if i == 0 { "outerBoundaryIs" } else { "innerBoundaryIs" };
        let mut linear_ring = Element::new("LinearRing");
        linear_ring.push(Element::text("coordinates", &coordinates(ring)));
        let mut b = Element::new(boundary);
        b.push(linear_ring);
        geometry.push(b);
    }
    (vec![poly_style, line_style], geometry)
}

fn polyline(l: &PolylineFeature) -> (Vec<Element>, Element) {
    let line_style = line_style(l.stroke_color.map(|c| c.to_kml()), l.stroke_width);
    let mut geometry = Element::new("LineString");
    geometry.push(Element::text("coordinates", &coordinates(&l.coordinates)));
    (vec![line_style], geometry)
}

fn line_style(color: Option<String>, width: Option<f64>) -> Element {
    let mut style = Element::new("LineStyle");
    if let Some(color) = color {
        style.push(Element::text("color", &color));
    }
    if let Some(width) = width {
        style.push(Element::text("width", &width.to_string()));
    }
    style
}

fn flag(b: bool) -> &'static str {
    if b { "1" } else { "0" }
}

fn coordinates(coords: &[LatLngHeight]) -> String {
    coords
        .iter()
        .map(|c| format!("{},{},{}", c.lng, c.lat, c.height))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Style id for an item: its name reduced to `[A-Za-z0-9_-]`, then `_` and the
/// last five characters of the layer id.
pub(crate) fn style_id(name: &str, id: LayerId) -> String {
    let sanitized: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    let id = id.to_string();
    let suffix = &id[id.len().saturating_sub(5)..];
    format!("{sanitized}_{suffix}")
}

/// Shared styles generated during one encode, in first-seen order.
#[derive(Debug, Default)]
pub(crate) struct StyleRegistry {
    styles: Vec<Element>,
    ids: Vec<String>,
}

impl StyleRegistry {
    fn register(&mut self, id: &str, parts: Vec<Element>) {
        if self.ids.iter().any(|existing| existing == id) {
            return;
        }
        let mut style = Element::new("Style").attr("id", id);
        style.children.extend(parts);
        self.ids.push(id.to_string());
        self.styles.push(style);
    }

    fn into_elements(self) -> Vec<Element> {
        self.styles
    }
}

/// Minimal XML element tree; only what KML output needs.
#[derive(Debug)]
pub(crate) struct Element {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    fn text(name: &'static str, text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::new(name)
        }
    }

    fn attr(mut self, key: &'static str, value: &str) -> Self {
        self.attrs.push((key, value.to_string()));
        self
    }

    fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    fn write<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        write!(w, "<{}", self.name)?;
        for (key, value) in &self.attrs {
            write!(w, r#" {key}="{}""#, escape(value))?;
        }
        if self.text.is_none() && self.children.is_empty() {
            return write!(w, "/>");
        }
        write!(w, ">")?;
        if let Some(text) = &self.text {
            write!(w, "{}", escape(text))?;
        }
        for child in &self.children {
            child.write(w)?;
        }
        write!(w, "</{}>", self.name)
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
