use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{Result, ensure};
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use svg::node::element::path::Data;
use svg::node::element::{Circle, Path};

use crate::geometry::primitives::{Edge, Point, Polygon, Rect, SPolygon};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    #[serde(default)]
    pub theme: SvgPileTheme,
    ///Draw the (dilated) collision shapes with a dashed outline on top of the items
    #[serde(default)]
    pub highlight_cd_shapes: bool,
    ///Draw dashed lines between colliding items
    #[serde(default)]
    pub highlight_collisions: bool,
    ///Draw the reference vertex of every placed item
    #[serde(default)]
    pub reference_vertices: bool,
    ///Draw the no-fit polygons of the given item (unrotated) against every placed item
    #[serde(default)]
    pub nfp_of_item: Option<usize>,
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgPileTheme::default(),
            highlight_cd_shapes: true,
            highlight_collisions: true,
            reference_vertices: false,
            nfp_of_item: None,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgPileTheme {
    pub stroke_width_multiplier: f64,
    pub bin_fill: Color,
    pub item_fill: Color,
    pub hole_fill: Color,
    pub nfp_stroke: Color,
    pub collision_highlight_color: Color,
}

impl Default for SvgPileTheme {
    fn default() -> Self {
        SvgPileTheme::EARTH_TONES
    }
}

impl SvgPileTheme {
    pub const EARTH_TONES: SvgPileTheme = SvgPileTheme {
        stroke_width_multiplier: 2.0,
        bin_fill: Color(0xCC, 0x82, 0x4A),
        item_fill: Color(0xFF, 0xC8, 0x79),
        hole_fill: Color(0x2D, 0x2D, 0x2D),
        nfp_stroke: Color(0x1E, 0x5A, 0xC8), // BLUE
        collision_highlight_color: Color(0x00, 0xFF, 0x00), // LIME
    };

    pub const GRAY: SvgPileTheme = SvgPileTheme {
        stroke_width_multiplier: 2.5,
        bin_fill: Color(0xD3, 0xD3, 0xD3),
        item_fill: Color(0x7A, 0x7A, 0x7A),
        hole_fill: Color(0xFF, 0xFF, 0xFF),
        nfp_stroke: Color(0x20, 0x20, 0x20),
        collision_highlight_color: Color(0xD0, 0x00, 0x00), // RED
    };
}

pub fn change_brightness(color: Color, fraction: f32) -> Color {
    let Color(r, g, b) = color;

    let r = (r as f32 * fraction).min(255.0) as u8;
    let g = (g as f32 * fraction).min(255.0) as u8;
    let b = (b as f32 * fraction).min(255.0) as u8;
    Color(r, g, b)
}

/// Varies the brightness of `color` per item id, so neighbouring items of different types can be told apart.
pub fn item_color(color: Color, item_id: usize) -> Color {
    const SHADES: [f32; 5] = [1.0, 0.9, 0.8, 1.1, 0.7];
    change_brightness(color, SHADES[item_id % SHADES.len()])
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Color(pub u8, pub u8, pub u8);

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        ensure!(
            hex.len() == 6 && hex.is_ascii(),
            "invalid color: {s}, expected #RRGGBB"
        );
        let r = u8::from_str_radix(&hex[0..2], 16)?;
        let g = u8::from_str_radix(&hex[2..4], 16)?;
        let b = u8::from_str_radix(&hex[4..6], 16)?;
        Ok(Color(r, g, b))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{self}"))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_str(&s).map_err(D::Error::custom)
    }
}

/// Path data is single precision
fn xy(Point(x, y): Point) -> (f32, f32) {
    (x as f32, y as f32)
}

fn contour_data(data: Data, s_poly: &SPolygon) -> Data {
    let mut data = data.move_to(xy(s_poly.vertex(0)));
    for i in 1..s_poly.n_vertices() {
        data = data.line_to(xy(s_poly.vertex(i)));
    }
    data.close()
}

pub fn simple_polygon_data(s_poly: &SPolygon) -> Data {
    contour_data(Data::new(), s_poly)
}

/// Outer contour and holes as subpaths of a single path, to be filled with the `evenodd` rule.
pub fn polygon_data(poly: &Polygon) -> Data {
    poly.contours().fold(Data::new(), contour_data)
}

pub fn rect_data(rect: &Rect) -> Data {
    let [a, b, c, d] = rect.corners();
    Data::new()
        .move_to(xy(a))
        .line_to(xy(b))
        .line_to(xy(c))
        .line_to(xy(d))
        .close()
}

pub fn edge_data(edge: Edge) -> Data {
    Data::new().move_to(xy(edge.start)).line_to(xy(edge.end))
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}

pub fn point(Point(x, y): Point, fill: Option<&str>, rad: Option<f64>) -> Circle {
    Circle::new()
        .set("cx", x)
        .set("cy", y)
        .set("r", rad.unwrap_or(0.5))
        .set("fill", fill.unwrap_or("black"))
}
