use itertools::Itertools;
use log::warn;
use svg::Document;
use svg::node::element::{Definitions, Group, Text, Title, Use};

use crate::entities::{Instance, Pile};
use crate::geometry::DTransformation;
use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::Edge;
use crate::io::svg::svg_util;
use crate::io::svg::svg_util::SvgDrawOptions;
use crate::nfp::{NfpLevel, no_fit_polygon};

pub fn pile_to_svg(pile: &Pile, instance: &Instance, options: SvgDrawOptions, title: &str) -> Document {
    let bin = &pile.rect;
    let theme = &options.theme;

    let (w, h) = (bin.width() as f64, bin.height() as f64);
    let margin = 0.05 * f64::max(w, h);
    let vbox = (
        bin.x_min as f64 - margin,
        bin.y_min as f64 - margin,
        w + 2.0 * margin,
        h + 2.0 * margin,
    );

    let stroke_width = f64::min(w, h) * 0.001 * theme.stroke_width_multiplier;

    let label = {
        //print some information above the left top of the bin
        let label_content = format!(
            "height: {} | width: {} | items: {} | density: {:.3}% | {}",
            bin.height(),
            bin.width(),
            pile.len(),
            pile.density() * 100.0,
            title,
        );
        Text::new(label_content)
            .set("x", bin.x_min)
            .set("y", bin.y_min as f64 - 0.5 * 0.025 * f64::min(w, h))
            .set("font-size", f64::min(w, h) * 0.025)
            .set("font-family", "monospace")
            .set("font-weight", "500")
    };

    let highlight_cd_shape_style = &[
        ("fill", "none"),
        ("stroke-width", &*format!("{}", 0.5 * stroke_width)),
        ("stroke", "black"),
        ("stroke-opacity", "0.3"),
        (
            "stroke-dasharray",
            &*format!("{} {}", 1.0 * stroke_width, 2.0 * stroke_width),
        ),
        ("stroke-linecap", "round"),
        ("stroke-linejoin", "round"),
    ];

    //draw bin
    let bin_group = Group::new()
        .set("id", format!("bin_{}", pile.bin_id))
        .add(svg_util::data_to_path(
            svg_util::rect_data(bin),
            &[
                ("fill", &*format!("{}", theme.bin_fill)),
                ("stroke", "black"),
                ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
            ],
        ))
        .add(Title::new(format!(
            "bin, id: {}, rect: [x_min: {}, y_min: {}, x_max: {}, y_max: {}]",
            pile.bin_id, bin.x_min, bin.y_min, bin.x_max, bin.y_max
        )));

    //draw items
    let (items_group, highlight_cd_shapes_group) = {
        //define every item type present in the pile once, in its own frame
        let mut item_defs = Definitions::new();
        for item_id in pile.items().map(|(_, pi)| pi.item_id).unique() {
            let item = instance.item(item_id);
            let color = svg_util::item_color(theme.item_fill, item.id);
            item_defs = item_defs.add(
                Group::new()
                    .set("id", format!("item_{}", item.id))
                    .add(svg_util::data_to_path(
                        svg_util::polygon_data(&item.shape_orig),
                        &[
                            ("fill", &*format!("{}", color)),
                            ("stroke-width", &*format!("{}", stroke_width)),
                            ("fill-rule", "evenodd"),
                            ("stroke", "black"),
                            ("fill-opacity", "0.5"),
                        ],
                    )),
            );
        }

        let mut items_group = Group::new().set("id", "items").add(item_defs);
        let mut highlight_cd_shapes_group = Group::new().set("id", "highlight_cd_shapes");

        for (_, pi) in pile.items() {
            let title = Title::new(format!("item, id: {}, transf: [{}]", pi.item_id, pi.d_transf));
            let pi_ref = Use::new()
                .set("transform", transform_to_svg(pi.d_transf))
                .set("xlink:href", format!("#item_{}", pi.item_id))
                .add(title);
            items_group = items_group.add(pi_ref);

            if options.highlight_cd_shapes {
                //the collision shape is stored already transformed
                highlight_cd_shapes_group = highlight_cd_shapes_group.add(svg_util::data_to_path(
                    svg_util::polygon_data(&pi.shape),
                    highlight_cd_shape_style,
                ));
            }
        }
        (items_group, highlight_cd_shapes_group)
    };

    let ref_vertex_group = match options.reference_vertices {
        false => None,
        true => {
            let group = pile.items().fold(Group::new().set("id", "reference_vertices"), |g, (_, pi)| {
                g.add(svg_util::point(
                    pi.shape.reference_vertex(),
                    Some("black"),
                    Some(2.0 * stroke_width),
                ))
            });
            Some(group)
        }
    };

    //draw the no-fit polygons of a single item type against everything in the pile (if enabled)
    let nfp_group = match options.nfp_of_item {
        None => None,
        Some(item_id) if item_id >= instance.items.len() => {
            warn!("[SVG] no item with id {item_id}, skipping no-fit polygons");
            None
        }
        Some(item_id) => {
            let orbiting = &instance.item(item_id).shape_cd;
            let mut nfp_group = Group::new().set("id", format!("nfps_{item_id}"));
            for (_, pi) in pile.items() {
                match no_fit_polygon(&pi.shape, orbiting, NfpLevel::Full) {
                    Ok(nfp) => {
                        for poly in &nfp.polygons {
                            nfp_group = nfp_group.add(svg_util::data_to_path(
                                svg_util::polygon_data(poly),
                                &[
                                    ("fill", "none"),
                                    ("stroke", &*format!("{}", theme.nfp_stroke)),
                                    ("stroke-width", &*format!("{}", stroke_width)),
                                    ("stroke-opacity", "0.8"),
                                ],
                            ));
                        }
                    }
                    Err(e) => warn!("[SVG] no-fit polygon of item {item_id} failed: {e}"),
                }
            }
            Some(nfp_group)
        }
    };

    //highlight colliding items (if enabled)
    let collision_group = match options.highlight_collisions {
        false => None,
        true => {
            let line_style = [
                ("stroke", &*format!("{}", theme.collision_highlight_color)),
                ("stroke-opacity", "0.75"),
                ("stroke-width", &*format!("{}", stroke_width * 4.0)),
                (
                    "stroke-dasharray",
                    &*format!("{} {}", 4.0 * stroke_width, 8.0 * stroke_width),
                ),
                ("stroke-linecap", "round"),
                ("stroke-linejoin", "round"),
            ];
            let mut collision_group = Group::new().set("id", "collision_lines");
            for ((_, a), (_, b)) in pile.items().tuple_combinations() {
                if a.bbox.overlaps_open(&b.bbox) && a.shape.intersects(&b.shape) {
                    let edge = Edge {
                        start: a.bbox.center_point(),
                        end: b.bbox.center_point(),
                    };
                    collision_group =
                        collision_group.add(svg_util::data_to_path(svg_util::edge_data(edge), &line_style));
                }
            }
            for (_, pi) in pile.items() {
                if !bin.contains_rect(&pi.shape.bbox()) {
                    collision_group = collision_group.add(svg_util::point(
                        pi.bbox.center_point(),
                        Some(&*format!("{}", theme.collision_highlight_color)),
                        Some(3.0 * stroke_width),
                    ));
                }
            }
            Some(collision_group)
        }
    };

    let optionals = [
        Some(highlight_cd_shapes_group),
        ref_vertex_group,
        nfp_group,
        collision_group,
    ]
    .into_iter()
    .flatten()
    .fold(Group::new().set("id", "optionals"), |g, opt| g.add(opt));

    Document::new()
        .set("viewBox", vbox)
        .set("xmlns:xlink", "http://www.w3.org/1999/xlink")
        .add(bin_group)
        .add(items_group)
        .add(optionals)
        .add(label)
}

fn transform_to_svg(dt: DTransformation) -> String {
    //https://developer.mozilla.org/en-US/docs/Web/SVG/Attribute/transform
    //operations are effectively applied from right to left
    let (tx, ty) = dt.translation();
    let r = dt.rotation().to_degrees();
    format!("translate({tx} {ty}), rotate({r})")
}
