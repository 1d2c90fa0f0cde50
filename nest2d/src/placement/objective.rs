use crate::entities::Pile;
use crate::geometry::primitives::{Point, Rect};
use crate::placement::would_fit;

/// Everything an [`ObjectFunction`] gets to see about a candidate placement.
#[derive(Clone, Copy, Debug)]
pub struct CandidatePile<'a> {
    /// The bin
    pub bin: Rect,
    /// The pile before the candidate is added
    pub pile: &'a Pile,
    /// Bounding box of the items in the pile, `None` if it is empty
    pub pile_bbox: Option<Rect>,
    /// Bounding box of the candidate item in its candidate position
    pub item_bbox: Rect,
    /// Position of the reference vertex of the candidate
    pub reference: Point,
    pub item_area: f64,
    /// Total area of the items in the pile
    pub area_used: f64,
    /// Normalization factor for lengths, square root of the bin area
    pub norm: f64,
    pub penalty: f64,
}

impl CandidatePile<'_> {
    /// Bounding box of the pile including the candidate
    pub fn full_bbox(&self) -> Rect {
        match self.pile_bbox {
            Some(bb) => Rect::bounding_rect(bb, self.item_bbox),
            None => self.item_bbox,
        }
    }

    pub fn n_placed(&self) -> usize {
        self.pile.len()
    }
}

/// Scores candidate placements, lower is better.
pub trait ObjectFunction: Send + Sync {
    fn score(&self, candidate: &CandidatePile) -> f64;
}

impl<F> ObjectFunction for F
where
    F: Fn(&CandidatePile) -> f64 + Send + Sync,
{
    fn score(&self, candidate: &CandidatePile) -> f64 {
        self(candidate)
    }
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

fn to_f64(p: Point) -> (f64, f64) {
    p.into()
}

/// Pulls the reference vertex towards the center of the bin.
/// Candidates for which the pile would no longer fit the bin are pushed behind all others.
#[derive(Clone, Copy, Debug, Default)]
pub struct BinCenterObjective;

impl ObjectFunction for BinCenterObjective {
    fn score(&self, c: &CandidatePile) -> f64 {
        let d = distance(to_f64(c.reference), c.bin.centroid()) / c.norm;
        match would_fit(&c.full_bbox(), &c.bin) {
            true => d,
            false => 2.0 * c.penalty - d,
        }
    }
}

/// Bottom-most, then left-most position of the candidate's bounding box.
#[derive(Clone, Copy, Debug, Default)]
pub struct BottomLeftObjective;

impl ObjectFunction for BottomLeftObjective {
    fn score(&self, c: &CandidatePile) -> f64 {
        let dy = (c.item_bbox.y_min - c.bin.y_min) as f64;
        let dx = (c.item_bbox.x_min - c.bin.x_min) as f64;
        (dy * (c.bin.width() + 1) as f64 + dx) / (c.norm * c.norm)
    }
}

/// Gathers items around the center of the pile.
///
/// Big items are attracted to the center of the pile by their closest anchor point (corners and center of
/// their bounding box) while keeping the pile compact, and are rewarded for aligning with a placed item of
/// the same area. Small items are attracted to the big ones, or to the bin center if there are none.
/// Piles outgrowing the bin get a quadratic penalty.
#[derive(Clone, Copy, Debug)]
pub struct GravityObjective {
    /// Fraction of the bin area above which an item is considered big
    pub big_item_threshold: f64,
}

impl Default for GravityObjective {
    fn default() -> Self {
        Self {
            big_item_threshold: 0.02,
        }
    }
}

impl GravityObjective {
    fn is_big(&self, area: f64, bin: &Rect) -> bool {
        area / bin.area() > self.big_item_threshold
    }
}

impl ObjectFunction for GravityObjective {
    fn score(&self, c: &CandidatePile) -> f64 {
        let ibb = c.item_bbox;
        let full_bb = c.full_bbox();
        let big_items = c
            .pile
            .placed_items
            .values()
            .filter(|pi| self.is_big(pi.area, &c.bin))
            .collect::<Vec<_>>();

        let mut score = if self.is_big(c.item_area, &c.bin) {
            let cc = full_bb.centroid();
            let anchors = [
                (ibb.x_min, ibb.y_min),
                (ibb.x_max, ibb.y_max),
                (ibb.x_min, ibb.y_max),
                (ibb.x_max, ibb.y_min),
            ];
            let dist = anchors
                .iter()
                .map(|&(x, y)| distance((x as f64, y as f64), cc))
                .chain([distance(ibb.centroid(), cc)])
                .fold(f64::INFINITY, f64::min)
                / c.norm;
            let density = full_bb.area() / (c.norm * c.norm);

            //how well the candidate lines up with an overlapping big item of the same area
            let alignment = big_items
                .iter()
                .filter(|pi| pi.bbox.overlaps_closed(&ibb))
                .filter(|pi| (1.0 - pi.area / c.item_area).abs() < 1e-6)
                .map(|pi| 1.0 - (c.item_area + pi.area) / Rect::bounding_rect(pi.bbox, ibb).area())
                .fold(None, |acc: Option<f64>, a| Some(acc.map_or(a, |b| b.min(a))));

            match alignment {
                None => 0.5 * dist + 0.5 * density,
                Some(a) => 0.45 * dist + 0.45 * density + 0.1 * a.min(1.0),
            }
        } else {
            let big_bb = big_items.iter().map(|pi| pi.bbox).reduce(Rect::bounding_rect);
            match big_bb {
                None => distance(ibb.centroid(), c.bin.centroid()) / c.norm,
                Some(bb) => distance(ibb.centroid(), bb.centroid()) / c.norm,
            }
        };

        let w_diff = (full_bb.width() - c.bin.width()) as f64;
        let h_diff = (full_bb.height() - c.bin.height()) as f64;
        if w_diff > 0.0 {
            score += w_diff.powi(2) / c.norm;
        }
        if h_diff > 0.0 {
            score += h_diff.powi(2) / c.norm;
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Bin;

    fn candidate<'a>(pile: &'a Pile, item_bbox: Rect, reference: Point) -> CandidatePile<'a> {
        CandidatePile {
            bin: pile.rect,
            pile,
            pile_bbox: pile.items_bbox(),
            item_bbox,
            reference,
            item_area: item_bbox.area(),
            area_used: pile.placed_area(),
            norm: pile.rect.area().sqrt(),
            penalty: 1e6,
        }
    }

    #[test]
    fn bin_center_prefers_center() {
        let pile = Pile::new(&Bin::new(0, Rect::try_new(0, 0, 100, 100).unwrap(), None));
        let centered = candidate(&pile, Rect::try_new(50, 50, 60, 60).unwrap(), Point(50, 50));
        let corner = candidate(&pile, Rect::try_new(0, 0, 10, 10).unwrap(), Point(0, 0));
        assert_eq!(BinCenterObjective.score(&centered), 0.0);
        assert!(BinCenterObjective.score(&corner) > 0.0);
    }

    #[test]
    fn bin_center_penalizes_overfit() {
        let pile = Pile::new(&Bin::new(0, Rect::try_new(0, 0, 100, 100).unwrap(), None));
        let outside = candidate(&pile, Rect::try_new(50, 50, 160, 60).unwrap(), Point(50, 50));
        assert!(BinCenterObjective.score(&outside) > 1e6);
    }

    #[test]
    fn functions_are_objectives() {
        fn by_x(c: &CandidatePile) -> f64 {
            c.reference.x() as f64
        }
        let pile = Pile::new(&Bin::new(0, Rect::try_new(0, 0, 100, 100).unwrap(), None));
        let c = candidate(&pile, Rect::try_new(0, 0, 10, 10).unwrap(), Point(3, 4));
        assert_eq!(by_x.score(&c), 3.0);
    }

    #[test]
    fn bottom_left_is_lexicographic() {
        let pile = Pile::new(&Bin::new(0, Rect::try_new(0, 0, 100, 100).unwrap(), None));
        let low_right = candidate(&pile, Rect::try_new(90, 0, 100, 10).unwrap(), Point(90, 0));
        let high_left = candidate(&pile, Rect::try_new(0, 1, 10, 11).unwrap(), Point(0, 1));
        assert!(BottomLeftObjective.score(&low_right) < BottomLeftObjective.score(&high_left));
    }

    #[test]
    fn gravity_pulls_small_items_to_bin_center() {
        let pile = Pile::new(&Bin::new(0, Rect::try_new(0, 0, 100, 100).unwrap(), None));
        let near = candidate(&pile, Rect::try_new(45, 45, 55, 55).unwrap(), Point(45, 45));
        let far = candidate(&pile, Rect::try_new(0, 0, 10, 10).unwrap(), Point(0, 0));
        let gravity = GravityObjective::default();
        assert!(gravity.score(&near) < gravity.score(&far));
    }
}
