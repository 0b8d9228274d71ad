use geo::{BoundingRect, Coord, MultiPolygon, Rect};

/// Center of the bounding rectangle enclosing every shape, if any shape is non-empty.
pub(crate) fn combined_center<'a>(shapes: impl IntoIterator<Item = &'a MultiPolygon<f64>>) -> Option<Coord<f64>> {
    shapes.into_iter()
        .filter_map(|shape| shape.bounding_rect())
        .reduce(|a, b| Rect::new(
            Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
            Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
        ))
        .map(|rect| rect.center())
}
