use super::PageGeometry;

/// The drawing position during layout.
///
/// `y` is the top of the next line in millimetres from the top edge; `page` is zero-based.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
    pub x: f32,
    pub y: f32,
    pub page: usize,
}

impl Cursor {
    pub fn new(x: f32, y: f32, page: usize) -> Self {
        Self { x, y, page }
    }

    /// Returns the cursor moved down by `dy`.
    pub fn advance(self, dy: f32) -> Self {
        Self {
            y: self.y + dy,
            ..self
        }
    }

    /// Returns the cursor at horizontal position `x`.
    pub fn at_x(self, x: f32) -> Self {
        Self { x, ..self }
    }
}

/// Result of placing one physical line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Where the line is drawn (top-left of its box).
    pub at: Cursor,
    /// Cursor for whatever follows the line.
    pub next: Cursor,
}

/// Places a line of height `line_height` at `cursor`.
///
/// If the line would extend past the bottom margin it moves to the top of the next page. A line
/// that is already at the top margin is never moved, so a line taller than the page body still
/// lands somewhere instead of paging forever.
pub fn place_line(cursor: Cursor, line_height: f32, geometry: &PageGeometry) -> Placement {
    let overflows = cursor.y + line_height > geometry.bottom_limit();
    let at_top = cursor.y <= geometry.margin_top;

    let at = if overflows && !at_top {
        Cursor::new(cursor.x, geometry.margin_top, cursor.page + 1)
    } else {
        cursor
    };

    Placement {
        at,
        next: at.advance(line_height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_that_fits_stays_on_page() {
        let geometry = PageGeometry::a4();
        let cursor = Cursor::new(20.0, 100.0, 0);
        let placement = place_line(cursor, 7.0, &geometry);
        assert_eq!(placement.at, cursor);
        assert_eq!(placement.next, Cursor::new(20.0, 107.0, 0));
    }

    #[test]
    fn line_crossing_bottom_margin_moves_to_next_page() {
        let geometry = PageGeometry::a4();
        // Bottom limit on A4 with 20mm margins is 277mm.
        let cursor = Cursor::new(26.0, 272.0, 2);
        let placement = place_line(cursor, 7.0, &geometry);
        assert_eq!(placement.at, Cursor::new(26.0, 20.0, 3));
        assert_eq!(placement.next.y, 27.0);
    }

    #[test]
    fn line_ending_exactly_at_limit_fits() {
        let geometry = PageGeometry::a4();
        let cursor = Cursor::new(20.0, 270.0, 0);
        let placement = place_line(cursor, 7.0, &geometry);
        assert_eq!(placement.at.page, 0);
    }

    #[test]
    fn oversized_line_at_top_is_not_moved() {
        let geometry = PageGeometry::a4();
        let cursor = Cursor::new(20.0, geometry.margin_top, 1);
        let placement = place_line(cursor, 400.0, &geometry);
        assert_eq!(placement.at, cursor);
    }
}
