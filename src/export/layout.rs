use crate::badge::{BADGE_HEIGHT_MM, BADGE_WIDTH_MM};

/// Where one badge lands in the document, in millimetres from the top-left
/// corner of its page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub page: usize,
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

/// Fixed two-column grid on a fixed page format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGrid {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub start_x_mm: f32,
    pub start_y_mm: f32,
    pub cell_width_mm: f32,
    pub cell_height_mm: f32,
    pub columns: usize,
}

impl PageGrid {
    /// A4 portrait with badges at their physical size.
    pub const A4: PageGrid = PageGrid {
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        start_x_mm: 1.0,
        start_y_mm: 10.0,
        cell_width_mm: BADGE_WIDTH_MM,
        cell_height_mm: BADGE_HEIGHT_MM,
        columns: 2,
    };

    /// Full rows that fit below the top offset. Always at least one so an
    /// oversized cell still gets a page of its own.
    pub fn rows_per_page(&self) -> usize {
        let usable = self.page_height_mm - self.start_y_mm;
        ((usable / self.cell_height_mm).floor() as usize).max(1)
    }

    pub fn per_page(&self) -> usize {
        self.rows_per_page() * self.columns
    }

    pub fn page_count(&self, count: usize) -> usize {
        count.div_ceil(self.per_page())
    }

    /// Placement of the `index`-th candidate.
    pub fn place(&self, index: usize) -> Placement {
        let per_page = self.per_page();
        let page = index / per_page;
        let slot = index % per_page;
        let col = slot % self.columns;
        let row = slot / self.columns;
        Placement {
            page,
            x_mm: self.start_x_mm + col as f32 * self.cell_width_mm,
            y_mm: self.start_y_mm + row as f32 * self.cell_height_mm,
            width_mm: self.cell_width_mm,
            height_mm: self.cell_height_mm,
        }
    }

    pub fn layout(&self, count: usize) -> Vec<Placement> {
        (0..count).map(|index| self.place(index)).collect()
    }
}

impl Default for PageGrid {
    fn default() -> Self {
        Self::A4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_badges_fill_one_page() {
        let spots: Vec<(usize, f32, f32)> = PageGrid::A4
            .layout(4)
            .iter()
            .map(|p| (p.page, p.x_mm, p.y_mm))
            .collect();
        assert_eq!(
            spots,
            vec![
                (0, 1.0, 10.0),
                (0, 105.0, 10.0),
                (0, 1.0, 139.0),
                (0, 105.0, 139.0)
            ]
        );
    }

    #[test]
    fn fifth_badge_starts_a_new_page() {
        let grid = PageGrid::A4;
        assert_eq!(grid.rows_per_page(), 2);
        assert_eq!(grid.per_page(), 4);
        let fifth = grid.place(4);
        assert_eq!((fifth.page, fifth.x_mm, fifth.y_mm), (1, 1.0, 10.0));
        assert_eq!(grid.page_count(5), 2);
        assert_eq!(grid.page_count(4), 1);
        assert_eq!(grid.page_count(0), 0);
    }

    #[test]
    fn cells_keep_physical_size() {
        for placement in PageGrid::A4.layout(6) {
            assert_eq!(placement.width_mm, 104.0);
            assert_eq!(placement.height_mm, 129.0);
        }
    }

    #[test]
    fn oversized_cells_still_get_a_row() {
        let grid = PageGrid {
            cell_height_mm: 400.0,
            ..PageGrid::A4
        };
        assert_eq!(grid.rows_per_page(), 1);
        assert_eq!(grid.place(2).page, 1);
    }
}
