//! Lazy grid geometry
//!
//! A lazy grid lays items out row-major in a fixed number of equal-width
//! columns and only composes the rows that intersect the viewport. All
//! rows share one height, so visibility is pure arithmetic on the scroll
//! offset.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Position of one item in the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub index: usize,
    pub row: usize,
    pub column: usize,
}

/// Fixed-column grid of uniformly sized rows
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LazyGrid {
    columns: usize,
    item_count: usize,
    row_height: f32,
}

impl LazyGrid {
    /// Create a grid; `columns` is raised to at least one
    pub fn new(columns: usize, item_count: usize, row_height: f32) -> Self {
        Self {
            columns: columns.max(1),
            item_count,
            row_height: row_height.max(0.0),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn row_count(&self) -> usize {
        self.item_count.div_ceil(self.columns)
    }

    /// Row and column of item `index`
    pub fn cell(&self, index: usize) -> Option<GridCell> {
        (index < self.item_count).then(|| GridCell {
            index,
            row: index / self.columns,
            column: index % self.columns,
        })
    }

    /// Item indices in `row`
    pub fn items_in_row(&self, row: usize) -> Range<usize> {
        let start = (row * self.columns).min(self.item_count);
        let end = (start + self.columns).min(self.item_count);
        start..end
    }

    /// Total scrollable height of all rows
    pub fn content_height(&self) -> f32 {
        self.row_count() as f32 * self.row_height
    }

    /// Rows intersecting `[offset, offset + viewport_height)`
    pub fn visible_rows(&self, offset: f32, viewport_height: f32) -> Range<usize> {
        let rows = self.row_count();
        if rows == 0 || self.row_height <= 0.0 || viewport_height <= 0.0 {
            return 0..0;
        }
        let offset = offset.max(0.0);
        let first = ((offset / self.row_height).floor() as usize).min(rows);
        let last = (((offset + viewport_height) / self.row_height).ceil() as usize).min(rows);
        first..last.max(first)
    }

    /// Items to compose for a viewport, with `beyond_bounds_rows` extra rows
    /// kept on either side
    pub fn visible_range(
        &self,
        offset: f32,
        viewport_height: f32,
        beyond_bounds_rows: usize,
    ) -> Range<usize> {
        let rows = self.visible_rows(offset, viewport_height);
        if rows.is_empty() {
            return 0..0;
        }
        let first = rows.start.saturating_sub(beyond_bounds_rows);
        let last = (rows.end + beyond_bounds_rows).min(self.row_count());
        self.items_in_row(first).start..self.items_in_row(last - 1).end
    }
}
