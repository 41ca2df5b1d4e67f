//! Grid screen
//!
//! A top bar above a vertically scrolling grid. Only the rows that intersect
//! the viewport, plus `beyond_bounds_rows` on either side, are composed.
//! Slots scrolled out of that range are unmounted, and slots scrolled into
//! it are mounted fresh, so an item that comes back plays its entrance
//! again.

use std::collections::BTreeMap;
use std::ops::Range;

use gridview_core::{Color, Shadow, Size};
use gridview_layout::prelude::*;

use crate::component::Component;
use crate::config::GridConfig;
use crate::content::StaticItemContent;
use crate::error::{AppError, Result};
use crate::item::{grid_item_card, AnimatedGridItem, EntranceSpec, GridItemViewState, MountContext};

/// Height of the top app bar
pub const TOP_BAR_HEIGHT: f32 = 56.0;
/// Title shown in the top app bar
pub const TITLE: &str = "Gridview Animation";
/// Top app bar background
pub const PRIMARY_COLOR: u32 = 0x6200EE;

/// Top app bar with a centered title
pub fn top_bar() -> Div {
    div()
        .w_full()
        .h(TOP_BAR_HEIGHT)
        .flex_none()
        .flex_row()
        .items_center()
        .bg(Color::from_hex(PRIMARY_COLOR))
        .shadow(Shadow::elevation(4.0))
        .child(
            text(TITLE)
                .size(20.0)
                .weight(FontWeight::Medium)
                .color(Color::WHITE)
                .align(TextAlign::Center)
                .w_full(),
        )
}

/// One grid row, padded with empty cells when short
fn grid_row(columns: usize, cells: Vec<Div>) -> Div {
    let missing = columns.saturating_sub(cells.len());
    let mut row = div().w_full().flex_row().flex_none().children(cells);
    for _ in 0..missing {
        row = row.child(div().flex_1());
    }
    row
}

/// Initial view state of an item before its entrance starts
fn initial_view_state(spec: &EntranceSpec) -> GridItemViewState {
    GridItemViewState {
        offset_x: spec.initial_offset_x,
        opacity: 0.0,
    }
}

/// Natural height of one grid row at `width`
fn measure_row_height(width: f32, columns: usize) -> Result<f32> {
    let content = StaticItemContent::new();
    let sample_row = div().w(width).flex_col().child(grid_row(
        columns,
        vec![grid_item_card(GridItemViewState::SETTLED, &content)],
    ));
    let mut tree = RenderTree::from_element(&sample_row)?;
    tree.compute_layout(width, 100_000.0)?;
    let row = tree
        .layout()
        .children(tree.root())
        .first()
        .copied()
        .ok_or_else(|| AppError::Config("measured row has no layout".into()))?;
    let height = tree
        .layout()
        .get_bounds(row, (0.0, 0.0))
        .map(|b| b.height)
        .unwrap_or(0.0);
    if height <= 0.0 {
        return Err(AppError::Config(format!(
            "measured row height must be positive, got {height}"
        )));
    }
    Ok(height)
}

/// The stateful grid screen
pub struct GridScreen {
    config: GridConfig,
    entrance: EntranceSpec,
    grid: LazyGrid,
    scroll: ScrollState,
    viewport: Size,
    items: BTreeMap<usize, AnimatedGridItem>,
}

impl GridScreen {
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        let viewport = Size::new(config.viewport_width, config.viewport_height);
        let row_height = match config.row_height {
            Some(height) => height,
            None => measure_row_height(viewport.width, config.columns)?,
        };
        let grid = LazyGrid::new(config.columns, config.item_count, row_height);
        let scroll = ScrollState::new(
            (viewport.height - TOP_BAR_HEIGHT).max(0.0),
            grid.content_height(),
        );
        tracing::debug!(
            "grid screen: {} items, {} columns, row height {}",
            grid.item_count(),
            grid.columns(),
            row_height
        );

        Ok(Self {
            entrance: config.entrance_spec(),
            config,
            grid,
            scroll,
            viewport,
            items: BTreeMap::new(),
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn grid(&self) -> &LazyGrid {
        &self.grid
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.offset()
    }

    pub fn max_scroll_offset(&self) -> f32 {
        self.scroll.max_offset()
    }

    /// Item indices that should currently be composed
    pub fn visible_range(&self) -> Range<usize> {
        self.grid.visible_range(
            self.scroll.offset(),
            self.scroll.viewport_height(),
            self.config.beyond_bounds_rows,
        )
    }

    /// Mount slots entering the visible range and unmount slots leaving it
    pub fn reconcile(&mut self, ctx: &MountContext) -> Result<()> {
        let range = self.visible_range();

        let leaving: Vec<usize> = self
            .items
            .keys()
            .copied()
            .filter(|index| !range.contains(index))
            .collect();
        for index in &leaving {
            if let Some(item) = self.items.remove(index) {
                item.unmount();
            }
        }

        let mut entered = 0;
        for index in range.clone() {
            if !self.items.contains_key(&index) {
                let item = AnimatedGridItem::mount(index, ctx, self.entrance)?;
                self.items.insert(index, item);
                entered += 1;
            }
        }

        if entered > 0 || !leaving.is_empty() {
            tracing::debug!(
                "reconcile: composed {:?}, mounted {}, unmounted {}",
                range,
                entered,
                leaving.len()
            );
        }
        Ok(())
    }

    /// Scroll the grid, returning the applied delta
    ///
    /// Call [`GridScreen::reconcile`] afterwards to update mounted slots.
    pub fn scroll_by(&mut self, delta_y: f32) -> f32 {
        self.scroll.scroll_by(delta_y)
    }

    /// Change the viewport size
    ///
    /// A measured row height is measured again for the new width.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(AppError::Config(format!(
                "viewport must be positive, got {width}x{height}"
            )));
        }
        self.viewport = Size::new(width, height);
        self.config.viewport_width = width;
        self.config.viewport_height = height;

        let row_height = match self.config.row_height {
            Some(height) => height,
            None => measure_row_height(width, self.config.columns)?,
        };
        self.grid = LazyGrid::new(self.config.columns, self.config.item_count, row_height);
        self.scroll.set_viewport_height((height - TOP_BAR_HEIGHT).max(0.0));
        self.scroll.set_content_height(self.grid.content_height());
        Ok(())
    }

    /// Unmount every slot
    pub fn unmount_all(&mut self) {
        let items = std::mem::take(&mut self.items);
        let count = items.len();
        for (_, item) in items {
            item.unmount();
        }
        if count > 0 {
            tracing::debug!("unmounted all {} grid items", count);
        }
    }

    pub fn item(&self, index: usize) -> Option<&AnimatedGridItem> {
        self.items.get(&index)
    }

    /// Mounted items in index order
    pub fn items(&self) -> impl Iterator<Item = &AnimatedGridItem> {
        self.items.values()
    }

    pub fn mounted_indices(&self) -> Vec<usize> {
        self.items.keys().copied().collect()
    }
}

impl Component for GridScreen {
    fn render(&self) -> Div {
        let content = StaticItemContent::new();
        let columns = self.grid.columns();
        let row_height = self.grid.row_height();

        let range = self.visible_range();
        let first_row = range.start / columns;
        let rows: Vec<Div> = (first_row..range.end.div_ceil(columns))
            .map(|row| {
                let cells = self
                    .grid
                    .items_in_row(row)
                    .map(|index| match self.items.get(&index) {
                        Some(item) => item.render(),
                        None => grid_item_card(initial_view_state(&self.entrance), &content),
                    })
                    .collect();
                grid_row(columns, cells).h(row_height)
            })
            .collect();

        let scrolled = div()
            .w_full()
            .flex_col()
            .flex_none()
            .translate_y(first_row as f32 * row_height - self.scroll.offset())
            .children(rows);

        div()
            .w(self.viewport.width)
            .h(self.viewport.height)
            .flex_col()
            .child(top_bar())
            .child(div().w_full().flex_1().flex_col().child(scrolled))
    }
}

/// The complete screen with every item composed at its initial state
pub fn grid_view_animation_with(config: &GridConfig) -> Div {
    let content = StaticItemContent::new();
    let initial = initial_view_state(&config.entrance_spec());
    let grid = LazyGrid::new(config.columns, config.item_count, 0.0);

    let rows: Vec<Div> = (0..grid.row_count())
        .map(|row| {
            let cells = grid
                .items_in_row(row)
                .map(|_| grid_item_card(initial, &content))
                .collect();
            grid_row(grid.columns(), cells)
        })
        .collect();

    div()
        .w(config.viewport_width)
        .flex_col()
        .child(top_bar())
        .child(div().w_full().flex_col().children(rows))
}

/// The complete screen with the default configuration
pub fn grid_view_animation() -> Div {
    grid_view_animation_with(&GridConfig::default())
}
