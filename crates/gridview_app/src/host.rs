//! Headless host
//!
//! Drives the grid screen the way a platform event loop would, but on a
//! virtual clock. Every frame ticks the animation scheduler first and then
//! drains the frame executor, so time only moves when events say so and a
//! run is reproducible to the frame.

use gridview_animation::AnimationScheduler;
use gridview_core::{ControlFlow, Event, LifecycleEvent};
use gridview_layout::{ClipShape, ImageData, ObjectFit, RenderTree};

use crate::component::Component;
use crate::config::GridConfig;
use crate::content::StaticItemContent;
use crate::error::{AppError, Result};
use crate::executor::FrameExecutor;
use crate::item::{MountContext, IMAGE_PADDING, IMAGE_SIZE};
use crate::screen::GridScreen;
use crate::snapshot::{FrameSnapshot, ItemSnapshot};

/// Event-driven runtime for the grid screen
pub struct HeadlessHost {
    scheduler: AnimationScheduler,
    executor: FrameExecutor,
    screen: GridScreen,
    frame_interval_ms: f32,
    suspended: bool,
    destroyed: bool,
    image: Option<ImageData>,
}

impl HeadlessHost {
    /// Create the host and mount the initially visible items
    pub fn new(config: GridConfig) -> Result<Self> {
        let image = match &config.asset_dir {
            Some(dir) => {
                let path = dir.join(StaticItemContent::IMAGE);
                let side = (IMAGE_SIZE - 2.0 * IMAGE_PADDING).round() as u32;
                let decoded =
                    ImageData::load(&path)?.fit_to(side, ObjectFit::Cover, ClipShape::Circle)?;
                tracing::debug!("prepared {} at {}x{}", path.display(), side, side);
                Some(decoded)
            }
            None => None,
        };

        let frame_interval_ms = config.frame_interval_ms;
        let screen = GridScreen::new(config)?;
        let mut host = Self {
            scheduler: AnimationScheduler::new(),
            executor: FrameExecutor::new(),
            screen,
            frame_interval_ms,
            suspended: false,
            destroyed: false,
            image,
        };
        host.reconcile()?;
        tracing::info!(
            "host started with {} mounted item(s)",
            host.screen.mounted_indices().len()
        );
        Ok(host)
    }

    fn mount_context(&self) -> MountContext {
        MountContext {
            scheduler: self.scheduler.handle(),
            spawner: self.executor.spawner(),
        }
    }

    /// Handle one host event
    pub fn handle_event(&mut self, event: Event) -> Result<ControlFlow> {
        if self.destroyed {
            return Ok(ControlFlow::Exit);
        }

        match event {
            Event::Frame { dt_ms } => {
                if !self.suspended {
                    self.scheduler.tick(dt_ms);
                    self.executor.run_until_stalled();
                }
            }
            Event::Scroll { delta_y } => {
                let applied = self.screen.scroll_by(delta_y);
                if applied != 0.0 {
                    tracing::debug!(
                        "scrolled by {} to {}",
                        applied,
                        self.screen.scroll_offset()
                    );
                }
                self.reconcile()?;
            }
            Event::Resized { width, height } => {
                self.screen.resize(width, height)?;
                tracing::debug!("resized to {}x{}", width, height);
                self.reconcile()?;
            }
            Event::Lifecycle(LifecycleEvent::Suspended) => {
                self.suspended = true;
                tracing::info!("host suspended at {}ms", self.scheduler.now_ms());
            }
            Event::Lifecycle(LifecycleEvent::Resumed) => {
                self.suspended = false;
                tracing::info!("host resumed at {}ms", self.scheduler.now_ms());
            }
            Event::Lifecycle(LifecycleEvent::Destroyed) => {
                self.screen.unmount_all();
                self.executor.clear();
                self.destroyed = true;
                tracing::info!("host destroyed at {}ms", self.scheduler.now_ms());
                return Ok(ControlFlow::Exit);
            }
        }
        Ok(ControlFlow::Continue)
    }

    /// Mount and unmount slots for the current scroll position, then give
    /// newly mounted items their first poll
    fn reconcile(&mut self) -> Result<()> {
        let ctx = self.mount_context();
        self.screen.reconcile(&ctx)?;
        self.executor.run_until_stalled();
        Ok(())
    }

    /// Advance virtual time by `ms` in frame-interval steps
    ///
    /// Whole frames are counted up front and the last frame carries the
    /// exact remainder, so the clock ends at `now + ms` however large `ms`
    /// is. Once nothing is animating and no task is pending, the remaining
    /// whole frames are skipped in a single clock step.
    pub fn advance_by(&mut self, ms: f32) -> Result<ControlFlow> {
        if !ms.is_finite() {
            return Err(AppError::Config(format!(
                "cannot advance by a non-finite duration ({ms})"
            )));
        }
        if self.destroyed {
            return Ok(ControlFlow::Exit);
        }

        let ms = f64::from(ms.max(0.0));
        let interval = f64::from(self.frame_interval_ms);
        let frames = (ms / interval).floor() as u64;
        let remainder = (ms - frames as f64 * interval).max(0.0) as f32;

        let mut flow = ControlFlow::Continue;
        let mut done = 0;
        while done < frames && flow == ControlFlow::Continue {
            if self.suspended {
                // Frames are no-ops until resumed
                break;
            }
            if self.executor.is_idle()
                && self
                    .scheduler
                    .skip_idle_frames(frames - done, self.frame_interval_ms)
            {
                tracing::trace!("skipped {} idle frame(s)", frames - done);
                break;
            }
            flow = self.handle_event(Event::Frame {
                dt_ms: self.frame_interval_ms,
            })?;
            done += 1;
        }

        if remainder > 0.0 && flow == ControlFlow::Continue {
            flow = self.handle_event(Event::Frame { dt_ms: remainder })?;
        }
        Ok(flow)
    }

    /// Scroll by `delta_y` and reconcile
    pub fn scroll_by(&mut self, delta_y: f32) -> Result<ControlFlow> {
        self.handle_event(Event::Scroll { delta_y })
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            time_ms: self.scheduler.now_ms(),
            frame: self.scheduler.frame(),
            scroll_offset: self.screen.scroll_offset(),
            suspended: self.suspended,
            items: self
                .screen
                .items()
                .map(|item| {
                    let state = item.view_state();
                    ItemSnapshot {
                        index: item.index(),
                        offset_x: state.offset_x,
                        opacity: state.opacity,
                        phase: item.phase(),
                    }
                })
                .collect(),
        }
    }

    /// Render and lay out the screen as it looks now
    pub fn render_tree(&self) -> Result<RenderTree> {
        if self.destroyed {
            return Err(AppError::HostDestroyed);
        }
        let root = self.screen.render();
        let mut tree = RenderTree::from_element(&root)?;
        if let Some(image) = &self.image {
            tree.attach_image(StaticItemContent::IMAGE, image.clone());
        }
        let viewport = self.screen.viewport();
        tree.compute_layout(viewport.width, viewport.height)?;
        Ok(tree)
    }

    pub fn screen(&self) -> &GridScreen {
        &self.screen
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    pub fn executor(&self) -> &FrameExecutor {
        &self.executor
    }

    pub fn now_ms(&self) -> f64 {
        self.scheduler.now_ms()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Item image decoded from `asset_dir` and clipped for display
    pub fn prepared_image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }
}
