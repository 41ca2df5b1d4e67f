//! Animated grid item
//!
//! Each mounted grid slot owns two animated values: a horizontal offset
//! and an opacity. On mount a [`LaunchedEffect`] plays the entrance:
//!
//! 1. slide the offset from its initial value to 0 with a linear tween
//! 2. then fade the opacity from 0 to 1 with the standard curve
//!
//! The fade never starts before the slide has finished. Unmounting cancels
//! whatever is left of the sequence, and a later mount starts over from
//! the initial values.

use std::cell::Cell;
use std::rc::Rc;

use gridview_animation::{
    tween, Animatable, AnimationEnd, AnimationError, Easing, SchedulerHandle, TweenSpec,
};
use gridview_core::{Color, Shadow};
use gridview_layout::prelude::*;
use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::content::StaticItemContent;
use crate::effect::LaunchedEffect;
use crate::error::Result;
use crate::executor::Spawner;

/// Image box size
pub const IMAGE_SIZE: f32 = 65.0;
/// Inset of the image inside its box
pub const IMAGE_PADDING: f32 = 4.0;

/// Progress of an item's entrance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrancePhase {
    /// Mounted, sequence not started yet
    Initial,
    SlidingIn,
    FadingIn,
    /// Both values at rest at their targets
    Settled,
}

/// Values an item renders with
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridItemViewState {
    pub offset_x: f32,
    pub opacity: f32,
}

impl GridItemViewState {
    /// State of a fully entered item
    pub const SETTLED: GridItemViewState = GridItemViewState {
        offset_x: 0.0,
        opacity: 1.0,
    };
}

/// Timing of the entrance sequence
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntranceSpec {
    pub initial_offset_x: f32,
    pub slide: TweenSpec,
    pub fade: TweenSpec,
}

impl Default for EntranceSpec {
    fn default() -> Self {
        Self {
            initial_offset_x: -300.0,
            slide: tween(300, Easing::Linear),
            fade: tween(600, Easing::FastOutSlowIn),
        }
    }
}

/// What a component needs to mount
#[derive(Clone)]
pub struct MountContext {
    pub scheduler: SchedulerHandle,
    pub spawner: Spawner,
}

/// One mounted grid slot
pub struct AnimatedGridItem {
    index: usize,
    offset_x: Animatable,
    opacity: Animatable,
    phase: Rc<Cell<EntrancePhase>>,
    content: StaticItemContent,
    effect: LaunchedEffect,
}

impl AnimatedGridItem {
    /// Mount the item and launch its entrance
    pub fn mount(index: usize, ctx: &MountContext, spec: EntranceSpec) -> Result<Self> {
        let offset_x = Animatable::new(ctx.scheduler.clone(), spec.initial_offset_x);
        let opacity = Animatable::new(ctx.scheduler.clone(), 0.0);
        let phase = Rc::new(Cell::new(EntrancePhase::Initial));

        let effect = LaunchedEffect::launch(
            &ctx.spawner,
            format!("grid-item-{index}"),
            run_entrance(index, offset_x.clone(), opacity.clone(), phase.clone(), spec),
        )?;
        tracing::debug!("mounted grid item {}", index);

        Ok(Self {
            index,
            offset_x,
            opacity,
            phase,
            content: StaticItemContent::new(),
            effect,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> EntrancePhase {
        self.phase.get()
    }

    pub fn view_state(&self) -> GridItemViewState {
        GridItemViewState {
            offset_x: self.offset_x.value(),
            opacity: self.opacity.value(),
        }
    }

    /// Check if the entrance task is still running
    pub fn is_animating(&self) -> bool {
        self.effect.is_active()
    }

    /// Cancel the entrance and release the item
    pub fn unmount(mut self) {
        self.effect.cancel();
        tracing::debug!(
            "unmounted grid item {} during {:?}",
            self.index,
            self.phase.get()
        );
    }
}

impl Component for AnimatedGridItem {
    fn render(&self) -> Div {
        grid_item_card(self.view_state(), &self.content)
    }
}

async fn run_entrance(
    index: usize,
    offset_x: Animatable,
    opacity: Animatable,
    phase: Rc<Cell<EntrancePhase>>,
    spec: EntranceSpec,
) -> std::result::Result<(), AnimationError> {
    let set_phase = |next: EntrancePhase| {
        tracing::debug!("grid item {}: {:?} -> {:?}", index, phase.get(), next);
        phase.set(next);
    };

    set_phase(EntrancePhase::SlidingIn);
    if offset_x.animate_to(0.0, spec.slide).await? == AnimationEnd::Interrupted {
        return Ok(());
    }

    set_phase(EntrancePhase::FadingIn);
    if opacity.animate_to(1.0, spec.fade).await? == AnimationEnd::Interrupted {
        return Ok(());
    }

    set_phase(EntrancePhase::Settled);
    Ok(())
}

/// Card for one grid slot
///
/// The outer cell pads the card; translation and opacity apply to the
/// card's content column, so the card surface itself never moves.
pub fn grid_item_card(state: GridItemViewState, content: &StaticItemContent) -> Div {
    let column = div()
        .flex_col()
        .items_center()
        .justify_center()
        .p_px(8.0)
        .translate_x(state.offset_x)
        .opacity(state.opacity)
        .child(
            image(content.image)
                .size(IMAGE_SIZE)
                .padding(IMAGE_PADDING)
                .fit(ObjectFit::Cover)
                .clip(ClipShape::Circle),
        )
        .child(
            text(content.heading)
                .size(16.0)
                .weight(FontWeight::Medium)
                .color(Color::BLACK),
        )
        .child(
            text(content.subtitle)
                .size(14.0)
                .weight(FontWeight::Medium)
                .color(Color::GRAY)
                .max_lines(1)
                .ellipsis(),
        );

    let card = div()
        .flex_col()
        .bg(Color::WHITE)
        .rounded(10.0)
        .shadow(Shadow::elevation(10.0))
        .child(column);

    div().flex_1().flex_col().p_px(10.0).child(card)
}
