//! Host events
//!
//! Events a host (desktop window, Android activity, headless test driver)
//! delivers to the Gridview runtime.

/// Control flow after handling an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlFlow {
    /// Keep delivering events
    #[default]
    Continue,
    /// The screen was torn down
    Exit,
}

/// Host events
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Frame tick - advance the animation clock by `dt_ms` and render
    Frame {
        /// Elapsed time since the previous frame in milliseconds
        dt_ms: f32,
    },
    /// Vertical scroll by `delta_y` logical pixels (positive scrolls down)
    Scroll { delta_y: f32 },
    /// Viewport was resized
    Resized {
        /// New width in logical pixels
        width: f32,
        /// New height in logical pixels
        height: f32,
    },
    /// Application lifecycle event
    Lifecycle(LifecycleEvent),
}

/// Application lifecycle events
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Application came to the foreground
    Resumed,
    /// Application went to the background; frames stop advancing
    Suspended,
    /// The screen is being torn down; every slot unmounts
    Destroyed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_flow_default() {
        assert_eq!(ControlFlow::default(), ControlFlow::Continue);
    }
}
