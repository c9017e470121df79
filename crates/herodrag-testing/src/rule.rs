use std::rc::Rc;

use herodrag_animation::AnimationSpec;
use herodrag_core::{FrameClock, Runtime, RuntimeHandle};
use herodrag_gesture::{
    DragSample, DriverEvent, GestureConfig, RecognizerArbiter, RecognizerRole, SharedArbiter,
    SurfaceHandles, TransitionDriver, TransitionHost,
};

use crate::fakes::{RecordingContainer, RecordingHost, RecordingOverlay, RecordingSurface};

/// One 60Hz frame.
pub const FRAME_NANOS: u64 = 16_666_667;

/// Guard against animations that never settle.
const MAX_PUMP_FRAMES: usize = 2_000;

/// Headless frame loop for gesture tests.
///
/// Owns a runtime and a monotonically advancing frame time, and drains
/// frame callbacks on demand instead of waiting for a display.
pub struct GestureTestRule {
    runtime: Runtime,
    frame_time_nanos: u64,
    frames: usize,
}

impl GestureTestRule {
    pub fn new() -> Self {
        Self {
            runtime: Runtime::default(),
            frame_time_nanos: 0,
            frames: 0,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    pub fn has_pending_frames(&self) -> bool {
        self.runtime.has_frame_callbacks()
    }

    /// Frames drained so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn advance_frame(&mut self) {
        self.frame_time_nanos += FRAME_NANOS;
        self.frames += 1;
        self.runtime.drain_frame_callbacks(self.frame_time_nanos);
    }

    /// Drain frames covering at least `millis` of animation time.
    pub fn advance_time(&mut self, millis: u64) {
        let target = self.frame_time_nanos + millis * 1_000_000;
        while self.frame_time_nanos < target {
            self.advance_frame();
        }
    }

    /// Drain frames until nothing is scheduled. Returns the frame count.
    ///
    /// Panics if animations are still running after a generous number of
    /// frames.
    pub fn pump_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.has_frame_callbacks() {
            frames += 1;
            if frames > MAX_PUMP_FRAMES {
                panic!("pump_until_idle: still animating after {MAX_PUMP_FRAMES} frames");
            }
            self.advance_frame();
        }
        frames
    }
}

impl Default for GestureTestRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Surface width used by [`TransitionScene::new`], a typical phone width.
pub const SCENE_WIDTH: f32 = 390.0;

/// A dragged view with an overlay and a sibling container, a recording host
/// and a shared arbiter, all on one [`GestureTestRule`].
pub struct TransitionScene {
    pub rule: GestureTestRule,
    pub surface: Rc<RecordingSurface>,
    pub overlay: Rc<RecordingOverlay>,
    pub container: Rc<RecordingContainer>,
    pub host: Rc<RecordingHost>,
    pub arbiter: SharedArbiter,
}

impl TransitionScene {
    pub fn new() -> Self {
        Self::with_width(SCENE_WIDTH)
    }

    pub fn with_width(width: f32) -> Self {
        let rule = GestureTestRule::new();
        let settle = GestureConfig::default().panel_settle;
        let host = Rc::new(RecordingHost::new(rule.frame_clock(), settle));
        Self {
            surface: RecordingSurface::shared(width),
            overlay: RecordingOverlay::shared(1.0),
            container: RecordingContainer::shared(),
            host,
            arbiter: RecognizerArbiter::shared(),
            rule,
        }
    }

    /// Host whose panel transitions settle with `settle`.
    pub fn with_panel_settle(mut self, settle: AnimationSpec) -> Self {
        self.host = Rc::new(RecordingHost::new(self.rule.frame_clock(), settle));
        self
    }

    pub fn handles(&self) -> SurfaceHandles {
        SurfaceHandles::new(&self.surface)
            .with_overlay(&self.overlay)
            .with_container(&self.container)
    }

    pub fn driver(&self, role: RecognizerRole) -> TransitionDriver {
        self.driver_with_config(role, GestureConfig::default())
    }

    pub fn driver_with_config(
        &self,
        role: RecognizerRole,
        config: GestureConfig,
    ) -> TransitionDriver {
        let host: Rc<dyn TransitionHost> = self.host.clone();
        TransitionDriver::new(
            role,
            &self.arbiter,
            self.handles(),
            host,
            self.rule.frame_clock(),
            config,
        )
    }

    /// Feed `samples` to `driver` in order.
    pub fn play(
        &self,
        driver: &mut TransitionDriver,
        samples: impl IntoIterator<Item = DragSample>,
    ) -> Vec<DriverEvent> {
        samples.into_iter().map(|sample| driver.handle(sample)).collect()
    }
}

impl Default for TransitionScene {
    fn default() -> Self {
        Self::new()
    }
}
