//! Frame-driven animations.
//!
//! [`Animatable`] advances a value towards a target on every frame of the
//! runtime's [`FrameClock`], either along an eased tween or a damped spring.
//! Springs integrate a normalised progress (0 at the start value, 1 at the
//! target) so the same physics works for any [`Lerp`] type.

use std::cell::RefCell;
use std::rc::Rc;

use herodrag_core::{FrameCallbackRegistration, FrameClock};
use herodrag_geometry::{lerp, Point, Transform, Vector2};

use crate::easing::Easing;

/// Integration step for spring physics, roughly one 60 Hz frame.
const SPRING_TIMESTEP_SECS: f32 = 0.016;

/// Frame gaps above this are clamped so a stalled host does not explode the spring.
const MAX_FRAME_DELTA_SECS: f32 = 0.25;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        lerp(*self, *target, fraction)
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

impl Lerp for Vector2 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Vector2::new(
            lerp(self.x, target.x, fraction),
            lerp(self.y, target.y, fraction),
        )
    }
}

impl Lerp for Point {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Point::new(
            lerp(self.x, target.x, fraction),
            lerp(self.y, target.y, fraction),
        )
    }
}

impl Lerp for Transform {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self.interpolate(target, fraction)
    }
}

/// Tween specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowIn)
    }
}

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 is critically damped, below bounces, above creeps.
    pub damping_ratio: f32,
    pub stiffness: f32,
    /// Rest threshold on progress velocity (progress units per second).
    pub velocity_threshold: f32,
    /// Rest threshold on the distance between progress and 1.0.
    pub position_threshold: f32,
    /// Starting velocity in progress units per second; 1.0 covers the whole
    /// distance in one second.
    pub initial_velocity: f32,
}

impl SpringSpec {
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
            initial_velocity: 0.0,
        }
    }

    pub fn bouncy() -> Self {
        Self {
            damping_ratio: 0.5,
            ..Self::default_spring()
        }
    }

    /// Spring whose undamped period matches `duration_millis`, the way
    /// duration-based platform springs are usually specified.
    pub fn with_duration(duration_millis: u64, damping_ratio: f32) -> Self {
        let seconds = (duration_millis.max(1) as f32) / 1000.0;
        let angular_frequency = std::f32::consts::TAU / seconds;
        Self {
            damping_ratio,
            stiffness: angular_frequency * angular_frequency,
            ..Self::default_spring()
        }
    }

    pub fn with_initial_velocity(mut self, initial_velocity: f32) -> Self {
        self.initial_velocity = initial_velocity;
        self
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    Tween(AnimationSpec),
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

/// How an animation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEnd {
    /// Reached the target.
    Finished,
    /// Replaced by another `animate_to`, `snap_to` or `stop`.
    Interrupted,
}

type ValueListener<T> = Rc<dyn Fn(&T)>;
type EndCallback = Box<dyn FnOnce(AnimationEnd)>;

/// Value animated on the frame clock.
///
/// Clones share the same animation. The frame callback only holds a weak
/// reference: dropping every handle cancels the run without calling its end
/// callback.
pub struct Animatable<T: Lerp + Clone + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: Lerp + Clone + 'static> {
    clock: FrameClock,
    current: T,
    start: T,
    target: T,
    progress: f32,
    velocity: f32,
    animation_type: AnimationType,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    listener: Option<ValueListener<T>>,
    on_end: Option<EndCallback>,
    /// Bumped whenever the running animation is replaced.
    epoch: u64,
}

impl<T: Lerp + Clone + 'static> Animatable<T> {
    pub fn new(initial: T, clock: FrameClock) -> Self {
        let inner = AnimatableInner {
            clock,
            current: initial.clone(),
            start: initial.clone(),
            target: initial,
            progress: 1.0,
            velocity: 0.0,
            animation_type: AnimationType::default(),
            start_time_nanos: None,
            last_frame_nanos: None,
            registration: None,
            listener: None,
            on_end: None,
            epoch: 0,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Observe every value produced by a frame or a snap.
    pub fn set_listener(&self, listener: impl Fn(&T) + 'static) {
        self.inner.borrow_mut().listener = Some(Rc::new(listener));
    }

    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn animation_type(&self) -> AnimationType {
        self.inner.borrow().animation_type
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().on_end.is_some()
    }

    /// Animate from the current value to `target`. A run already in flight
    /// ends with [`AnimationEnd::Interrupted`].
    pub fn animate_to(
        &self,
        target: T,
        animation: AnimationType,
        on_end: impl FnOnce(AnimationEnd) + 'static,
    ) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.interrupt();
            inner.start = inner.current.clone();
            inner.target = target;
            inner.progress = 0.0;
            inner.velocity = match animation {
                AnimationType::Spring(spec) => spec.initial_velocity,
                AnimationType::Tween(_) => 0.0,
            };
            inner.animation_type = animation;
            inner.on_end = Some(Box::new(on_end));
            interrupted
        };
        if let Some(callback) = interrupted {
            callback(AnimationEnd::Interrupted);
        }
        Self::schedule_frame(&self.inner);
    }

    /// Jump to `target` immediately, interrupting any run.
    pub fn snap_to(&self, target: T) {
        let (interrupted, listener) = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.interrupt();
            inner.current = target.clone();
            inner.start = target.clone();
            inner.target = target.clone();
            inner.progress = 1.0;
            inner.velocity = 0.0;
            (interrupted, inner.listener.clone())
        };
        if let Some(listener) = listener {
            listener(&target);
        }
        if let Some(callback) = interrupted {
            callback(AnimationEnd::Interrupted);
        }
    }

    /// Stop where the value currently is.
    pub fn stop(&self) {
        let interrupted = self.inner.borrow_mut().interrupt();
        if let Some(callback) = interrupted {
            callback(AnimationEnd::Interrupted);
        }
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() || inner.on_end.is_none() {
                return;
            }
            inner.clock.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        if !registration.is_active() {
            log::debug!("animation not scheduled: frame clock has no runtime");
        }
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let (value, finished, listener, epoch) = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            let finished = match inner.animation_type {
                AnimationType::Tween(spec) => inner.step_tween(spec, frame_time_nanos),
                AnimationType::Spring(spec) => inner.step_spring(spec, frame_time_nanos),
            };
            (
                inner.current.clone(),
                finished,
                inner.listener.clone(),
                inner.epoch,
            )
        };

        if let Some(listener) = listener {
            listener(&value);
        }

        let on_end = {
            let mut inner = this.borrow_mut();
            if inner.epoch != epoch {
                // The listener started or stopped another run.
                return;
            }
            if finished {
                inner.start_time_nanos = None;
                inner.last_frame_nanos = None;
                inner.on_end.take()
            } else {
                None
            }
        };

        match on_end {
            Some(callback) => callback(AnimationEnd::Finished),
            None if !finished => Self::schedule_frame(this),
            None => {}
        }
    }
}

impl<T: Lerp + Clone + 'static> AnimatableInner<T> {
    fn interrupt(&mut self) -> Option<EndCallback> {
        self.epoch = self.epoch.wrapping_add(1);
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
        self.on_end.take()
    }

    fn step_tween(&mut self, spec: AnimationSpec, frame_time_nanos: u64) -> bool {
        let start_time = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
        let delay_nanos = spec.delay_millis * 1_000_000;
        if elapsed_nanos < delay_nanos {
            return false;
        }

        let duration_nanos = (spec.duration_millis * 1_000_000).max(1);
        let linear = ((elapsed_nanos - delay_nanos) as f32 / duration_nanos as f32).clamp(0.0, 1.0);
        if linear >= 1.0 {
            self.progress = 1.0;
            self.current = self.target.clone();
            return true;
        }
        self.progress = spec.easing.transform(linear);
        self.current = self.start.lerp(&self.target, self.progress);
        false
    }

    /// Semi-implicit Euler over the time since the previous frame.
    fn step_spring(&mut self, spec: SpringSpec, frame_time_nanos: u64) -> bool {
        let Some(previous) = self.last_frame_nanos.replace(frame_time_nanos) else {
            return false;
        };
        let dt = (frame_time_nanos.saturating_sub(previous) as f32 / 1_000_000_000.0)
            .min(MAX_FRAME_DELTA_SECS);

        let stiffness = spec.stiffness.max(f32::EPSILON);
        let damping = 2.0 * spec.damping_ratio * stiffness.sqrt();
        let mut remaining = dt;
        while remaining > 0.0 {
            let step = remaining.min(SPRING_TIMESTEP_SECS);
            let displacement = self.progress - 1.0;
            let force = -stiffness * displacement - damping * self.velocity;
            self.velocity += force * step;
            self.progress += self.velocity * step;
            remaining -= step;
        }

        let at_rest = self.velocity.abs() < spec.velocity_threshold;
        let near_target = (self.progress - 1.0).abs() < spec.position_threshold;
        if at_rest && near_target {
            self.progress = 1.0;
            self.velocity = 0.0;
            self.current = self.target.clone();
            return true;
        }
        self.current = self
            .start
            .lerp(&self.target, self.progress.clamp(-1.0, 2.0));
        false
    }
}

impl<T: Lerp + Clone + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
