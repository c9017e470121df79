//! Collaborator seams.
//!
//! A driver never owns the views it moves. It holds weak handles and
//! upgrades them once per drag; a collaborator that has gone away turns the
//! drag into a no-op. All setters take `&self`, implementors use interior
//! mutability.

use std::fmt;
use std::rc::{Rc, Weak};

use herodrag_animation::InteractiveTransition;
use herodrag_geometry::{Point, Rect, Transform};

use crate::sample::DragSample;

/// The view that follows the finger.
pub trait DraggableSurface {
    fn transform(&self) -> Transform;
    fn set_transform(&self, transform: Transform);
    /// Resting position of the view in host coordinates.
    fn position(&self) -> Point;
    /// Width used to turn a horizontal scrub into a percent.
    fn width(&self) -> f32;
}

/// Dimming layer behind the dragged view.
pub trait FadeableOverlay {
    fn alpha(&self) -> f32;
    fn set_alpha(&self, alpha: f32);
}

/// Sibling container behind the dragged view.
///
/// Fades in while the view is dragged away, and shrinks and masks its
/// corners while a side panel slides over it.
pub trait RescalableContainer {
    fn scale(&self) -> f32;
    fn set_scale(&self, scale: f32);
    fn alpha(&self) -> f32;
    fn set_alpha(&self, alpha: f32);
    fn set_masked(&self, masked: bool);
}

/// Navigation callbacks of the screen that owns the driver.
pub trait TransitionHost {
    /// Pop the dragged view.
    fn dismiss(&self);

    /// Start an interactive side-panel presentation. The returned controller
    /// is scrubbed by the drag and settled on release; `None` declines the
    /// reveal.
    fn reveal_side_panel(&self, from: &DragSample) -> Option<InteractiveTransition>;

    /// Dismiss towards a different destination than [`dismiss`].
    ///
    /// [`dismiss`]: TransitionHost::dismiss
    fn dismiss_to_alternate_destination(&self);
}

/// Weak references to the collaborators of one driver.
#[derive(Clone)]
pub struct SurfaceHandles {
    surface: Weak<dyn DraggableSurface>,
    overlay: Option<Weak<dyn FadeableOverlay>>,
    container: Option<Weak<dyn RescalableContainer>>,
    origin_frame: Option<Rect>,
}

impl SurfaceHandles {
    pub fn new<S: DraggableSurface + 'static>(surface: &Rc<S>) -> Self {
        let surface = Rc::downgrade(surface) as Weak<dyn DraggableSurface>;
        Self {
            surface,
            overlay: None,
            container: None,
            origin_frame: None,
        }
    }

    pub fn with_overlay<O: FadeableOverlay + 'static>(mut self, overlay: &Rc<O>) -> Self {
        let overlay = Rc::downgrade(overlay) as Weak<dyn FadeableOverlay>;
        self.overlay = Some(overlay);
        self
    }

    pub fn with_container<C: RescalableContainer + 'static>(mut self, container: &Rc<C>) -> Self {
        let container = Rc::downgrade(container) as Weak<dyn RescalableContainer>;
        self.container = Some(container);
        self
    }

    /// Frame the view was presented from, handed through to the host's
    /// hero animation. The revert itself always targets the identity
    /// transform.
    pub fn with_origin_frame(mut self, frame: Rect) -> Self {
        self.origin_frame = Some(frame);
        self
    }

    pub fn set_origin_frame(&mut self, frame: Option<Rect>) {
        self.origin_frame = frame;
    }

    /// Strong references for the duration of one drag, or `None` when the
    /// dragged surface is gone. Optional collaborators that are gone are
    /// simply absent.
    pub fn upgrade(&self) -> Option<Collaborators> {
        let surface = self.surface.upgrade()?;
        Some(Collaborators {
            surface,
            overlay: self.overlay.as_ref().and_then(Weak::upgrade),
            container: self.container.as_ref().and_then(Weak::upgrade),
            origin_frame: self.origin_frame,
        })
    }
}

impl fmt::Debug for SurfaceHandles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceHandles")
            .field("surface_alive", &(self.surface.strong_count() > 0))
            .field("overlay", &self.overlay.is_some())
            .field("container", &self.container.is_some())
            .field("origin_frame", &self.origin_frame)
            .finish()
    }
}

/// Collaborators held for the duration of one drag.
#[derive(Clone)]
pub struct Collaborators {
    pub surface: Rc<dyn DraggableSurface>,
    pub overlay: Option<Rc<dyn FadeableOverlay>>,
    pub container: Option<Rc<dyn RescalableContainer>>,
    pub origin_frame: Option<Rect>,
}

impl Collaborators {
    pub fn downgrade(&self) -> WeakCollaborators {
        WeakCollaborators {
            surface: Rc::downgrade(&self.surface),
            overlay: self.overlay.as_ref().map(Rc::downgrade),
            container: self.container.as_ref().map(Rc::downgrade),
        }
    }

    /// Drop the panel mask and any companion scale on the container.
    pub(crate) fn reset_container(&self) {
        if let Some(container) = &self.container {
            container.set_masked(false);
            container.set_scale(1.0);
        }
    }
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators")
            .field("transform", &self.surface.transform())
            .field("overlay", &self.overlay.is_some())
            .field("container", &self.container.is_some())
            .finish()
    }
}

/// Weak form of [`Collaborators`] for animation callbacks, which must not
/// keep a torn-down view alive.
#[derive(Clone)]
pub struct WeakCollaborators {
    surface: Weak<dyn DraggableSurface>,
    overlay: Option<Weak<dyn FadeableOverlay>>,
    container: Option<Weak<dyn RescalableContainer>>,
}

impl WeakCollaborators {
    pub fn surface(&self) -> Option<Rc<dyn DraggableSurface>> {
        self.surface.upgrade()
    }

    pub fn overlay(&self) -> Option<Rc<dyn FadeableOverlay>> {
        self.overlay.as_ref().and_then(Weak::upgrade)
    }

    pub fn container(&self) -> Option<Rc<dyn RescalableContainer>> {
        self.container.as_ref().and_then(Weak::upgrade)
    }
}

#[cfg(test)]
#[path = "tests/surfaces_tests.rs"]
mod tests;
