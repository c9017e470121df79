//! Console stand-ins for the views a real screen would hand to a driver.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use herodrag_animation::{AnimationSpec, InteractiveTransition};
use herodrag_core::FrameClock;
use herodrag_geometry::{Point, Transform};
use herodrag_gesture::{
    DragSample, DraggableSurface, FadeableOverlay, RescalableContainer, TransitionHost,
};

/// The detail card presented over the map.
pub struct DetailCard {
    transform: Cell<Transform>,
    position: Point,
    width: f32,
}

impl DetailCard {
    pub fn new(position: Point, width: f32) -> Rc<Self> {
        Rc::new(Self {
            transform: Cell::new(Transform::IDENTITY),
            position,
            width,
        })
    }
}

impl DraggableSurface for DetailCard {
    fn transform(&self) -> Transform {
        self.transform.get()
    }

    fn set_transform(&self, transform: Transform) {
        log::trace!(
            "card offset ({:.1}, {:.1}) scale {:.3}",
            transform.visual_offset().x,
            transform.visual_offset().y,
            transform.scale
        );
        self.transform.set(transform);
    }

    fn position(&self) -> Point {
        self.position
    }

    fn width(&self) -> f32 {
        self.width
    }
}

pub struct Scrim {
    alpha: Cell<f32>,
}

impl Scrim {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            alpha: Cell::new(1.0),
        })
    }
}

impl FadeableOverlay for Scrim {
    fn alpha(&self) -> f32 {
        self.alpha.get()
    }

    fn set_alpha(&self, alpha: f32) {
        self.alpha.set(alpha);
    }
}

/// The map behind the card.
pub struct MapContainer {
    scale: Cell<f32>,
    alpha: Cell<f32>,
    masked: Cell<bool>,
}

impl MapContainer {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            scale: Cell::new(1.0),
            alpha: Cell::new(1.0),
            masked: Cell::new(false),
        })
    }

    pub fn is_masked(&self) -> bool {
        self.masked.get()
    }
}

impl RescalableContainer for MapContainer {
    fn scale(&self) -> f32 {
        self.scale.get()
    }

    fn set_scale(&self, scale: f32) {
        self.scale.set(scale);
    }

    fn alpha(&self) -> f32 {
        self.alpha.get()
    }

    fn set_alpha(&self, alpha: f32) {
        self.alpha.set(alpha);
    }

    fn set_masked(&self, masked: bool) {
        if self.masked.replace(masked) != masked {
            log::debug!("map corners {}", if masked { "masked" } else { "unmasked" });
        }
    }
}

/// Navigation stack of the demo screen. Records what happened so a scenario
/// can check it.
pub struct DemoNavigator {
    clock: FrameClock,
    settle: AnimationSpec,
    log: RefCell<Vec<&'static str>>,
}

impl DemoNavigator {
    pub fn new(clock: FrameClock, settle: AnimationSpec) -> Rc<Self> {
        Rc::new(Self {
            clock,
            settle,
            log: RefCell::new(Vec::new()),
        })
    }

    pub fn history(&self) -> Vec<&'static str> {
        self.log.borrow().clone()
    }
}

impl TransitionHost for DemoNavigator {
    fn dismiss(&self) {
        log::info!("navigator: pop detail card");
        self.log.borrow_mut().push("dismiss");
    }

    fn reveal_side_panel(&self, from: &DragSample) -> Option<InteractiveTransition> {
        log::info!("navigator: present side panel from {:?}", from.translation);
        self.log.borrow_mut().push("reveal");
        let transition = InteractiveTransition::new(self.clock.clone(), self.settle);
        transition.on_complete(|outcome| log::info!("navigator: side panel {outcome:?}"));
        Some(transition)
    }

    fn dismiss_to_alternate_destination(&self) {
        log::info!("navigator: pop to the search results");
        self.log.borrow_mut().push("alternate");
    }
}
