//! Arbitration between overlapping drag recognizers.
//!
//! A screen can stack several drag recognizers: the dragged content, the
//! container behind it and a side panel. Each one asks the shared
//! [`RecognizerArbiter`] before it starts a drag. The arbiter consults an
//! [`ArbitrationPolicy`] for two questions: does this role want a drag
//! starting with this velocity, and may it run alongside whatever is already
//! active.
//!
//! Arbitration happens once per drag. After a recognizer has begun, it is
//! not asked again until it ends.
//!
//! The arbiter also owns the side-panel claim, so at most one reveal is in
//! flight across every recognizer that shares it.

use std::fmt;

use herodrag_core::collections::map::HashMap;
use herodrag_core::Owned;
use herodrag_geometry::Vector2;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecognizerRole {
    /// Drags the presented view; can dismiss it or reveal the side panel.
    Content,
    /// Drags the container behind the content; dismisses to the alternate
    /// destination.
    Container,
    /// Drags the revealed side panel; dismisses it.
    Panel,
}

pub trait ArbitrationPolicy {
    /// Whether a recognizer in `role` starts a drag with this initial velocity.
    fn should_begin(&self, role: RecognizerRole, velocity: Vector2) -> bool;

    /// Whether two recognizers may track the same touch.
    fn should_recognize_simultaneously(
        &self,
        first: RecognizerRole,
        second: RecognizerRole,
    ) -> bool;
}

/// Default role rules.
///
/// | role | begins on |
/// |------|-----------|
/// | content | mainly downward (dismiss) or mainly leftward (panel reveal) |
/// | container | mainly rightward (dismiss to the alternate destination) |
/// | panel | mainly rightward (slide the panel back out) |
///
/// The container runs alone; every other pair may track the same touch.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleArbitration;

impl ArbitrationPolicy for RoleArbitration {
    fn should_begin(&self, role: RecognizerRole, velocity: Vector2) -> bool {
        match role {
            RecognizerRole::Content => {
                (velocity.is_vertical() && velocity.y > 0.0)
                    || (velocity.is_horizontal() && velocity.x < 0.0)
            }
            RecognizerRole::Container | RecognizerRole::Panel => {
                velocity.is_horizontal() && velocity.x > 0.0
            }
        }
    }

    fn should_recognize_simultaneously(
        &self,
        first: RecognizerRole,
        second: RecognizerRole,
    ) -> bool {
        first != RecognizerRole::Container && second != RecognizerRole::Container
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecognizerId(u64);

impl RecognizerId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecognizerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why a recognizer was not allowed to start a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginRejection {
    UnknownRecognizer(RecognizerId),
    /// The initial velocity does not match the role's direction.
    DirectionMismatch(RecognizerRole),
    /// Another active recognizer cannot run alongside this one.
    Exclusive {
        role: RecognizerRole,
        active: RecognizerRole,
    },
}

impl fmt::Display for BeginRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeginRejection::UnknownRecognizer(id) => write!(f, "recognizer {id} is not attached"),
            BeginRejection::DirectionMismatch(role) => {
                write!(f, "{role:?} does not begin in this direction")
            }
            BeginRejection::Exclusive { role, active } => {
                write!(f, "{role:?} cannot run alongside active {active:?}")
            }
        }
    }
}

impl std::error::Error for BeginRejection {}

#[derive(Debug, Clone, Copy)]
struct RecognizerEntry {
    role: RecognizerRole,
    active: bool,
}

pub struct RecognizerArbiter {
    policy: Box<dyn ArbitrationPolicy>,
    recognizers: HashMap<RecognizerId, RecognizerEntry>,
    next_id: u64,
    panel_owner: Option<RecognizerId>,
}

/// Arbiter shared by every driver on one screen.
pub type SharedArbiter = Owned<RecognizerArbiter>;

impl RecognizerArbiter {
    pub fn new() -> Self {
        Self::with_policy(RoleArbitration)
    }

    pub fn with_policy(policy: impl ArbitrationPolicy + 'static) -> Self {
        Self {
            policy: Box::new(policy),
            recognizers: HashMap::default(),
            next_id: 1,
            panel_owner: None,
        }
    }

    pub fn shared() -> SharedArbiter {
        Owned::new(Self::new())
    }

    pub fn set_policy(&mut self, policy: impl ArbitrationPolicy + 'static) {
        self.policy = Box::new(policy);
    }

    pub fn attach(&mut self, role: RecognizerRole) -> RecognizerId {
        let id = RecognizerId(self.next_id);
        self.next_id += 1;
        self.recognizers
            .insert(id, RecognizerEntry { role, active: false });
        log::debug!("attached {role:?} recognizer {id}");
        id
    }

    pub fn detach(&mut self, id: RecognizerId) {
        if self.recognizers.remove(&id).is_some() {
            log::debug!("detached recognizer {id}");
        }
        if self.panel_owner == Some(id) {
            self.panel_owner = None;
        }
    }

    pub fn role(&self, id: RecognizerId) -> Option<RecognizerRole> {
        self.recognizers.get(&id).map(|entry| entry.role)
    }

    pub fn is_active(&self, id: RecognizerId) -> bool {
        self.recognizers.get(&id).is_some_and(|entry| entry.active)
    }

    /// Roles of every recognizer currently tracking a drag.
    pub fn active_roles(&self) -> SmallVec<[RecognizerRole; 4]> {
        let mut active: SmallVec<[(RecognizerId, RecognizerRole); 4]> = self
            .recognizers
            .iter()
            .filter(|(_, entry)| entry.active)
            .map(|(id, entry)| (*id, entry.role))
            .collect();
        active.sort_by_key(|(id, _)| *id);
        active.into_iter().map(|(_, role)| role).collect()
    }

    /// Ask to start a drag. On success the recognizer is active until
    /// [`end`](Self::end).
    pub fn request_begin(
        &mut self,
        id: RecognizerId,
        velocity: Vector2,
    ) -> Result<(), BeginRejection> {
        let role = self
            .role(id)
            .ok_or(BeginRejection::UnknownRecognizer(id))?;

        if !self.policy.should_begin(role, velocity) {
            return Err(BeginRejection::DirectionMismatch(role));
        }

        let blocking = self
            .recognizers
            .iter()
            .filter(|(other, entry)| **other != id && entry.active)
            .find(|(_, entry)| !self.policy.should_recognize_simultaneously(role, entry.role))
            .map(|(_, entry)| entry.role);
        if let Some(active) = blocking {
            return Err(BeginRejection::Exclusive { role, active });
        }

        if let Some(entry) = self.recognizers.get_mut(&id) {
            entry.active = true;
        }
        log::trace!("{role:?} recognizer {id} began");
        Ok(())
    }

    pub fn end(&mut self, id: RecognizerId) {
        if let Some(entry) = self.recognizers.get_mut(&id) {
            entry.active = false;
        }
    }

    /// Take the side-panel claim. Fails while another recognizer holds it.
    pub fn claim_panel(&mut self, id: RecognizerId) -> bool {
        match self.panel_owner {
            Some(owner) if owner != id => {
                log::debug!("panel reveal by {id} refused; {owner} holds it");
                false
            }
            _ => {
                self.panel_owner = Some(id);
                true
            }
        }
    }

    pub fn release_panel(&mut self, id: RecognizerId) {
        if self.panel_owner == Some(id) {
            self.panel_owner = None;
        }
    }

    pub fn panel_owner(&self) -> Option<RecognizerId> {
        self.panel_owner
    }
}

impl Default for RecognizerArbiter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecognizerArbiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecognizerArbiter")
            .field("recognizers", &self.recognizers.len())
            .field("active", &self.active_roles())
            .field("panel_owner", &self.panel_owner)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/arbitration_tests.rs"]
mod tests;
