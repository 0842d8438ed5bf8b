//! Display mode state machine.
//!
//! Votes are level-triggered but the machine is edge-triggered: observers hear
//! about a mode only when it actually changes. Entering [`Mode::Focus`] samples
//! one photo placard as the focus target.

use crate::{
    gesture::ModeVote,
    particle::{ParticleId, ParticleKind, ParticleRegistry},
};
use log::{debug, info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Choreography state governing the layout of every particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    /// Descending helix
    #[default]
    Tree,
    /// Free drift inside a bounding sphere
    Scatter,
    /// One photo close to the camera, everything else on a background ring
    Focus,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tree => "TREE",
            Self::Scatter => "SCATTER",
            Self::Focus => "FOCUS",
        };
        f.write_str(name)
    }
}

/// Receives a notification on every real mode change
pub trait ModeObserver {
    fn on_mode_changed(&mut self, mode: Mode);
}

impl<F: FnMut(Mode)> ModeObserver for F {
    fn on_mode_changed(&mut self, mode: Mode) {
        self(mode);
    }
}

/// Current mode, focus target and change notification
pub struct ModeStateMachine {
    mode: Mode,
    focus_target: Option<ParticleId>,
    rng: StdRng,
    observers: Vec<Box<dyn ModeObserver>>,
}

impl ModeStateMachine {
    /// Start in [`Mode::Tree`] using the given random source for focus selection
    #[must_use]
    pub fn new(rng: StdRng) -> Self {
        Self {
            mode: Mode::Tree,
            focus_target: None,
            rng,
            observers: Vec::new(),
        }
    }

    /// Deterministic machine for a given seed
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Active mode
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Photo singled out while in FOCUS, if any
    #[must_use]
    pub const fn focus_target(&self) -> Option<ParticleId> {
        self.focus_target
    }

    /// Register an observer for mode changes
    pub fn subscribe(&mut self, observer: impl ModeObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Apply a classifier vote. Returns the new mode if a transition happened.
    pub fn apply_vote(&mut self, vote: ModeVote, registry: &ParticleRegistry) -> Option<Mode> {
        let mode = vote.mode()?;
        self.set_mode(mode, registry).then_some(mode)
    }

    /// Switch to `mode`, firing side effects only on an actual change.
    ///
    /// Returns whether a transition happened.
    pub fn set_mode(&mut self, mode: Mode, registry: &ParticleRegistry) -> bool {
        if mode == self.mode {
            return false;
        }

        info!("Mode changed: {} -> {}", self.mode, mode);
        self.mode = mode;

        self.focus_target = match mode {
            Mode::Focus => self.pick_focus_target(registry),
            Mode::Tree | Mode::Scatter => None,
        };

        for observer in &mut self.observers {
            observer.on_mode_changed(mode);
        }
        true
    }

    /// Uniformly sample one photo placard
    fn pick_focus_target(&mut self, registry: &ParticleRegistry) -> Option<ParticleId> {
        let photos: Vec<ParticleId> = registry.particles_of_kind(ParticleKind::Photo).map(|p| p.id()).collect();
        if photos.is_empty() {
            warn!("Entered FOCUS with no photos registered; no focus target");
            return None;
        }

        let target = photos[self.rng.gen_range(0..photos.len())];
        debug!("Focus target {} chosen among {} photos", target, photos.len());
        Some(target)
    }
}

impl fmt::Debug for ModeStateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeStateMachine")
            .field("mode", &self.mode)
            .field("focus_target", &self.focus_target)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::TextureHandle;
    use crate::pose::Vec3;
    use std::{cell::RefCell, rc::Rc};

    fn recorder(machine: &mut ModeStateMachine) -> Rc<RefCell<Vec<Mode>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        machine.subscribe(move |mode| sink.borrow_mut().push(mode));
        seen
    }

    #[test]
    fn test_initial_mode_is_tree() {
        let machine = ModeStateMachine::with_seed(1);
        assert_eq!(machine.mode(), Mode::Tree);
        assert_eq!(machine.focus_target(), None);
    }

    #[test]
    fn test_repeated_vote_is_edge_triggered() {
        let registry = ParticleRegistry::with_seed(1);
        let mut machine = ModeStateMachine::with_seed(1);
        let seen = recorder(&mut machine);

        assert_eq!(machine.apply_vote(ModeVote::Tree, &registry), None);
        assert_eq!(machine.apply_vote(ModeVote::Tree, &registry), None);
        assert!(seen.borrow().is_empty());

        assert_eq!(machine.apply_vote(ModeVote::Scatter, &registry), Some(Mode::Scatter));
        assert_eq!(machine.apply_vote(ModeVote::Scatter, &registry), None);
        assert_eq!(machine.apply_vote(ModeVote::None, &registry), None);
        assert_eq!(*seen.borrow(), vec![Mode::Scatter]);
    }

    #[test]
    fn test_focus_picks_a_photo() {
        let mut registry = ParticleRegistry::with_seed(3);
        registry.add_particle(ParticleKind::DecorBox, Vec3::zeros(), Vec3::zeros());
        let photo_a = registry.add_photo(TextureHandle(1));
        registry.add_particle(ParticleKind::DecorSphere, Vec3::zeros(), Vec3::zeros());
        let photo_b = registry.add_photo(TextureHandle(2));

        let mut machine = ModeStateMachine::with_seed(7);
        machine.apply_vote(ModeVote::Focus, &registry);
        let target = machine.focus_target().unwrap();
        assert!(target == photo_a || target == photo_b);

        // Reaffirming FOCUS does not resample
        for _ in 0..20 {
            machine.apply_vote(ModeVote::Focus, &registry);
            assert_eq!(machine.focus_target(), Some(target));
        }

        machine.apply_vote(ModeVote::Tree, &registry);
        assert_eq!(machine.focus_target(), None);
    }

    #[test]
    fn test_focus_selection_is_deterministic_per_seed() {
        let mut registry = ParticleRegistry::with_seed(3);
        for i in 0..8 {
            registry.add_photo(TextureHandle(i));
        }

        let picks = |seed| {
            let mut machine = ModeStateMachine::with_seed(seed);
            let mut out = Vec::new();
            for _ in 0..5 {
                machine.set_mode(Mode::Focus, &registry);
                out.push(machine.focus_target());
                machine.set_mode(Mode::Tree, &registry);
            }
            out
        };
        assert_eq!(picks(42), picks(42));
    }

    #[test]
    fn test_focus_without_photos() {
        let mut registry = ParticleRegistry::with_seed(3);
        registry.add_particle(ParticleKind::DecorCandy, Vec3::zeros(), Vec3::zeros());
        let mut machine = ModeStateMachine::with_seed(7);
        assert!(machine.set_mode(Mode::Focus, &registry));
        assert_eq!(machine.mode(), Mode::Focus);
        assert_eq!(machine.focus_target(), None);
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(Mode::Tree.to_string(), "TREE");
        assert_eq!(Mode::Scatter.to_string(), "SCATTER");
        assert_eq!(Mode::Focus.to_string(), "FOCUS");
    }
}
