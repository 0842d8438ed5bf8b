//! Particle registry.
//!
//! Owns every ornament and photo placard. Particles are append-only and keep
//! their insertion index for life, so layouts keyed on `index / count` stay
//! stable from frame to frame.

use crate::{
    constants::{
        DECOR_BOX_PROBABILITY, DECOR_SPHERE_PROBABILITY, DEFAULT_DECOR_SPAWN_EXTENT, DEFAULT_DECOR_VELOCITY_SCALE,
        DEFAULT_PHOTO_SPAWN_EXTENT, DEFAULT_PHOTO_VELOCITY_SCALE, TAU,
    },
    pose::{Pose, Vec3},
};
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a particle: its insertion index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(usize);

impl ParticleId {
    /// Position in registry iteration order
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a particle depicts; fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticleKind {
    DecorBox,
    DecorSphere,
    DecorCandy,
    Photo,
}

impl ParticleKind {
    /// Decorative ornament, as opposed to a photo placard
    #[must_use]
    pub const fn is_decor(self) -> bool {
        !matches!(self, Self::Photo)
    }
}

/// Opaque handle to an already-decoded image owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u64);

/// One posable scene object
#[derive(Debug, Clone)]
pub struct Particle {
    id: ParticleId,
    kind: ParticleKind,
    /// Actual pose, read by the renderer every frame
    pub pose: Pose,
    /// Drift per frame while scattered; kept across mode changes
    pub velocity: Vec3,
    phase: Option<f64>,
    texture: Option<TextureHandle>,
}

impl Particle {
    #[must_use]
    pub const fn id(&self) -> ParticleId {
        self.id
    }

    #[must_use]
    pub const fn kind(&self) -> ParticleKind {
        self.kind
    }

    /// Random animation offset carried by decorations; unused by the current layouts
    #[must_use]
    pub const fn phase(&self) -> Option<f64> {
        self.phase
    }

    /// Image shown on a photo placard
    #[must_use]
    pub const fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }
}

/// Where and how fast newly spawned particles start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnSettings {
    /// Half-width of the cube decorations spawn in
    pub decor_extent: f64,
    /// Half-width of the cube photos spawn in
    pub photo_extent: f64,
    pub decor_velocity_scale: f64,
    pub photo_velocity_scale: f64,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            decor_extent: DEFAULT_DECOR_SPAWN_EXTENT,
            photo_extent: DEFAULT_PHOTO_SPAWN_EXTENT,
            decor_velocity_scale: DEFAULT_DECOR_VELOCITY_SCALE,
            photo_velocity_scale: DEFAULT_PHOTO_VELOCITY_SCALE,
        }
    }
}

/// Append-only set of particles in stable insertion order
pub struct ParticleRegistry {
    particles: Vec<Particle>,
    spawn: SpawnSettings,
    rng: StdRng,
}

impl ParticleRegistry {
    /// Empty registry drawing spawn randomness from `rng`
    #[must_use]
    pub fn new(rng: StdRng, spawn: SpawnSettings) -> Self {
        Self {
            particles: Vec::new(),
            spawn,
            rng,
        }
    }

    /// Deterministic registry with default spawn settings
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), SpawnSettings::default())
    }

    /// Append a particle at `position` with zero rotation and unit scale
    pub fn add_particle(&mut self, kind: ParticleKind, position: Vec3, velocity: Vec3) -> ParticleId {
        let id = ParticleId(self.particles.len());
        let phase = kind.is_decor().then(|| self.rng.gen::<f64>() * TAU);
        self.particles.push(Particle {
            id,
            kind,
            pose: Pose::at(position),
            velocity,
            phase,
            texture: None,
        });
        id
    }

    /// Add a photo placard at a random position with a small random drift
    pub fn add_photo(&mut self, texture: TextureHandle) -> ParticleId {
        let position = self.random_vector(self.spawn.photo_extent * 2.0);
        let velocity = self.random_vector(self.spawn.photo_velocity_scale);
        let id = self.add_particle(ParticleKind::Photo, position, velocity);
        self.particles[id.index()].texture = Some(texture);
        info!("Photo {} added ({} particles total)", id, self.particles.len());
        id
    }

    /// Spawn `count` decorations: 40% boxes, 40% spheres, 20% candy canes
    pub fn populate_decorations(&mut self, count: usize) {
        for _ in 0..count {
            let roll: f64 = self.rng.gen();
            let kind = if roll < DECOR_BOX_PROBABILITY {
                ParticleKind::DecorBox
            } else if roll < DECOR_SPHERE_PROBABILITY {
                ParticleKind::DecorSphere
            } else {
                ParticleKind::DecorCandy
            };
            let position = self.random_vector(self.spawn.decor_extent * 2.0);
            let velocity = self.random_vector(self.spawn.decor_velocity_scale);
            self.add_particle(kind, position, velocity);
        }
        debug!("Spawned {} decorations", count);
    }

    /// Vector with each component uniform in `[-span / 2, span / 2)`
    fn random_vector(&mut self, span: f64) -> Vec3 {
        Vec3::new(
            self.rng.gen::<f64>() - 0.5,
            self.rng.gen::<f64>() - 0.5,
            self.rng.gen::<f64>() - 0.5,
        ) * span
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id.index())
    }

    /// All particles in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Mutable pass over all particles in insertion order.
    ///
    /// Holding this borrow rules out adding particles mid-frame.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }

    /// Particles of one kind, in insertion order
    pub fn particles_of_kind(&self, kind: ParticleKind) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(move |p| p.kind == kind)
    }
}

impl fmt::Debug for ParticleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParticleRegistry")
            .field("len", &self.particles.len())
            .field("spawn", &self.spawn)
            .finish_non_exhaustive()
    }
}
