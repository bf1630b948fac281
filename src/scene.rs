//! Presentation boundary
//!
//! The simulation never draws anything itself. It creates, moves and
//! destroys opaque meshes through a [`Scene`] implementation supplied by the
//! host, and reports the shot charge for a progress indicator.

use std::collections::BTreeMap;

use glam::Vec2;

/// Calls the simulation makes into its host
pub trait Scene {
    /// Opaque handle to a visual owned by the host
    type Mesh;

    fn set_target_fps(&mut self, fps: u32);

    fn setup_background(&mut self, width: f32, height: f32);

    fn create_pocket_mesh(&mut self, radius: f32) -> Self::Mesh;

    fn create_ball_mesh(&mut self, radius: f32) -> Self::Mesh;

    fn place_mesh(&mut self, mesh: &Self::Mesh, x: f32, y: f32, z: f32);

    fn destroy_mesh(&mut self, mesh: Self::Mesh);

    /// Shot charge in [0, 1]
    fn update_progress_bar(&mut self, progress: f32);
}

/// Handle issued by [`RecordingScene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MeshId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind {
    Pocket,
    Ball,
}

/// A live mesh as last placed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshRecord {
    pub kind: MeshKind,
    pub radius: f32,
    pub position: Vec2,
}

/// Headless scene that keeps the live mesh set and counts calls.
///
/// Used by the headless binary and tests; a real host would draw instead.
#[derive(Debug, Clone, Default)]
pub struct RecordingScene {
    meshes: BTreeMap<MeshId, MeshRecord>,
    next_id: u32,
    pub target_fps: Option<u32>,
    pub background: Option<(f32, f32)>,
    pub progress: f32,
    pub placements: u64,
    pub destroyed: u64,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mesh(&self, id: MeshId) -> Option<&MeshRecord> {
        self.meshes.get(&id)
    }

    /// Live meshes of the given kind, in creation order
    pub fn live(&self, kind: MeshKind) -> impl Iterator<Item = (MeshId, &MeshRecord)> {
        self.meshes
            .iter()
            .filter(move |(_, m)| m.kind == kind)
            .map(|(id, m)| (*id, m))
    }

    pub fn live_count(&self, kind: MeshKind) -> usize {
        self.live(kind).count()
    }

    fn create(&mut self, kind: MeshKind, radius: f32) -> MeshId {
        let id = MeshId(self.next_id);
        self.next_id += 1;
        self.meshes.insert(
            id,
            MeshRecord {
                kind,
                radius,
                position: Vec2::ZERO,
            },
        );
        id
    }
}

impl Scene for RecordingScene {
    type Mesh = MeshId;

    fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = Some(fps);
    }

    fn setup_background(&mut self, width: f32, height: f32) {
        self.background = Some((width, height));
    }

    fn create_pocket_mesh(&mut self, radius: f32) -> MeshId {
        self.create(MeshKind::Pocket, radius)
    }

    fn create_ball_mesh(&mut self, radius: f32) -> MeshId {
        self.create(MeshKind::Ball, radius)
    }

    fn place_mesh(&mut self, mesh: &MeshId, x: f32, y: f32, _z: f32) {
        match self.meshes.get_mut(mesh) {
            Some(record) => {
                record.position = Vec2::new(x, y);
                self.placements += 1;
            }
            None => log::warn!("place_mesh on unknown mesh {mesh:?}"),
        }
    }

    fn destroy_mesh(&mut self, mesh: MeshId) {
        if self.meshes.remove(&mesh).is_some() {
            self.destroyed += 1;
        } else {
            log::warn!("destroy_mesh on unknown mesh {mesh:?}");
        }
    }

    fn update_progress_bar(&mut self, progress: f32) {
        self.progress = progress;
    }
}
