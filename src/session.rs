//! Simulation session
//!
//! Owns the table state and the host scene, and exposes the frame and input
//! entry points. One session is one game: pocketing the player ball resets
//! it to the starting rack.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BALL_COUNT, POCKET_COUNT};
use crate::layout::TableLayout;
use crate::scene::Scene;
use crate::sim::{BallStore, ShotController, SimEvent, StepOutcome, step};
use crate::tuning::Tuning;

/// Upper bound on undrained events kept by a session
pub const MAX_PENDING_EVENTS: usize = 1024;

/// Serializable view of the simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub balls: BallStore,
    pub shot: ShotController,
    pub moving: bool,
}

/// A running table bound to a presentation scene
pub struct SimulationSession<S: Scene> {
    scene: S,
    layout: TableLayout,
    tuning: Tuning,
    balls: BallStore,
    shot: ShotController,
    /// Whether anything moved during the last frame
    moving: bool,
    pocket_meshes: [Option<S::Mesh>; POCKET_COUNT],
    ball_meshes: [Option<S::Mesh>; BALL_COUNT],
    events: Vec<SimEvent>,
    initialized: bool,
}

impl<S: Scene> SimulationSession<S> {
    /// Create a session. Nothing is shown until [`init`](Self::init).
    pub fn new(scene: S, layout: TableLayout, tuning: Tuning) -> Self {
        Self {
            scene,
            balls: BallStore::racked(&layout),
            layout,
            tuning,
            shot: ShotController::new(),
            moving: false,
            pocket_meshes: std::array::from_fn(|_| None),
            ball_meshes: std::array::from_fn(|_| None),
            events: Vec::new(),
            initialized: false,
        }
    }

    /// Create the table visuals and rack the balls
    pub fn init(&mut self) {
        if self.initialized {
            self.deinit();
        }

        self.scene.set_target_fps(self.tuning.target_fps);
        self.scene.setup_background(self.layout.width, self.layout.height);

        for (slot, pos) in self.pocket_meshes.iter_mut().zip(self.layout.pockets) {
            let mesh = self.scene.create_pocket_mesh(self.layout.pocket_radius);
            self.scene.place_mesh(&mesh, pos.x, pos.y, 0.0);
            *slot = Some(mesh);
        }

        for (slot, pos) in self.ball_meshes.iter_mut().zip(self.layout.ball_starts) {
            let mesh = self.scene.create_ball_mesh(self.layout.ball_radius);
            self.scene.place_mesh(&mesh, pos.x, pos.y, 0.0);
            *slot = Some(mesh);
        }

        self.balls = BallStore::racked(&self.layout);
        self.shot.reset();
        self.moving = false;
        self.initialized = true;
        log::info!("Table racked with {} balls", self.balls.alive_count());
    }

    /// Release all visuals and clear the table
    pub fn deinit(&mut self) {
        for mesh in self.pocket_meshes.iter_mut().filter_map(Option::take) {
            self.scene.destroy_mesh(mesh);
        }
        for mesh in self.ball_meshes.iter_mut().filter_map(Option::take) {
            self.scene.destroy_mesh(mesh);
        }

        for ball in self.balls.iter_mut() {
            ball.remove();
        }
        self.shot.reset();
        self.moving = false;
        self.initialized = false;
        log::debug!("Table cleared");
    }

    /// Advance one frame of `dt` seconds
    pub fn update(&mut self, dt: f32) {
        let outcome = step(
            &mut self.balls,
            &mut self.shot,
            &self.layout,
            &self.tuning,
            &mut self.events,
        );
        self.moving = outcome.was_moving();

        match outcome {
            StepOutcome::AtRest => {}
            StepOutcome::PlayerPocketed { pocket } => {
                log::info!("Player ball pocketed in pocket {pocket}; restarting");
                self.init();
                self.cap_events();
                return;
            }
            StepOutcome::Moved { pocketed } => {
                for i in pocketed {
                    log::debug!("Ball {i} pocketed, {} left", self.balls.alive_count());
                    if let Some(mesh) = self.ball_meshes[i].take() {
                        self.scene.destroy_mesh(mesh);
                    }
                }
                self.sync_positions();
            }
        }

        self.shot.tick(dt, self.moving, self.tuning.charge_time);
        self.scene.update_progress_bar(self.shot.progress());
        self.cap_events();
    }

    /// Input pressed: start charging a shot
    pub fn on_press_start(&mut self, _x: f32, _y: f32) {
        self.shot.press_start();
    }

    /// Input released at `(x, y)`: shoot the player ball toward that point
    pub fn on_press_released(&mut self, x: f32, y: f32) {
        let release = Vec2::new(x, y);
        let blocked = self.moving || !self.balls.player().alive;
        let accepted = self.shot.press_end(
            release,
            self.balls.player().position,
            blocked,
            self.tuning.max_shot_impulse,
        );

        if let Some(impulse) = accepted {
            log::debug!("Shot with impulse {impulse:.3} toward {release}");
            self.balls.player_mut().impulse = impulse;
            self.events.push(SimEvent::ShotTaken {
                impulse,
                target: release,
            });
        }
    }

    fn sync_positions(&mut self) {
        for (ball, mesh) in self.balls.iter().zip(&self.ball_meshes) {
            if let (true, Some(mesh)) = (ball.alive, mesh) {
                self.scene.place_mesh(mesh, ball.position.x, ball.position.y, 0.0);
            }
        }
    }

    fn cap_events(&mut self) {
        if self.events.len() > MAX_PENDING_EVENTS {
            let excess = self.events.len() - MAX_PENDING_EVENTS;
            self.events.drain(..excess);
            log::trace!("Dropped {excess} undrained events");
        }
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn balls(&self) -> &BallStore {
        &self.balls
    }

    pub fn shot(&self) -> &ShotController {
        &self.shot
    }

    /// Whether any ball moved during the last frame
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Mesh handle of a ball, `None` once it has been pocketed
    pub fn ball_mesh(&self, i: usize) -> Option<&S::Mesh> {
        self.ball_meshes.get(i).and_then(Option::as_ref)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            balls: self.balls.clone(),
            shot: self.shot.clone(),
            moving: self.moving,
        }
    }

    /// Tear down and hand back the scene
    pub fn into_scene(mut self) -> S {
        self.deinit();
        self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_BALL;
    use crate::scene::{MeshKind, RecordingScene};
    use crate::sim::BallSlot;

    fn session() -> SimulationSession<RecordingScene> {
        let mut session =
            SimulationSession::new(RecordingScene::new(), TableLayout::CLASSIC, Tuning::default());
        session.init();
        session
    }

    fn launch(session: &mut SimulationSession<RecordingScene>, i: usize, pos: Vec2, dir: Vec2, impulse: f32) {
        session.balls[i] = BallSlot {
            position: pos,
            direction: dir,
            impulse,
            alive: true,
        };
    }

    #[test]
    fn test_init_creates_table() {
        let session = session();
        let scene = session.scene();
        assert_eq!(scene.target_fps, Some(60));
        assert_eq!(scene.background, Some((15.0, 8.0)));
        assert_eq!(scene.live_count(MeshKind::Pocket), POCKET_COUNT);
        assert_eq!(scene.live_count(MeshKind::Ball), BALL_COUNT);

        for (i, start) in TableLayout::CLASSIC.ball_starts.iter().enumerate() {
            let mesh = session.ball_mesh(i).unwrap();
            assert_eq!(scene.mesh(*mesh).unwrap().position, *start);
        }
        assert!(!session.is_moving());
    }

    #[test]
    fn test_deinit_releases_everything() {
        let mut session = session();
        session.deinit();
        let scene = session.scene();
        assert_eq!(scene.live_count(MeshKind::Pocket), 0);
        assert_eq!(scene.live_count(MeshKind::Ball), 0);
        assert_eq!(scene.destroyed, (POCKET_COUNT + BALL_COUNT) as u64);
        assert_eq!(session.balls().alive_count(), 0);
        assert!(!session.is_initialized());
    }

    #[test]
    fn test_charge_then_shoot() {
        let mut session = session();
        session.on_press_start(0.0, 0.0);
        session.update(0.5);
        assert!((session.scene().progress - 0.5).abs() < 1e-6);
        session.update(0.75);
        assert_eq!(session.scene().progress, 1.0);

        let start = session.balls().player().position;
        session.on_press_released(0.0, 1e-6);
        assert_eq!(session.balls().player().impulse, 0.5);
        assert_eq!(session.shot().progress(), 0.0);
        assert!(
            session
                .drain_events()
                .contains(&SimEvent::ShotTaken { impulse: 0.5, target: Vec2::new(0.0, 1e-6) })
        );

        session.update(1.0 / 60.0);
        let player = *session.balls().player();
        assert!((player.direction - Vec2::X).length() < 1e-6);
        assert!((player.position.x - (start.x + 0.5)).abs() < 1e-5);
        assert!(session.is_moving());
        assert_eq!(session.scene().progress, 0.0);

        let mesh = session.ball_mesh(PLAYER_BALL).unwrap();
        assert_eq!(session.scene().mesh(*mesh).unwrap().position, player.position);
    }

    #[test]
    fn test_release_on_shared_axis_is_ignored() {
        let mut session = session();
        session.on_press_start(0.0, 0.0);
        session.update(1.0);
        // Same y as the player ball
        session.on_press_released(3.0, 0.0);
        assert_eq!(session.balls().player().impulse, 0.0);
        assert_eq!(session.shot().progress(), 0.0);
        assert!(!session.shot().is_charging());
    }

    #[test]
    fn test_no_charge_or_shot_while_moving() {
        let mut session = session();
        launch(&mut session, 1, Vec2::new(-2.0, 2.0), Vec2::X, 0.5);
        session.on_press_start(0.0, 0.0);
        session.update(0.5);
        assert!(session.is_moving());
        assert_eq!(session.scene().progress, 0.0);

        session.on_press_released(1.0, 1.0);
        assert_eq!(session.balls().player().impulse, 0.0);
        assert_eq!(session.shot().pending_aim(), None);
    }

    #[test]
    fn test_object_ball_capture_removes_mesh_once() {
        let mut session = session();
        launch(&mut session, 3, Vec2::new(0.0, 3.6), Vec2::Y, 0.05);
        let mesh = *session.ball_mesh(3).unwrap();

        session.update(1.0 / 60.0);
        assert!(!session.balls()[3].alive);
        assert!(session.ball_mesh(3).is_none());
        assert!(session.scene().mesh(mesh).is_none());
        assert_eq!(session.scene().destroyed, 1);
        assert_eq!(session.scene().live_count(MeshKind::Ball), BALL_COUNT - 1);

        // Later frames never touch the pocketed ball again
        launch(&mut session, 1, Vec2::new(-2.0, 2.0), Vec2::X, 0.5);
        for _ in 0..5 {
            session.update(1.0 / 60.0);
        }
        assert_eq!(session.scene().destroyed, 1);
        assert_eq!(session.balls()[3].position, Vec2::ZERO);

        // Teardown only destroys what is still on the table
        session.deinit();
        assert_eq!(session.scene().destroyed, (POCKET_COUNT + BALL_COUNT) as u64);
    }

    #[test]
    fn test_player_capture_resets_to_rack() {
        let mut session = session();
        // Sink an object ball first so the reset has something to restore
        launch(&mut session, 3, Vec2::new(0.0, 3.6), Vec2::Y, 0.05);
        session.update(1.0 / 60.0);
        assert!(!session.balls()[3].alive);

        session.on_press_start(0.0, 0.0);
        launch(&mut session, PLAYER_BALL, Vec2::new(-7.1, -3.6), Vec2::new(-1.0, -1.0).normalize(), 0.1);
        launch(&mut session, 2, Vec2::new(2.0, 2.0), Vec2::Y, 0.3);
        session.update(1.0 / 60.0);

        let layout = TableLayout::CLASSIC;
        for (slot, start) in session.balls().iter().zip(layout.ball_starts) {
            assert_eq!(slot.position, start);
            assert_eq!(slot.impulse, 0.0);
            assert_eq!(slot.direction, Vec2::ZERO);
            assert!(slot.alive);
        }
        assert!(!session.shot().is_charging());
        assert!(!session.is_moving());

        let scene = session.scene();
        assert_eq!(scene.live_count(MeshKind::Ball), BALL_COUNT);
        assert_eq!(scene.live_count(MeshKind::Pocket), POCKET_COUNT);
        for (i, start) in layout.ball_starts.iter().enumerate() {
            let mesh = session.ball_mesh(i).unwrap();
            assert_eq!(scene.mesh(*mesh).unwrap().position, *start);
        }

        let events = session.drain_events();
        assert!(events.contains(&SimEvent::PlayerPocketed { pocket: 0 }));
    }

    #[test]
    fn test_reinit_does_not_leak_meshes() {
        let mut session = session();
        session.init();
        assert_eq!(session.scene().live_count(MeshKind::Ball), BALL_COUNT);
        assert_eq!(session.scene().live_count(MeshKind::Pocket), POCKET_COUNT);
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = session();
        let json = serde_json::to_string(&session.snapshot()).unwrap();
        let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session.snapshot());
    }

    #[test]
    fn test_shot_after_deinit_is_ignored() {
        let mut session =
            SimulationSession::new(RecordingScene::new(), TableLayout::CLASSIC, Tuning::default());
        session.init();
        session.deinit();
        session.on_press_start(0.0, 0.0);
        session.on_press_released(1.0, 1.0);
        assert_eq!(session.balls().player().impulse, 0.0);
        session.update(1.0);
        assert!(!session.is_moving());
    }
}
