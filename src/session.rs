//! Jumper session: run state machine and frame loop
//!
//! ```text
//! NotStarted --start--> Running <--pause/resume--> Paused
//!                          |
//!                      collision
//!                          v
//!                        Ended --restart--> Running
//! ```
//!
//! The session owns its world and decides, once per frame, whether another
//! animation frame is needed. The host only forwards callbacks, input and
//! visibility changes; anything invalid for the current state is ignored.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::platform::input::Command;
use crate::renderer::{FrameView, RenderSurface, draw_frame};
use crate::sim::{RunState, StepOutcome, Viewport, World, step};
use crate::tuning::Tuning;

/// Identifier of a requested animation frame
pub type FrameHandle = i32;

/// Source of "call me on the next display refresh" callbacks
pub trait FrameScheduler {
    /// Ask for one callback; the host later calls [`Session::frame`]
    fn request_frame(&mut self) -> FrameHandle;

    /// Drop a pending request
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler driven by hand (tests, headless runs)
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_handle: FrameHandle,
    pending: Option<FrameHandle>,
    /// Total requests made
    pub requested: u32,
    /// Total cancellations made
    pub cancelled: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The outstanding request, if any
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Consume the outstanding request (the callback "fires")
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_handle += 1;
        self.pending = Some(self.next_handle);
        self.requested += 1;
        self.next_handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled += 1;
    }
}

/// Notifications for the UI around the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    /// Displayed score changed
    ScoreChanged(u32),
    /// Run ended; show the restart affordance
    Ended { score: u32 },
}

/// One independent game of GeometryJumper
pub struct Session<S: FrameScheduler> {
    tuning: Tuning,
    viewport: Viewport,
    world: World,
    run_state: RunState,
    rng: Pcg32,
    /// Timestamp (ms) of the last stepped frame, or of the last start/resume
    last_frame_time: f64,
    /// Outstanding animation-frame request
    scheduled: Option<FrameHandle>,
    scheduler: S,
    events: Vec<GameEvent>,
}

impl<S: FrameScheduler> Session<S> {
    pub fn new(tuning: Tuning, viewport: Viewport, seed: u64, scheduler: S) -> Self {
        let world = World::new(&tuning, &viewport);
        Self {
            tuning,
            viewport,
            world,
            run_state: RunState::NotStarted,
            rng: Pcg32::seed_from_u64(seed),
            last_frame_time: 0.0,
            scheduled: None,
            scheduler,
            events: Vec::new(),
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn score(&self) -> u32 {
        self.world.score.score()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Whether an animation frame is currently requested
    pub fn is_frame_scheduled(&self) -> bool {
        self.scheduled.is_some()
    }

    /// Take the notifications produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only snapshot for drawing
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            world: &self.world,
            tuning: &self.tuning,
            viewport: self.viewport,
            run_state: self.run_state,
        }
    }

    pub fn render<R: RenderSurface + ?Sized>(&self, surface: &mut R) {
        draw_frame(&self.view(), surface);
    }

    /// Begin a run (from NotStarted or Ended)
    pub fn start(&mut self, now: f64) {
        match self.run_state {
            RunState::NotStarted | RunState::Ended => {
                self.reset();
                self.run_state = RunState::Running;
                self.last_frame_time = now;
                self.events.push(GameEvent::Started);
                self.schedule();
                log::info!("Run started");
            }
            state => log::debug!("start ignored in {:?}", state),
        }
    }

    /// Start over after a game over
    pub fn restart(&mut self, now: f64) {
        self.start(now);
    }

    /// Jump if running and on the ground
    pub fn jump(&mut self) {
        if self.run_state == RunState::Running {
            self.world.player.jump(self.tuning.jump_force);
        }
    }

    /// Suspend a running game and draw the paused overlay
    pub fn pause<R: RenderSurface + ?Sized>(&mut self, surface: &mut R) {
        if self.run_state != RunState::Running {
            log::debug!("pause ignored in {:?}", self.run_state);
            return;
        }
        self.cancel_scheduled();
        self.run_state = RunState::Paused;
        self.events.push(GameEvent::Paused);
        self.render(surface);
        log::info!("Paused at distance {:.0}", self.world.distance());
    }

    /// Continue a paused game
    pub fn resume(&mut self, now: f64) {
        if self.run_state != RunState::Paused {
            log::debug!("resume ignored in {:?}", self.run_state);
            return;
        }
        self.run_state = RunState::Running;
        // Measure the next delta from now, not from before the pause
        self.last_frame_time = now;
        self.events.push(GameEvent::Resumed);
        self.schedule();
        log::info!("Resumed");
    }

    pub fn toggle_pause<R: RenderSurface + ?Sized>(&mut self, now: f64, surface: &mut R) {
        match self.run_state {
            RunState::Running => self.pause(surface),
            RunState::Paused => self.resume(now),
            state => log::debug!("pause toggle ignored in {:?}", state),
        }
    }

    /// Page visibility changed; hiding pauses, showing never auto-resumes
    pub fn visibility_changed<R: RenderSurface + ?Sized>(&mut self, hidden: bool, surface: &mut R) {
        if hidden {
            if self.run_state == RunState::Running {
                log::info!("Auto-paused (page hidden)");
                self.pause(surface);
            }
        } else if self.run_state == RunState::Paused {
            self.render(surface);
        }
    }

    /// Apply a new drawing area
    pub fn resize<R: RenderSurface + ?Sized>(&mut self, viewport: Viewport, surface: &mut R) {
        let old = std::mem::replace(&mut self.viewport, viewport);
        match self.run_state {
            RunState::NotStarted | RunState::Ended => {
                self.world.settle_player(&self.tuning, &self.viewport);
            }
            RunState::Running | RunState::Paused => {
                self.world.refit(&self.tuning, &old, &self.viewport);
            }
        }
        if self.run_state != RunState::Running {
            self.render(surface);
        }
    }

    /// Dispatch an input command
    pub fn command<R: RenderSurface + ?Sized>(&mut self, command: Command, now: f64, surface: &mut R) {
        match command {
            Command::Jump => self.jump(),
            Command::PauseToggle => self.toggle_pause(now, surface),
            Command::Start => self.start(now),
            Command::Restart => self.restart(now),
        }
    }

    /// Animation-frame callback: step, draw, then reschedule or finish
    pub fn frame<R: RenderSurface + ?Sized>(&mut self, timestamp: f64, surface: &mut R) {
        // This request has fired
        self.scheduled = None;

        if self.run_state != RunState::Running {
            log::trace!("Stray frame ignored in {:?}", self.run_state);
            return;
        }

        let delta = (timestamp - self.last_frame_time).clamp(0.0, self.tuning.max_frame_delta_ms);
        self.last_frame_time = timestamp;

        self.step(delta);
        self.render(surface);

        if self.run_state == RunState::Running {
            self.schedule();
        }
    }

    /// Advance the world by `delta_ms`; does nothing unless running
    pub fn step(&mut self, delta_ms: f64) -> Option<StepOutcome> {
        if self.run_state != RunState::Running {
            return None;
        }

        let outcome = step(
            &mut self.world,
            &self.tuning,
            &self.viewport,
            &mut self.rng,
            delta_ms,
        );

        if let Some(score) = outcome.score_changed {
            self.events.push(GameEvent::ScoreChanged(score));
        }
        if outcome.collided {
            self.end();
        }
        Some(outcome)
    }

    fn end(&mut self) {
        self.cancel_scheduled();
        self.run_state = RunState::Ended;
        let score = self.score();
        self.events.push(GameEvent::Ended { score });
        log::info!("Game over: score {} (distance {:.0})", score, self.world.distance());
    }

    fn reset(&mut self) {
        let previous = self.score();
        self.world = World::new(&self.tuning, &self.viewport);
        if previous != 0 {
            self.events.push(GameEvent::ScoreChanged(0));
        }
    }

    fn schedule(&mut self) {
        self.cancel_scheduled();
        self.scheduled = Some(self.scheduler.request_frame());
    }

    fn cancel_scheduled(&mut self) {
        if let Some(handle) = self.scheduled.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}
