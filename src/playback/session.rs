use std::collections::VecDeque;
use std::time::Instant;

use log::{debug, info};

use crate::data::Trajectory;
use crate::playback::clock::Clock;
use crate::playback::controller::{PlayState, PlaybackController, PlaybackOptions, PlaybackState, Redraw};
use crate::plot::types::RenderCommand;
use crate::tui::scrub::{ScrubControl, ScrubOrigin};

/// The three inputs of the playback machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    ClockTick,
    Scrub(f64),
    Toggle,
}

/// Single event queue in front of the playback controller.
///
/// Events are handled strictly one at a time, each to completion (render
/// included) before the next is taken off the queue.
pub struct Session {
    controller: PlaybackController,
    clock: Clock,
    scrub: ScrubControl,
    queue: VecDeque<SessionEvent>,
    frame: RenderCommand,
}

impl Session {
    /// Start a session at frame 0, playing, with the clock running from `now`.
    pub fn start(trajectory: Trajectory, options: &PlaybackOptions, mut clock: Clock, now: Instant) -> Self {
        let scrub = ScrubControl::new(trajectory.times());
        let controller = PlaybackController::new(trajectory, options);
        let frame = controller.current();
        clock.start(now);
        info!(
            "session started: {} frames, trail {}, tick {:?}, scrub tolerance {:e}",
            controller.trajectory().len(),
            controller.trail_length(),
            clock.interval(),
            controller.tolerance()
        );
        Self {
            controller,
            clock,
            scrub,
            queue: VecDeque::new(),
            frame,
        }
    }

    /// Throw away all playback state and begin again from frame 0, playing.
    pub fn restart(&mut self, now: Instant) {
        self.queue.clear();
        self.controller.reset();
        self.scrub = ScrubControl::new(self.controller.trajectory().times());
        self.clock.stop();
        self.clock.start(now);
        self.refresh();
        info!("session restarted");
    }

    pub fn push(&mut self, event: SessionEvent) {
        self.queue.push_back(event);
    }

    /// Queue a clock tick if one is due.
    pub fn poll_clock(&mut self, now: Instant) {
        if self.clock.poll(now) {
            self.push(SessionEvent::ClockTick);
        }
    }

    /// Handle every queued event in order; returns true if the frame changed.
    pub fn drain(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while let Some(event) = self.queue.pop_front() {
            changed |= self.handle(event, now);
        }
        changed
    }

    fn handle(&mut self, event: SessionEvent, now: Instant) -> bool {
        match event {
            SessionEvent::ClockTick => match self.controller.on_tick() {
                Some(redraw) => {
                    self.apply(redraw);
                    true
                }
                None => false,
            },
            SessionEvent::Scrub(value) => {
                let redraw = self.controller.on_scrub(value);
                self.apply(redraw);
                true
            }
            SessionEvent::Toggle => {
                match self.controller.on_toggle() {
                    PlayState::Playing => self.clock.start(now),
                    PlayState::Paused => self.clock.stop(),
                }
                debug!("clock running: {}", self.clock.is_running());
                true
            }
        }
    }

    fn apply(&mut self, redraw: Redraw) {
        if let Some(t) = redraw.scrub_sync {
            // programmatic: never loops back as a Scrub event
            let echo = self.scrub.set(t, ScrubOrigin::Programmatic);
            debug_assert!(echo.is_none());
        }
        self.frame = redraw.command;
    }

    /// Re-render the current frame (e.g. after a resize).
    pub fn refresh(&mut self) {
        self.frame = self.controller.current();
    }

    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    pub fn frame(&self) -> &RenderCommand {
        &self.frame
    }

    pub fn scrub(&self) -> &ScrubControl {
        &self.scrub
    }

    /// Mutable access for input adapters; user moves return the event to push.
    pub fn scrub_mut(&mut self) -> &mut ScrubControl {
        &mut self.scrub
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn trajectory(&self) -> &Trajectory {
        self.controller.trajectory()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
