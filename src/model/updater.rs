//! Advances the orbits one frame at a time and drives the frame loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use super::registry::Registry;

/// Moves every body one frame along its orbit. Asteroids don't move.
///
/// Bodies don't depend on each other, so the order doesn't matter. A moon's position is an
/// offset from its parent, so it comes out right no matter where the parent ends up.
pub fn step(registry: &mut Registry) {
    for body in registry.bodies_mut() {
        body.advance();
    }
}

/// A shared flag for stopping [`run`] from outside the loop.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunLimit {
    Steps(u64),
    UntilCancelled,
}

/// What the host reports back after drawing a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    /// The window (or whatever is presenting frames) is gone.
    HostClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    StepLimit,
    Cancelled,
    HostClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: u64,
    pub reason: StopReason,
}

/// Something that can draw the current state of the system.
pub trait FrameRenderer {
    fn render_frame(&mut self, registry: &Registry) -> FrameOutcome;
}

impl<F> FrameRenderer for F
where
    F: FnMut(&Registry) -> FrameOutcome,
{
    fn render_frame(&mut self, registry: &Registry) -> FrameOutcome {
        self(registry)
    }
}

/// Runs the update-then-render loop until the limit is hit, the token is cancelled, or the
/// renderer reports that its host has gone away.
///
/// The token is checked before every step, so a cancelled token stops the loop before the next
/// frame, never in the middle of one.
pub fn run<R: FrameRenderer + ?Sized>(
    registry: &mut Registry,
    renderer: &mut R,
    limit: RunLimit,
    cancel: &CancellationToken,
) -> RunSummary {
    let mut steps = 0;
    let reason = loop {
        if cancel.is_cancelled() {
            break StopReason::Cancelled;
        }
        if let RunLimit::Steps(max_steps) = limit {
            if steps >= max_steps {
                break StopReason::StepLimit;
            }
        }

        step(registry);
        steps += 1;

        if renderer.render_frame(registry) == FrameOutcome::HostClosed {
            break StopReason::HostClosed;
        }
    };

    debug!(steps, reason = ?reason, "frame loop finished");
    RunSummary { steps, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::body::rgb_from_hex;

    fn small_system() -> Registry {
        let mut registry = Registry::seeded(11);
        let earth = registry.create_body("Earth", 8.0, 130.0, rgb_from_hex(0x3399ff), 0.001);
        registry.create_body("Pluto", 3.0, 410.0, rgb_from_hex(0xbbbbbb), 0.00005);
        registry.create_body("Retro", 3.0, 50.0, rgb_from_hex(0xffffff), -0.02);
        registry.create_moon(earth, "Moon", 1.0, 12.0, rgb_from_hex(0xcccccc), 0.03);
        registry.add_asteroid_belt(190.0, 215.0, 25);
        registry
    }

    #[test]
    fn test_angles_accumulate_speed() {
        let mut registry = small_system();
        let initial: Vec<_> = registry.bodies().map(|b| b.angle()).collect();

        let k = 500;
        for _ in 0..k {
            step(&mut registry);
        }

        for (body, angle0) in registry.bodies().zip(initial) {
            approx::assert_relative_eq!(
                body.angle(),
                angle0 + k as f64 * body.orbit.speed,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_orbits_stay_circular() {
        let mut registry = small_system();
        for _ in 0..100 {
            step(&mut registry);
            for body in registry.bodies() {
                let p = body.local_position();
                assert_eq!(p.y, 0.0);
                approx::assert_relative_eq!(
                    p.x * p.x + p.z * p.z,
                    body.orbit.distance * body.orbit.distance,
                    max_relative = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_asteroids_do_not_move() {
        let mut registry = small_system();
        let before = registry.asteroids().to_vec();
        for _ in 0..10 {
            step(&mut registry);
        }
        assert_eq!(registry.asteroids(), &before[..]);
    }

    #[test]
    fn test_run_step_limit() {
        let mut registry = small_system();
        let mut frames = 0;
        let mut renderer = |_: &Registry| {
            frames += 1;
            FrameOutcome::Continue
        };

        let summary = run(
            &mut registry,
            &mut renderer,
            RunLimit::Steps(30),
            &CancellationToken::new(),
        );
        assert_eq!(
            summary,
            RunSummary {
                steps: 30,
                reason: StopReason::StepLimit
            }
        );
        assert_eq!(frames, 30);
    }

    #[test]
    fn test_run_zero_steps() {
        let mut registry = small_system();
        let before: Vec<_> = registry.bodies().map(|b| b.angle()).collect();
        let mut renderer = |_: &Registry| -> FrameOutcome { panic!("should not render") };

        let summary = run(
            &mut registry,
            &mut renderer,
            RunLimit::Steps(0),
            &CancellationToken::new(),
        );
        assert_eq!(summary.steps, 0);
        assert_eq!(summary.reason, StopReason::StepLimit);

        let after: Vec<_> = registry.bodies().map(|b| b.angle()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_run_until_cancelled() {
        let mut registry = small_system();
        let cancel = CancellationToken::new();
        let handle = cancel.clone();
        let mut frames = 0u64;
        let mut renderer = |_: &Registry| {
            frames += 1;
            if frames == 12 {
                handle.cancel();
            }
            FrameOutcome::Continue
        };

        let summary = run(&mut registry, &mut renderer, RunLimit::UntilCancelled, &cancel);
        assert_eq!(summary.steps, 12);
        assert_eq!(summary.reason, StopReason::Cancelled);
    }

    #[test]
    fn test_run_already_cancelled() {
        let mut registry = small_system();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let mut renderer = |_: &Registry| FrameOutcome::Continue;
        let summary = run(&mut registry, &mut renderer, RunLimit::Steps(5), &cancel);
        assert_eq!(summary.steps, 0);
        assert_eq!(summary.reason, StopReason::Cancelled);
    }

    #[test]
    fn test_run_host_closed() {
        let mut registry = small_system();
        let mut frames = 0;
        let mut renderer = |_: &Registry| {
            frames += 1;
            if frames < 4 {
                FrameOutcome::Continue
            } else {
                FrameOutcome::HostClosed
            }
        };

        let summary = run(
            &mut registry,
            &mut renderer,
            RunLimit::UntilCancelled,
            &CancellationToken::new(),
        );
        assert_eq!(summary.steps, 4);
        assert_eq!(summary.reason, StopReason::HostClosed);
    }
}
