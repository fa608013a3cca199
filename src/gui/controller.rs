use std::time::Instant;

use kiss3d::event::{Action, Event, Key, WindowEvent};
use tracing::info;

use super::view::View;
use crate::model::CancellationToken;

// Key config, all in one place. Camera keys live with the camera.
const KEY_TOGGLE_LABELS: Key = Key::L;
const KEY_TOGGLE_ORBITS: Key = Key::O;
const KEY_QUIT: Key = Key::Q;

pub struct Controller {
    cancel: CancellationToken,
    frames: u64,
    fps_counter: FpsCounter,
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn reset(&mut self) {
        self.instant = Instant::now();
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    pub fn increment(&mut self) {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.reset();
        }
    }
}

impl Controller {
    pub fn new(cancel: CancellationToken) -> Self {
        Controller {
            cancel,
            frames: 0,
            fps_counter: FpsCounter::new(1000),
        }
    }

    pub fn process_event(&mut self, event: Event, view: &mut View) {
        match event.value {
            WindowEvent::Key(KEY_TOGGLE_LABELS, Action::Press, _) => {
                view.toggle_labels();
            }
            WindowEvent::Key(KEY_TOGGLE_ORBITS, Action::Press, _) => {
                view.toggle_orbits();
            }
            WindowEvent::Key(KEY_QUIT, Action::Press, _) => {
                info!("quit requested");
                self.cancel.cancel();
            }
            _ => {}
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self) {
        self.frames += 1;
        self.fps_counter.increment()
    }
}
