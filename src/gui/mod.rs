use kiss3d::light::Light;
use kiss3d::window::Window;
use nalgebra::Point3;

use self::controller::Controller;
use self::view::View;
use crate::config::{parse_color, Config};
use crate::error::ConfigError;
use crate::model::{CancellationToken, FrameOutcome, FrameRenderer, Registry};

mod camera;
mod controller;
mod labels;
mod renderers;
mod view;

pub use camera::OrbitCamera;

/// The window and everything drawn in it. Hand it to [`crate::model::run`] to animate.
pub struct Simulation {
    window: Window,
    view: View,
    controller: Controller,
}

impl Simulation {
    pub fn new(
        config: &Config,
        registry: &Registry,
        cancel: CancellationToken,
    ) -> Result<Self, ConfigError> {
        let mut window = Window::new_with_size(
            &config.window.title,
            config.window.width,
            config.window.height,
        );
        // Point light in the middle of the sun
        window.set_light(Light::Absolute(Point3::origin()));
        window.set_framerate_limit(config.window.framerate_limit);
        let background = parse_color(&config.window.background)?;
        window.set_background_color(background.x, background.y, background.z);

        let view = View::new(config, registry, &mut window)?;

        Ok(Self {
            window,
            view,
            controller: Controller::new(cancel),
        })
    }

    fn process_user_input(&mut self) {
        // Process events
        let mut events = self.window.events();
        for event in events.iter() {
            self.controller.process_event(event, &mut self.view);
        }
    }
}

impl FrameRenderer for Simulation {
    fn render_frame(&mut self, registry: &Registry) -> FrameOutcome {
        self.process_user_input();
        self.view.update_scene_objects(registry);
        self.view
            .prerender_scene(&mut self.window, registry, &self.controller);
        self.controller.increment_frame_counter();

        // The camera also sees the events, including resizes
        if self.window.render_with_camera(self.view.camera_mut()) {
            FrameOutcome::Continue
        } else {
            FrameOutcome::HostClosed
        }
    }
}
