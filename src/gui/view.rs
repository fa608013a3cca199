use std::collections::HashMap;
use std::rc::Rc;

use kiss3d::scene::SceneNode;
use kiss3d::text::Font;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3, Translation3, Vector3};

use super::camera::OrbitCamera;
use super::controller::Controller;
use super::labels::LabelLayer;
use super::renderers::{generate_starfield, Overlay};
use crate::config::{parse_color, Config};
use crate::error::ConfigError;
use crate::model::{BodyID, CelestialBody, Registry};

const HUD_TEXT_SCALE: f32 = 40.0;

pub struct View {
    // Scene graph handles
    orbit_nodes: HashMap<BodyID, SceneNode>,
    // Camera
    camera: OrbitCamera,
    // Misc
    overlay: Overlay,
    labels: LabelLayer,
    show_orbits: bool,
    show_fps: bool,
    hud_font: Rc<Font>,
}

impl View {
    pub fn new(
        config: &Config,
        registry: &Registry,
        window: &mut Window,
    ) -> Result<Self, ConfigError> {
        let camera = OrbitCamera::new(&config.camera, window.width(), window.height());

        // The sun doesn't orbit anything, so it stays out of the registry
        let mut sun = window.add_sphere(config.scene.sun.size);
        let sun_color = parse_color(&config.scene.sun.color)?;
        sun.set_color(sun_color.x, sun_color.y, sun_color.z);

        // Parents are always created before their moons, so the parent's sphere is there
        // by the time we get to a moon
        let mut orbit_nodes = HashMap::new();
        let mut body_spheres = HashMap::new();
        for body in registry.bodies() {
            let mut orbit = match body.parent() {
                Some(parent) => body_spheres
                    .get_mut(&parent)
                    .map(SceneNode::add_group)
                    .unwrap_or_else(|| window.add_group()),
                None => window.add_group(),
            };
            let sphere = Self::create_body_object(&mut orbit, body);
            orbit_nodes.insert(body.id, orbit);
            body_spheres.insert(body.id, sphere);
        }

        Self::create_asteroid_belt(window, registry, config)?;

        let stars = generate_starfield(
            config.scene.seed,
            config.scene.starfield.count,
            config.scene.starfield.radius,
        );

        let mut view = Self {
            orbit_nodes,
            camera,
            overlay: Overlay::new(stars),
            labels: LabelLayer::new(&config.labels, registry),
            show_orbits: config.scene.show_orbits,
            show_fps: config.debug.show_fps,
            hud_font: Font::default(),
        };
        view.update_scene_objects(registry);

        Ok(view)
    }

    fn create_body_object(orbit: &mut SceneNode, body: &CelestialBody) -> SceneNode {
        // Make the sphere that represents the body
        let mut sphere = orbit.add_sphere(body.info.size);
        let color = &body.info.color;
        sphere.set_color(color.x, color.y, color.z);
        sphere
    }

    fn create_asteroid_belt(
        window: &mut Window,
        registry: &Registry,
        config: &Config,
    ) -> Result<(), ConfigError> {
        let color = parse_color(&config.scene.belt.color)?;
        let mut belt = window.add_group();
        for asteroid in registry.asteroids() {
            let position: Point3<f32> = nalgebra::convert(asteroid.position);
            let mut rock = belt.add_sphere(config.scene.belt.asteroid_size);
            rock.set_color(color.x, color.y, color.z);
            rock.set_local_translation(Translation3::from(position.coords));
        }
        Ok(())
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn toggle_labels(&mut self) {
        self.labels.toggle();
    }

    pub fn toggle_orbits(&mut self) {
        self.show_orbits = !self.show_orbits;
    }

    /// Moves every orbit node to its body's current offset. Moons are children of their
    /// parent's sphere, so the scene graph does the composition.
    pub fn update_scene_objects(&mut self, registry: &Registry) {
        for (id, node) in self.orbit_nodes.iter_mut() {
            let offset: Vector3<f32> = nalgebra::convert(registry.get_body(*id).local_position());
            node.set_local_translation(Translation3::from(offset));
        }
    }

    pub fn prerender_scene(
        &mut self,
        window: &mut Window,
        registry: &Registry,
        controller: &Controller,
    ) {
        self.overlay.draw_starfield(window);
        if self.show_orbits {
            self.draw_orbits(window, registry);
        }

        self.labels.poll();
        self.labels.draw(window, &self.camera);

        if self.show_fps {
            window.draw_text(
                &self.hud_text(controller),
                &Point2::origin(),
                HUD_TEXT_SCALE,
                &self.hud_font,
                &Point3::new(1.0, 1.0, 1.0),
            );
        }
    }

    fn draw_orbits(&self, window: &mut Window, registry: &Registry) {
        for body in registry.bodies() {
            let center: Point3<f32> = nalgebra::convert(registry.orbit_center(body.id));
            self.overlay.draw_orbit_ring(
                window,
                center,
                body.orbit.distance as f32,
                body.info.color,
            );
        }
    }

    fn hud_text(&self, controller: &Controller) -> String {
        format!(
            "Frame: {}
FPS: {:.0}
[L] labels  [O] orbits  [Q] quit",
            controller.frames(),
            controller.fps(),
        )
    }
}
