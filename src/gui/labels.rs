use std::path::PathBuf;
use std::rc::Rc;

use kiss3d::camera::Camera;
use kiss3d::text::Font;
use kiss3d::window::Window;
use nalgebra::Point3;
use tracing::{info, warn};

use super::camera::OrbitCamera;
use crate::assets::{load_font, AssetPoll, PendingAsset};
use crate::config::LabelConfig;
use crate::error::AssetError;
use crate::math::geometry::project_to_screen;
use crate::model::labels::{orbit_labels, LabelSet};
use crate::model::Registry;

struct PendingFont {
    path: PathBuf,
    asset: PendingAsset<Vec<u8>>,
}

/// Planet name tags. They only show up once their font has loaded; if it never loads, they
/// never show up.
pub struct LabelLayer {
    labels: LabelSet<Rc<Font>>,
    pending: Option<PendingFont>,
    scale: f32,
    color: Point3<f32>,
    visible: bool,
}

impl LabelLayer {
    pub fn new(config: &LabelConfig, registry: &Registry) -> Self {
        let mut layer = LabelLayer {
            labels: LabelSet::new(orbit_labels(registry, config.height_offset)),
            pending: None,
            scale: config.scale,
            color: Point3::new(1.0, 1.0, 1.0),
            visible: config.enabled,
        };

        if config.enabled {
            match &config.font_path {
                Some(path) => {
                    layer.pending = Some(PendingFont {
                        path: path.clone(),
                        asset: load_font(path.clone()),
                    })
                }
                None => layer.attach(Font::default()),
            }
        }
        layer
    }

    fn attach(&mut self, font: Rc<Font>) {
        if !self.labels.attach(font) {
            warn!("labels already attached, ignoring new font");
            return;
        }
        if let Some((_, labels)) = self.labels.ready() {
            info!(count = labels.len(), "attached labels");
        }
    }

    /// Picks up the font if it has finished loading. Cheap to call every frame.
    pub fn poll(&mut self) {
        let result = match &mut self.pending {
            Some(pending) => pending.asset.poll(),
            None => return,
        };

        let path = match result {
            AssetPoll::Pending => return,
            _ => match self.pending.take() {
                Some(pending) => pending.path,
                None => return,
            },
        };

        match result {
            AssetPoll::Ready(bytes) => match Font::from_bytes(&bytes) {
                Some(font) => self.attach(font),
                None => {
                    let err = AssetError::Decode {
                        path,
                        kind: "font",
                    };
                    warn!(error = %err, "labels disabled");
                }
            },
            AssetPoll::Failed(err) => warn!(error = %err, "labels disabled"),
            AssetPoll::Pending | AssetPoll::Taken => {}
        }
    }

    pub fn is_attached(&self) -> bool {
        self.labels.is_attached()
    }

    /// Whether a font load is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn draw(&self, window: &mut Window, camera: &OrbitCamera) {
        if !self.visible {
            return;
        }
        let (font, labels) = match self.labels.ready() {
            Some(ready) => ready,
            None => return,
        };

        let transformation = camera.transformation();
        let (width, height) = (camera.width() as f32, camera.height() as f32);
        for label in labels {
            let anchor: Point3<f32> = nalgebra::convert(label.anchor);
            if let Some(pos) = project_to_screen(&transformation, &anchor, width, height) {
                window.draw_text(&label.text, &pos, self.scale, font, &self.color);
            }
        }
    }
}
