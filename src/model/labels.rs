use nalgebra::Point3;

use super::registry::Registry;

/// A name tag pinned to a fixed point in space.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub anchor: Point3<f64>,
}

/// Labels for every top-level body, each hovering `height` above the point where the body's
/// orbit crosses the positive x-axis. They mark the orbit, not the body, so they don't move.
pub fn orbit_labels(registry: &Registry, height: f64) -> Vec<Label> {
    registry
        .top_level()
        .map(|body| Label {
            text: body.info.name.clone(),
            anchor: Point3::new(body.orbit.distance, height, 0.0),
        })
        .collect()
}

/// A set of labels that can only be drawn once their font shows up.
///
/// The font arrives at most once; later arrivals are ignored.
#[derive(Debug)]
pub struct LabelSet<F> {
    labels: Vec<Label>,
    font: Option<F>,
}

impl<F> LabelSet<F> {
    pub fn new(labels: Vec<Label>) -> Self {
        LabelSet { labels, font: None }
    }

    /// Attaches the font. Returns `false` (and drops `font`) if one was already attached.
    pub fn attach(&mut self, font: F) -> bool {
        if self.font.is_some() {
            return false;
        }
        self.font = Some(font);
        true
    }

    pub fn is_attached(&self) -> bool {
        self.font.is_some()
    }

    /// The labels and their font, or `None` if the font hasn't arrived.
    pub fn ready(&self) -> Option<(&F, &[Label])> {
        self.font.as_ref().map(|font| (font, self.labels.as_slice()))
    }
}
