//! Mount points that hold the chart currently shown on each of them.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::errors::Error;
use crate::input::PlotInput;
use crate::scene::Scene;

/// Drawing targets keyed by mount identifier (`"#svg"`, ...).
///
/// Drawing replaces whatever was mounted before, so repeating a draw with
/// the same input leaves exactly one chart. A draw that fails leaves the
/// mount untouched.
#[derive(Debug, Default)]
pub struct Surface {
    mounts: BTreeMap<String, Scene>,
}

impl Surface {
    pub fn new() -> Self {
        Surface::default()
    }

    /// Parse, render and mount a JSON document.
    pub fn draw(&mut self, source: &str) -> Result<&Scene, Error> {
        let input = PlotInput::from_json(source)?;
        self.draw_input(&input)
    }

    /// Render and mount an already validated request.
    pub fn draw_input(&mut self, input: &PlotInput) -> Result<&Scene, Error> {
        let scene = crate::render::render(input)?;
        Ok(self.attach(scene))
    }

    /// Mount `scene` on its own mount node, replacing the previous chart.
    pub fn attach(&mut self, scene: Scene) -> &Scene {
        match self.mounts.entry(scene.mount_node.clone()) {
            Entry::Occupied(mut slot) => {
                crate::log::debug!(mount = %slot.key(), "replacing mounted chart");
                slot.insert(scene);
                slot.into_mut()
            }
            Entry::Vacant(slot) => {
                crate::log::debug!(mount = %slot.key(), "mounting chart");
                slot.insert(scene)
            }
        }
    }

    pub fn get(&self, mount: &str) -> Option<&Scene> {
        self.mounts.get(mount)
    }

    /// Remove the chart on `mount`, returning it.
    pub fn clear(&mut self, mount: &str) -> Option<Scene> {
        self.mounts.remove(mount)
    }

    /// Number of mounts currently showing a chart.
    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }
}
