//! Level Geometry
//!
//! A [`Level`] owns the static collision layers, the optional door layer and
//! the keycard pickup. Layers built on another thread arrive through a
//! channel ([`GeometrySender`]) and are committed between ticks, so the set
//! of indices never changes while a tick is running.
//!
//! # Example
//!
//! ```rust,ignore
//! use fps_rig_engine::physics::{Octree, TriangleMesh};
//! use fps_rig_engine::world::Level;
//!
//! let mut level = Level::new();
//! let sender = level.geometry_sender();
//! std::thread::spawn(move || {
//!     let mesh = build_terrain();
//!     sender.send("terrain", Octree::from_mesh(&mesh)).ok();
//! });
//!
//! // between ticks
//! level.commit_pending();
//! ```

use std::sync::mpsc::{Receiver, Sender, channel};

use glam::Vec3;
use tracing::{debug, info};

use super::interaction::InteractionState;
use crate::physics::{RayHit, SpatialIndex};

/// Errors raised while streaming geometry into a level.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("level was dropped before geometry layer `{0}` arrived")]
    Closed(String),
}

/// One named collision layer.
#[derive(Debug)]
pub struct GeometryLayer {
    pub name: String,
    pub index: Box<dyn SpatialIndex>,
}

impl GeometryLayer {
    pub fn new(name: impl Into<String>, index: impl SpatialIndex + 'static) -> Self {
        Self {
            name: name.into(),
            index: Box::new(index),
        }
    }
}

/// Cloneable handle for delivering layers from loader threads.
#[derive(Debug, Clone)]
pub struct GeometrySender {
    tx: Sender<GeometryLayer>,
}

impl GeometrySender {
    /// Queue a fully built layer. It becomes active on the next
    /// [`Level::commit_pending`].
    pub fn send(
        &self,
        name: impl Into<String>,
        index: impl SpatialIndex + 'static,
    ) -> Result<(), LevelError> {
        let layer = GeometryLayer::new(name, index);
        self.tx
            .send(layer)
            .map_err(|err| LevelError::Closed(err.0.name))
    }
}

/// Static world geometry plus the door and keycard.
#[derive(Debug)]
pub struct Level {
    layers: Vec<GeometryLayer>,
    door: Option<GeometryLayer>,
    keycard: Option<Vec3>,
    tx: Sender<GeometryLayer>,
    rx: Receiver<GeometryLayer>,
}

impl Default for Level {
    fn default() -> Self {
        Self::new()
    }
}

impl Level {
    /// An empty level. With no layers nothing collides.
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            layers: Vec::new(),
            door: None,
            keycard: None,
            tx,
            rx,
        }
    }

    /// Add a static layer immediately.
    pub fn add_layer(&mut self, name: impl Into<String>, index: impl SpatialIndex + 'static) {
        let layer = GeometryLayer::new(name, index);
        debug!(
            layer = %layer.name,
            triangles = layer.index.triangle_count(),
            "added geometry layer"
        );
        self.layers.push(layer);
    }

    /// Install the door geometry. It collides only while the door is closed.
    pub fn set_door(&mut self, index: impl SpatialIndex + 'static) {
        self.door = Some(GeometryLayer::new("door", index));
    }

    pub fn set_keycard(&mut self, position: Vec3) {
        self.keycard = Some(position);
    }

    #[inline]
    pub fn keycard(&self) -> Option<Vec3> {
        self.keycard
    }

    #[inline]
    pub fn door(&self) -> Option<&dyn SpatialIndex> {
        self.door.as_ref().map(|layer| &*layer.index)
    }

    pub fn layers(&self) -> &[GeometryLayer] {
        &self.layers
    }

    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|layer| layer.name.as_str())
    }

    /// Total triangle count over static layers and the door.
    pub fn triangle_count(&self) -> usize {
        self.layers
            .iter()
            .chain(self.door.iter())
            .map(|layer| layer.index.triangle_count())
            .sum()
    }

    /// Handle for streaming layers in from other threads.
    pub fn geometry_sender(&self) -> GeometrySender {
        GeometrySender {
            tx: self.tx.clone(),
        }
    }

    /// Activate every layer that has arrived since the last call.
    ///
    /// # Returns
    /// Number of layers committed
    pub fn commit_pending(&mut self) -> usize {
        let mut committed = 0;
        while let Ok(layer) = self.rx.try_recv() {
            info!(
                layer = %layer.name,
                triangles = layer.index.triangle_count(),
                "streamed geometry layer committed"
            );
            self.layers.push(layer);
            committed += 1;
        }
        committed
    }

    /// Indices that take part in collision for the current door state.
    pub fn active_indices(&self, interaction: &InteractionState) -> Vec<&dyn SpatialIndex> {
        let mut indices: Vec<&dyn SpatialIndex> =
            self.layers.iter().map(|layer| &*layer.index).collect();
        if !interaction.is_door_open() {
            if let Some(door) = self.door() {
                indices.push(door);
            }
        }
        indices
    }

    /// Nearest hit against the active indices.
    pub fn raycast(
        &self,
        interaction: &InteractionState,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RayHit> {
        self.active_indices(interaction)
            .into_iter()
            .filter_map(|index| index.raycast(origin, direction, max_distance))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}
