//! Editing session: selection state, drag loop, view, and commands.
//!
//! Purpose
//! - Own the shape list, the selection (mixed whole-shape/vertex picks
//!   with parallel drag offsets), and the pan/zoom view for one editing
//!   session. No ambient state: several sessions can coexist and tests
//!   drive the pointer methods directly.
//!
//! Model
//! - Pointer-down rebuilds the selection (or dispatches a topology
//!   command per the active mode), pointer-move updates the drag or
//!   pans, pointer-up clears the selection. Everything runs
//!   synchronously on the caller's thread; the host event loop provides
//!   the down → move* → up ordering.
//!
//! Code cross-refs: `select::Pick`, `topology`, `shape::Shape`, `persist`

mod select;
mod topology;


pub use select::Pick;

use nalgebra::Vector2;
use tracing::debug;

use crate::geom::rotate;
use crate::persist::{self, DataFormatError, PersistError, SnapshotStore};
use crate::shape::Shape;

/// Pan/zoom of the session viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub pan: Vector2<f64>,
    pub zoom: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            pan: Vector2::zeros(),
            zoom: 1.0,
        }
    }
}

impl ViewState {
    #[inline]
    pub fn to_world(&self, screen: Vector2<f64>) -> Vector2<f64> {
        (screen - self.pan) / self.zoom
    }

    #[inline]
    pub fn to_screen(&self, world: Vector2<f64>) -> Vector2<f64> {
        world * self.zoom + self.pan
    }

    /// Scale zoom by `factor`, keeping the world point under `focus`
    /// (screen coordinates) fixed.
    pub fn zoom_by(&mut self, factor: f64, focus: Vector2<f64>) {
        let world = self.to_world(focus);
        self.zoom *= factor;
        self.pan = focus - world * self.zoom;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Interaction tuning, in world units.
#[derive(Clone, Copy, Debug)]
pub struct EditCfg {
    /// Vertex grab radius for selection and removal.
    pub hit_radius: f64,
    /// Cross-shape vertex snapping radius during drags.
    pub snap_radius: f64,
    pub snap_enabled: bool,
}

impl Default for EditCfg {
    fn default() -> Self {
        Self {
            hit_radius: 8.0,
            snap_radius: 10.0,
            snap_enabled: true,
        }
    }
}

/// Command state for pointer-down, driven by host modifier keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerMode {
    /// Build a selection (vertices first, whole shapes as fallback).
    Normal,
    /// Insert a vertex on the closest polygon edge.
    Insert,
    /// Remove vertices within the hit radius.
    Delete,
}

/// One editing session over a list of shapes.
pub struct EditorSession {
    pub(crate) shapes: Vec<Shape>,
    pub(crate) selection: Vec<Pick>,
    pub(crate) offsets: Vec<Vector2<f64>>,
    pub view: ViewState,
    pub cfg: EditCfg,
    pointer_down: bool,
    last_screen: Option<Vector2<f64>>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self::with_cfg(EditCfg::default())
    }

    pub fn with_cfg(cfg: EditCfg) -> Self {
        Self {
            shapes: Vec::new(),
            selection: Vec::new(),
            offsets: Vec::new(),
            view: ViewState::default(),
            cfg,
            pointer_down: false,
            last_screen: None,
        }
    }

    /// Append a shape; the returned id is its index in the shape list.
    pub fn add_shape(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    /// Remove a shape. Ids of later shapes shift down by one, so the
    /// selection (which holds ids) is cleared.
    pub fn remove_shape(&mut self, id: usize) -> Option<Shape> {
        if id >= self.shapes.len() {
            return None;
        }
        self.clear_selection();
        Some(self.shapes.remove(id))
    }

    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[inline]
    pub fn shape(&self, id: usize) -> Option<&Shape> {
        self.shapes.get(id)
    }

    #[inline]
    pub fn shape_mut(&mut self, id: usize) -> Option<&mut Shape> {
        self.shapes.get_mut(id)
    }

    /// Current selection, for render-side highlighting.
    #[inline]
    pub fn selection(&self) -> &[Pick] {
        &self.selection
    }

    /// Per-pick world-space drag offsets, parallel to `selection()`.
    #[inline]
    pub fn drag_offsets(&self) -> &[Vector2<f64>] {
        &self.offsets
    }

    /// Empty both the selection and offset sequences together.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.offsets.clear();
    }

    /// Pointer pressed at `screen` coordinates with a command mode.
    pub fn on_pointer_down(&mut self, screen: Vector2<f64>, mode: PointerMode) {
        self.pointer_down = true;
        self.last_screen = Some(screen);
        let world = self.view.to_world(screen);
        match mode {
            PointerMode::Normal => self.build_selection(world),
            PointerMode::Insert => {
                self.insert_vertex_at(world);
            }
            PointerMode::Delete => {
                self.remove_vertices_at(world, self.cfg.hit_radius);
            }
        }
    }

    /// Pointer moved. Drags the selection, or pans when nothing is
    /// selected and the pointer is held.
    pub fn on_pointer_move(&mut self, screen: Vector2<f64>) {
        let last = self.last_screen.replace(screen);
        if !self.pointer_down {
            return;
        }
        if self.selection.is_empty() {
            // Raw screen delta, unscaled by zoom: shapes are rendered
            // under the same translation, so this tracks 1:1.
            if let Some(last) = last {
                self.view.pan += screen - last;
            }
            return;
        }
        let world = self.view.to_world(screen);
        self.drag_update(world);
    }

    /// Pointer released: the selection ends with the gesture.
    pub fn on_pointer_up(&mut self) {
        self.pointer_down = false;
        self.last_screen = None;
        self.clear_selection();
        debug!("selection cleared");
    }

    /// Move a polygon's local origin onto its vertex centroid while
    /// keeping every vertex's world position unchanged.
    ///
    /// Shifting vertices by `-c` changes `to_world(v) = pos + R(v)` by
    /// `-R(c)`, so the origin moves by `+R(c)`. Idempotent after the
    /// first application up to floating-point error.
    pub fn recenter(&mut self, id: usize) -> bool {
        let Some(shape) = self.shapes.get_mut(id) else {
            return false;
        };
        let angle = shape.transform.angle;
        let Some(poly) = shape.as_polygon_mut() else {
            return false;
        };
        let c = poly.centroid();
        for i in 0..poly.vertex_count() {
            let v = poly.vertex(i);
            poly.set_vertex(i, v - c);
        }
        shape.transform.position += rotate(c, angle);
        true
    }

    /// Serialize the shape list as a tagged descriptor array.
    pub fn to_json(&self) -> Result<String, DataFormatError> {
        persist::encode_shapes(&self.shapes)
    }

    /// Replace the shape list from serialized data.
    ///
    /// Parse-then-replace: the whole descriptor list is decoded before
    /// any live state is touched, so a malformed payload leaves the
    /// session intact. Loading clears the selection.
    pub fn load_json(&mut self, data: &str) -> Result<(), DataFormatError> {
        let shapes = persist::decode_shapes(data)?;
        self.shapes = shapes;
        self.clear_selection();
        Ok(())
    }

    /// Store the current shape list under `key` (a timestamp string).
    pub fn save_snapshot<S: SnapshotStore>(
        &self,
        store: &mut S,
        key: &str,
    ) -> Result<(), PersistError> {
        let data = self.to_json()?;
        store.put(key, &data)?;
        debug!(key, shapes = self.shapes.len(), "snapshot saved");
        Ok(())
    }

    pub fn load_snapshot<S: SnapshotStore>(
        &mut self,
        store: &S,
        key: &str,
    ) -> Result<(), PersistError> {
        let data = store
            .get(key)?
            .ok_or_else(|| PersistError::Missing(key.to_string()))?;
        self.load_json(&data)?;
        Ok(())
    }

    /// Load the lexicographically last key (latest timestamp). Returns
    /// the key that was loaded.
    pub fn load_latest_snapshot<S: SnapshotStore>(
        &mut self,
        store: &S,
    ) -> Result<String, PersistError> {
        let key = store
            .keys()?
            .into_iter()
            .max()
            .ok_or(PersistError::Empty)?;
        self.load_snapshot(store, &key)?;
        Ok(key)
    }
}
