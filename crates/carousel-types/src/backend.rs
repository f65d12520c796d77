//! Backend trait for element-tree access.
//!
//! The carousel never touches a real document. Every backend maps these
//! calls to its native element tree; the widget only sees opaque handles.

use crate::error::Result;

/// Opaque handle to a backend element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u32);

/// Host animation capabilities, probed once by the backend at startup.
///
/// When `supports_transitions` is false the widget falls back to the
/// manually-stepped animation path; when `supports_3d_transform` is false
/// the backend is expected to translate via 2D transforms.
#[derive(Debug, Clone, Copy, Default)]
pub struct Capabilities {
    /// Declarative transitions are available for opacity/transform changes.
    pub supports_transitions: bool,
    /// Accelerated 3D translation is available.
    pub supports_3d_transform: bool,
}

/// Element-tree operations the carousel needs from its host.
///
/// Mutators return `Result` so backends can report missing or detached
/// elements; the widget logs those failures rather than surfacing them.
pub trait CarouselBackend {
    /// Probed host capabilities.
    fn capabilities(&self) -> Capabilities;

    /// All elements matching a selector. An empty result is not an error.
    fn select(&mut self, selector: &str) -> Vec<ElementId>;

    /// Child elements of `el`, in document order.
    fn children(&self, el: ElementId) -> Vec<ElementId>;

    /// Deep-clone `el` and return the detached copy.
    fn clone_node(&mut self, el: ElementId) -> Result<ElementId>;

    /// Insert `new` into `parent` immediately before `reference`.
    fn insert_before(
        &mut self,
        parent: ElementId,
        new: ElementId,
        reference: ElementId,
    ) -> Result<()>;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<()>;

    /// Detach `child` from `parent`.
    fn remove_child(&mut self, parent: ElementId, child: ElementId) -> Result<()>;

    /// Wrap `el` in a new container element carrying `class`; returns the
    /// wrapper, which takes `el`'s place in the tree.
    fn wrap_in_div(&mut self, el: ElementId, class: &str) -> Result<ElementId>;

    /// Create a detached button element with a text label and class.
    fn create_button(&mut self, label: &str, class: &str) -> Result<ElementId>;

    /// Add a class name to `el` (no-op if already present).
    fn add_class(&mut self, el: ElementId, class: &str) -> Result<()>;

    /// Remove a class name from `el` (no-op if absent).
    fn remove_class(&mut self, el: ElementId, class: &str) -> Result<()>;

    /// Rendered width of `el` in pixels.
    fn offset_width(&self, el: ElementId) -> f32;

    /// Pin the wrapper's width so exactly one slide is visible.
    fn set_wrapper_width(&mut self, el: ElementId, px: f32) -> Result<()>;

    /// Set `el`'s opacity in `[0, 1]`.
    fn set_opacity(&mut self, el: ElementId, value: f32) -> Result<()>;

    /// Set the declarative transition duration for subsequent style changes
    /// on `el`. Zero disables transitions (instant application).
    fn set_transition_duration(&mut self, el: ElementId, ms: u64) -> Result<()>;

    /// Translate `el` horizontally to `px` (positive moves content left).
    fn set_translate_x(&mut self, el: ElementId, px: f32) -> Result<()>;
}
