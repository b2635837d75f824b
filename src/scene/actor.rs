//! Actor node data.

use crate::actions::Action;
use crate::input::events::InputEvent;
use std::collections::VecDeque;

/// Generational handle to an actor stored in an [`ActorTree`](super::ActorTree).
///
/// Handles of destroyed actors never resolve again, even after their slot is
/// reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Whether input is delivered to an actor and its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Touchable {
    #[default]
    Enabled,
    /// Neither the actor nor its children receive input.
    Disabled,
    /// Only the children receive input.
    ChildrenOnly,
}

pub type InitHook = Box<dyn FnOnce(&mut Actor) + Send>;
pub type UpdateHook = Box<dyn FnMut(&mut Actor, f32) + Send>;
pub type DrawHook = Box<dyn FnMut(&Actor) + Send>;
pub type InputHook = Box<dyn FnMut(&mut Actor, &InputEvent) -> bool + Send>;

/// A scene node: transform state, an action queue and host hooks.
///
/// Structural links (parent, children) are managed by the owning tree.
pub struct Actor {
    name: String,
    pub(crate) z_index: usize,

    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub origin_x: f32,
    pub origin_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Degrees, counter-clockwise.
    pub rotation: f32,
    pub visible: bool,
    pub touchable: Touchable,

    pub(crate) parent: Option<ActorId>,
    pub(crate) children: Vec<ActorId>,
    pub(crate) actions: VecDeque<Box<dyn Action>>,
    /// Front action is out of the queue while it acts.
    pub(crate) acting: bool,
    /// Set when the acting action is removed or cleared mid-act.
    pub(crate) acting_removed: bool,

    pub(crate) initialized: bool,
    pub(crate) init_hook: Option<InitHook>,
    pub(crate) update_hook: Option<UpdateHook>,
    pub(crate) draw_hook: Option<DrawHook>,
    pub(crate) input_hook: Option<InputHook>,
}

impl Actor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            z_index: 0,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            origin_x: 0.0,
            origin_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            visible: true,
            touchable: Touchable::Enabled,
            parent: None,
            children: Vec::new(),
            actions: VecDeque::new(),
            acting: false,
            acting_removed: false,
            initialized: false,
            init_hook: None,
            update_hook: None,
            draw_hook: None,
            input_hook: None,
        }
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.set_position(x, y);
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.set_size(width, height);
        self
    }

    /// Runs once, on the first tick after the actor is updated.
    pub fn on_init(mut self, hook: impl FnOnce(&mut Actor) + Send + 'static) -> Self {
        self.init_hook = Some(Box::new(hook));
        self
    }

    pub fn on_update(mut self, hook: impl FnMut(&mut Actor, f32) + Send + 'static) -> Self {
        self.update_hook = Some(Box::new(hook));
        self
    }

    pub fn on_draw(mut self, hook: impl FnMut(&Actor) + Send + 'static) -> Self {
        self.draw_hook = Some(Box::new(hook));
        self
    }

    pub fn on_input(
        mut self,
        hook: impl FnMut(&mut Actor, &InputEvent) -> bool + Send + 'static,
    ) -> Self {
        self.input_hook = Some(Box::new(hook));
        self
    }

    pub fn set_update_hook(&mut self, hook: Option<UpdateHook>) {
        self.update_hook = hook;
    }

    pub fn set_input_hook(&mut self, hook: Option<InputHook>) {
        self.input_hook = hook;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Position among the parent's children; higher draws later.
    pub fn z_index(&self) -> usize {
        self.z_index
    }

    pub fn parent(&self) -> Option<ActorId> {
        self.parent
    }

    pub fn children(&self) -> &[ActorId] {
        &self.children
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn action_count(&self) -> usize {
        self.actions.len() + usize::from(self.has_acting_action())
    }

    pub fn has_actions(&self) -> bool {
        self.has_acting_action() || !self.actions.is_empty()
    }

    pub(crate) fn has_acting_action(&self) -> bool {
        self.acting && !self.acting_removed
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn size_by(&mut self, dw: f32, dh: f32) {
        self.width += dw;
        self.height += dh;
    }

    pub fn set_origin(&mut self, x: f32, y: f32) {
        self.origin_x = x;
        self.origin_y = y;
    }

    pub fn set_scale(&mut self, x: f32, y: f32) {
        self.scale_x = x;
        self.scale_y = y;
    }

    pub fn scale_by(&mut self, dx: f32, dy: f32) {
        self.scale_x += dx;
        self.scale_y += dy;
    }

    pub fn rotate_by(&mut self, degrees: f32) {
        self.rotation += degrees;
    }

    /// Whether a point in parent coordinates falls inside the unrotated,
    /// unscaled bounds.
    pub fn contains_local(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

impl std::fmt::Debug for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actor")
            .field("name", &self.name)
            .field("z_index", &self.z_index)
            .field("position", &(self.x, self.y))
            .field("size", &(self.width, self.height))
            .field("scale", &(self.scale_x, self.scale_y))
            .field("rotation", &self.rotation)
            .field("visible", &self.visible)
            .field("touchable", &self.touchable)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("actions", &self.actions.len())
            .finish()
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::new("")
    }
}
