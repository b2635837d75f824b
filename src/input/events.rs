//! Raw input samples and the events produced from them.

/// Pointer index of the primary finger / mouse.
pub const PRIMARY_POINTER: usize = 0;
/// Pointer index of the second finger.
pub const SECONDARY_POINTER: usize = 1;

/// Raw sample delivered by the host windowing layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawInput {
    TouchDown {
        x: f32,
        y: f32,
        pointer: usize,
        button: u32,
    },
    TouchUp {
        x: f32,
        y: f32,
        pointer: usize,
        button: u32,
    },
    TouchDragged {
        x: f32,
        y: f32,
        pointer: usize,
    },
    MouseMoved {
        x: f32,
        y: f32,
    },
    Scrolled {
        amount_x: f32,
        amount_y: f32,
    },
    KeyDown {
        key_code: u32,
    },
    KeyUp {
        key_code: u32,
    },
    KeyTyped {
        character: char,
    },
    /// Cursor entered the input surface.
    Enter {
        x: f32,
        y: f32,
        pointer: usize,
    },
    /// Cursor left the input surface.
    Exit {
        x: f32,
        y: f32,
        pointer: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl std::fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwipeDirection::Left => write!(f, "LEFT"),
            SwipeDirection::Right => write!(f, "RIGHT"),
            SwipeDirection::Up => write!(f, "UP"),
            SwipeDirection::Down => write!(f, "DOWN"),
        }
    }
}

/// Flat discriminant of [`InputEvent`], one entry per event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputEventKind {
    #[default]
    None,
    TouchDown,
    TouchUp,
    TouchDragged,
    MouseMoved,
    Enter,
    Exit,
    Scrolled,
    KeyDown,
    KeyUp,
    KeyTyped,
    Tap,
    Fling,
    Pan,
    PanStop,
    LongPress,
    Zoom,
    Pinch,
    SwipeLeft,
    SwipeRight,
    SwipeUp,
    SwipeDown,
}

/// Events delivered to the host through the event queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    TouchDown {
        x: f32,
        y: f32,
        pointer: usize,
        button: u32,
    },
    TouchUp {
        x: f32,
        y: f32,
        pointer: usize,
        button: u32,
    },
    TouchDragged {
        x: f32,
        y: f32,
        pointer: usize,
    },
    MouseMoved {
        x: f32,
        y: f32,
    },
    Enter {
        x: f32,
        y: f32,
        pointer: usize,
    },
    Exit {
        x: f32,
        y: f32,
        pointer: usize,
    },
    Scrolled {
        amount_x: f32,
        amount_y: f32,
    },
    KeyDown {
        key_code: u32,
    },
    KeyUp {
        key_code: u32,
    },
    KeyTyped {
        character: char,
    },

    // Gestures
    Tap {
        x: f32,
        y: f32,
        count: u32,
        pointer: usize,
        button: u32,
    },
    /// Release velocity in units per second.
    Fling {
        velocity_x: f32,
        velocity_y: f32,
        button: u32,
    },
    Pan {
        x: f32,
        y: f32,
        delta_x: f32,
        delta_y: f32,
    },
    PanStop {
        x: f32,
        y: f32,
        pointer: usize,
        button: u32,
    },
    LongPress {
        x: f32,
        y: f32,
    },
    Zoom {
        initial_distance: f32,
        distance: f32,
    },
    Pinch {
        initial_pointer1: (f32, f32),
        initial_pointer2: (f32, f32),
        pointer1: (f32, f32),
        pointer2: (f32, f32),
    },
    Swipe {
        direction: SwipeDirection,
        x: f32,
        y: f32,
    },
}

impl InputEvent {
    pub fn kind(&self) -> InputEventKind {
        match self {
            InputEvent::TouchDown { .. } => InputEventKind::TouchDown,
            InputEvent::TouchUp { .. } => InputEventKind::TouchUp,
            InputEvent::TouchDragged { .. } => InputEventKind::TouchDragged,
            InputEvent::MouseMoved { .. } => InputEventKind::MouseMoved,
            InputEvent::Enter { .. } => InputEventKind::Enter,
            InputEvent::Exit { .. } => InputEventKind::Exit,
            InputEvent::Scrolled { .. } => InputEventKind::Scrolled,
            InputEvent::KeyDown { .. } => InputEventKind::KeyDown,
            InputEvent::KeyUp { .. } => InputEventKind::KeyUp,
            InputEvent::KeyTyped { .. } => InputEventKind::KeyTyped,
            InputEvent::Tap { .. } => InputEventKind::Tap,
            InputEvent::Fling { .. } => InputEventKind::Fling,
            InputEvent::Pan { .. } => InputEventKind::Pan,
            InputEvent::PanStop { .. } => InputEventKind::PanStop,
            InputEvent::LongPress { .. } => InputEventKind::LongPress,
            InputEvent::Zoom { .. } => InputEventKind::Zoom,
            InputEvent::Pinch { .. } => InputEventKind::Pinch,
            InputEvent::Swipe { direction, .. } => match direction {
                SwipeDirection::Left => InputEventKind::SwipeLeft,
                SwipeDirection::Right => InputEventKind::SwipeRight,
                SwipeDirection::Up => InputEventKind::SwipeUp,
                SwipeDirection::Down => InputEventKind::SwipeDown,
            },
        }
    }

    /// Screen position carried by the event, if it has one.
    pub fn position(&self) -> Option<(f32, f32)> {
        match *self {
            InputEvent::TouchDown { x, y, .. }
            | InputEvent::TouchUp { x, y, .. }
            | InputEvent::TouchDragged { x, y, .. }
            | InputEvent::MouseMoved { x, y }
            | InputEvent::Enter { x, y, .. }
            | InputEvent::Exit { x, y, .. }
            | InputEvent::Tap { x, y, .. }
            | InputEvent::Pan { x, y, .. }
            | InputEvent::PanStop { x, y, .. }
            | InputEvent::LongPress { x, y }
            | InputEvent::Swipe { x, y, .. } => Some((x, y)),
            _ => None,
        }
    }

    pub fn pointer(&self) -> Option<usize> {
        match *self {
            InputEvent::TouchDown { pointer, .. }
            | InputEvent::TouchUp { pointer, .. }
            | InputEvent::TouchDragged { pointer, .. }
            | InputEvent::Enter { pointer, .. }
            | InputEvent::Exit { pointer, .. }
            | InputEvent::Tap { pointer, .. }
            | InputEvent::PanStop { pointer, .. } => Some(pointer),
            _ => None,
        }
    }

    pub fn button(&self) -> Option<u32> {
        match *self {
            InputEvent::TouchDown { button, .. }
            | InputEvent::TouchUp { button, .. }
            | InputEvent::Tap { button, .. }
            | InputEvent::Fling { button, .. }
            | InputEvent::PanStop { button, .. } => Some(button),
            _ => None,
        }
    }

    pub fn is_gesture(&self) -> bool {
        matches!(
            self,
            InputEvent::Tap { .. }
                | InputEvent::Fling { .. }
                | InputEvent::Pan { .. }
                | InputEvent::PanStop { .. }
                | InputEvent::LongPress { .. }
                | InputEvent::Zoom { .. }
                | InputEvent::Pinch { .. }
                | InputEvent::Swipe { .. }
        )
    }
}

impl From<RawInput> for InputEvent {
    fn from(raw: RawInput) -> Self {
        match raw {
            RawInput::TouchDown {
                x,
                y,
                pointer,
                button,
            } => InputEvent::TouchDown {
                x,
                y,
                pointer,
                button,
            },
            RawInput::TouchUp {
                x,
                y,
                pointer,
                button,
            } => InputEvent::TouchUp {
                x,
                y,
                pointer,
                button,
            },
            RawInput::TouchDragged { x, y, pointer } => InputEvent::TouchDragged { x, y, pointer },
            RawInput::MouseMoved { x, y } => InputEvent::MouseMoved { x, y },
            RawInput::Scrolled { amount_x, amount_y } => InputEvent::Scrolled { amount_x, amount_y },
            RawInput::KeyDown { key_code } => InputEvent::KeyDown { key_code },
            RawInput::KeyUp { key_code } => InputEvent::KeyUp { key_code },
            RawInput::KeyTyped { character } => InputEvent::KeyTyped { character },
            RawInput::Enter { x, y, pointer } => InputEvent::Enter { x, y, pointer },
            RawInput::Exit { x, y, pointer } => InputEvent::Exit { x, y, pointer },
        }
    }
}

/// Commands sent to the input thread.
#[derive(Debug, Clone)]
pub enum InputCommand {
    /// Abort the gesture in progress (an upstream consumer took it over).
    CancelGesture,
    /// Return the recognizer to idle.
    ResetGestures,
    /// Stop the input thread.
    Shutdown,
}
