//! Pointer events delivered by the host to interactive components.
//!
//! Hosts translate their native mouse/pen/touch input into [`PointerEvent`]s.
//! Only the horizontal client coordinate is carried because revolve
//! components track a single horizontal axis.

/// Which button a press or release refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PressKeyEventType {
    /// Primary button (left mouse button, pen contact, single touch).
    Left,
    /// Secondary button.
    Right,
    /// Middle button.
    Middle,
}

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventContent {
    /// A button went down over the component.
    Pressed(PressKeyEventType),
    /// The pointer moved.
    Moved,
    /// A button was released.
    Released(PressKeyEventType),
    /// The pointer left the component bounds.
    Left,
}

/// A single pointer event in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Horizontal client coordinate in physical pixels. Fractional values are
    /// preserved so release thresholds can be compared precisely.
    pub client_x: f32,
    /// The event payload.
    pub content: PointerEventContent,
}

impl PointerEvent {
    /// Primary-button press at `client_x`.
    pub fn pressed(client_x: f32) -> Self {
        Self {
            client_x,
            content: PointerEventContent::Pressed(PressKeyEventType::Left),
        }
    }

    /// Pointer move to `client_x`.
    pub fn moved(client_x: f32) -> Self {
        Self {
            client_x,
            content: PointerEventContent::Moved,
        }
    }

    /// Primary-button release at `client_x`.
    pub fn released(client_x: f32) -> Self {
        Self {
            client_x,
            content: PointerEventContent::Released(PressKeyEventType::Left),
        }
    }

    /// Pointer left the component at `client_x`.
    pub fn left(client_x: f32) -> Self {
        Self {
            client_x,
            content: PointerEventContent::Left,
        }
    }

    /// Press of an arbitrary button.
    pub fn pressed_with(client_x: f32, button: PressKeyEventType) -> Self {
        Self {
            client_x,
            content: PointerEventContent::Pressed(button),
        }
    }

    /// Release of an arbitrary button.
    pub fn released_with(client_x: f32, button: PressKeyEventType) -> Self {
        Self {
            client_x,
            content: PointerEventContent::Released(button),
        }
    }
}

/// Keys a horizontally navigable component reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationKey {
    /// Move one item toward the start.
    ArrowLeft,
    /// Move one item toward the end.
    ArrowRight,
    /// Jump to the first item.
    Home,
    /// Jump to the last item.
    End,
}
