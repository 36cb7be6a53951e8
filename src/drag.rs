//! Press, move, release.
//!
//! A [`DragTracker`] holds at most one [`DragSession`]. The control type `C`
//! names which cursor/surface pair of a picker the drag started on.

use crate::geometry::{HonorAxes, Size, SurfaceCoordinate};

/// Mouse button that started a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Auxiliary,
    Other,
}

impl PointerButton {
    pub fn is_primary(self) -> bool {
        self == Self::Primary
    }
}

/// One live gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession<C> {
    pub control: C,
    /// Pointer position at press, surface-local.
    pub origin: SurfaceCoordinate,
    /// Unclamped cursor offset at press.
    pub base_offset: SurfaceCoordinate,
    pub honor: HonorAxes,
}

impl<C: Copy> DragSession<C> {
    /// Start a session for a press at `pointer`.
    pub fn start(control: C, pointer: SurfaceCoordinate, cursor: Size, honor: HonorAxes) -> Self {
        Self {
            control,
            origin: pointer,
            base_offset: SurfaceCoordinate::new(
                pointer.x - (cursor.width / 2.0).floor(),
                pointer.y - (cursor.height / 2.0).floor(),
            ),
            honor,
        }
    }

    /// Unclamped offset for the pointer now at `pointer`.
    ///
    /// Movement along an axis that is not honored is ignored.
    pub fn proposed(&self, pointer: SurfaceCoordinate) -> SurfaceCoordinate {
        let mut offset = self.base_offset;
        if self.honor.x {
            offset.x += pointer.x - self.origin.x;
        }
        if self.honor.y {
            offset.y += pointer.y - self.origin.y;
        }
        offset
    }
}

/// Owner of the (single) active session of a picker.
#[derive(Debug, Clone)]
pub struct DragTracker<C> {
    session: Option<DragSession<C>>,
}

impl<C> Default for DragTracker<C> {
    fn default() -> Self {
        Self { session: None }
    }
}

impl<C: Copy> DragTracker<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a drag. Returns `None` and leaves the tracker idle for
    /// non-primary buttons. A new press replaces any live session.
    pub fn press(
        &mut self,
        control: C,
        button: PointerButton,
        pointer: SurfaceCoordinate,
        cursor: Size,
        honor: HonorAxes,
    ) -> Option<&DragSession<C>> {
        if !button.is_primary() {
            return None;
        }
        self.session = Some(DragSession::start(control, pointer, cursor, honor));
        self.session.as_ref()
    }

    /// Proposed offset for a move, `None` when idle.
    pub fn moved(&self, pointer: SurfaceCoordinate) -> Option<(C, SurfaceCoordinate)> {
        self.session.map(|s| (s.control, s.proposed(pointer)))
    }

    /// End the gesture. Returns whether a session was live.
    pub fn release(&mut self) -> bool {
        self.session.take().is_some()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }
}
