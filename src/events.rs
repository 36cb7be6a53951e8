//! Picker notifications and the listener registry behind `Picker::on`.

use std::fmt;

use crate::color::{ColorValue, FormattedColor};

/// Which notifications a listener subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ColorChange,
    Shown,
    Hidden,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::ColorChange => "color-change",
            Self::Shown => "show",
            Self::Hidden => "hide",
        }
    }

    /// Inverse of [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "color-change" | "change" => Some(Self::ColorChange),
            "show" => Some(Self::Shown),
            "hide" => Some(Self::Hidden),
            _ => None,
        }
    }
}

/// Payload of a `color-change` notification.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorChange {
    /// The current color in the configured output format.
    pub color: FormattedColor,
    /// The full value the formatted color was derived from.
    pub value: ColorValue,
    /// Whether this change may auto-hide the picker.
    pub enable_hide: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent {
    ColorChange(ColorChange),
    Shown,
    Hidden,
}

impl PickerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ColorChange(_) => EventKind::ColorChange,
            Self::Shown => EventKind::Shown,
            Self::Hidden => EventKind::Hidden,
        }
    }
}

pub type Handler = Box<dyn FnMut(&PickerEvent)>;

/// Handle returned by [`Listeners::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listeners in registration order. Several may share one kind.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, EventKind, Handler)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: EventKind, handler: Handler) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, kind, handler));
        id
    }

    /// Returns whether `id` was registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn emit(&mut self, event: &PickerEvent) {
        let kind = event.kind();
        log::trace!("emit {}", kind.name());
        for (_, k, handler) in self.entries.iter_mut() {
            if *k == kind {
                handler(event);
            }
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
