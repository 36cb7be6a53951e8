//! Recently used colors.
//!
//! Colors are stored as their `rgba(...)` strings, which is also what
//! duplicate detection compares.

use crate::color::ColorValue;
use crate::error::{PickerError, Result};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct History {
    hidden: bool,
    slots: Vec<Option<String>>,
}

impl History {
    /// `placeholders` slots, the first ones seeded from `colors`.
    ///
    /// Invalid seed colors are skipped. Seeds beyond the slot count get
    /// slots of their own.
    pub fn new<S: AsRef<str>>(colors: &[S], placeholders: usize, hidden: bool) -> Self {
        let mut slots: Vec<Option<String>> = colors
            .iter()
            .filter_map(|raw| {
                let c = ColorValue::process(raw.as_ref());
                if c.is_valid() {
                    Some(Some(c.rgba().to_string()))
                } else {
                    log::debug!("skipping invalid history color {:?}", raw.as_ref());
                    None
                }
            })
            .collect();
        if slots.len() < placeholders {
            slots.resize(placeholders, None);
        }
        Self { hidden, slots }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    pub fn contains(&self, color: &ColorValue) -> bool {
        self.slots
            .iter()
            .any(|s| s.as_deref() == Some(color.rgba()))
    }

    /// Remember `color`. Returns the slot it landed in, or `None` if it was
    /// already present.
    pub fn add(&mut self, color: &ColorValue) -> Option<usize> {
        if self.contains(color) {
            return None;
        }
        let rgba = color.rgba().to_string();
        match self.slots.iter().position(Option::is_none) {
            Some(i) => {
                self.slots[i] = Some(rgba);
                Some(i)
            }
            None => {
                self.slots.push(Some(rgba));
                Some(self.slots.len() - 1)
            }
        }
    }

    /// The color stored in slot `index`.
    pub fn get(&self, index: usize) -> Result<&str> {
        self.slots
            .get(index)
            .and_then(|s| s.as_deref())
            .ok_or(PickerError::EmptyHistorySlot(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_then_placeholders() {
        let h = History::new(&["#fff", "bogus", "red"], 5, false);
        assert_eq!(h.slots().len(), 5);
        assert_eq!(h.get(0).unwrap(), "rgba(255, 255, 255, 1)");
        assert_eq!(h.get(1).unwrap(), "rgba(255, 0, 0, 1)");
        assert!(matches!(h.get(2), Err(PickerError::EmptyHistorySlot(2))));
        assert!(h.get(9).is_err());
    }

    #[test]
    fn fills_first_empty_slot_and_dedups() {
        let mut h = History::new::<&str>(&[], 2, false);
        let red = ColorValue::process("#f00");
        assert_eq!(h.add(&red), Some(0));
        assert_eq!(h.add(&ColorValue::process("rgb(255, 0, 0)")), None);
        assert_eq!(h.add(&ColorValue::process("#00f")), Some(1));
        assert_eq!(h.slots().len(), 2);
    }

    #[test]
    fn grows_when_full() {
        let mut h = History::new(&["#000"], 1, false);
        assert_eq!(h.add(&ColorValue::process("#fff")), Some(1));
        assert_eq!(h.add(&ColorValue::process("#000")), None);
        assert_eq!(h.slots().len(), 2);
    }

    #[test]
    fn opacity_makes_a_different_entry() {
        let mut h = History::new::<&str>(&[], 3, false);
        let mut c = ColorValue::process("#0f0");
        h.add(&c);
        c.set_opacity(0.5);
        assert_eq!(h.add(&c), Some(1));
    }
}
