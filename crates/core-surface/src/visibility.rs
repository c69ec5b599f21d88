use std::cell::Cell;

/// Process-wide breadcrumb visibility.
///
/// Starts visible. Shared by reference count between the controller and
/// whoever issues show/hide commands; every render decision reads it.
#[derive(Debug)]
pub struct Visibility {
    visible: Cell<bool>,
}

impl Default for Visibility {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Visibility {
    pub fn new(visible: bool) -> Self {
        Self {
            visible: Cell::new(visible),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Returns the previous value.
    pub fn set(&self, visible: bool) -> bool {
        self.visible.replace(visible)
    }

    /// Flip and return the new value.
    pub fn toggle(&self) -> bool {
        let next = !self.visible.get();
        self.visible.set(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn shared_handles_observe_toggles() {
        let a = Rc::new(Visibility::default());
        let b = Rc::clone(&a);
        assert!(b.is_visible());
        assert!(!a.toggle());
        assert!(!b.is_visible());
        assert!(!b.set(true));
        assert!(a.is_visible());
    }
}
