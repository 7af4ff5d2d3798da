use std::{cell::Cell, rc::Rc};

#[derive(Clone, Debug)]
pub struct Liveness(Rc<Cell<bool>>);

impl Liveness {
    pub fn is_alive(&self) -> bool {
        self.0.get()
    }
}

/// Cancellation hooks registered while mounting the effects. Each hook runs
/// exactly once, in reverse registration order, when the view unmounts.
pub struct Teardown {
    alive: Rc<Cell<bool>>,
    hooks: Vec<(&'static str, Box<dyn FnOnce()>)>,
}

impl Default for Teardown {
    fn default() -> Self {
        Self::new()
    }
}

impl Teardown {
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
            hooks: Vec::new(),
        }
    }

    pub fn liveness(&self) -> Liveness {
        Liveness(Rc::clone(&self.alive))
    }

    pub fn defer(&mut self, label: &'static str, hook: impl FnOnce() + 'static) {
        self.hooks.push((label, Box::new(hook)));
    }

    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.hooks.len()
    }

    pub fn run(&mut self) -> Vec<&'static str> {
        self.alive.set(false);

        let mut labels = Vec::with_capacity(self.hooks.len());
        while let Some((label, hook)) = self.hooks.pop() {
            hook();
            labels.push(label);
        }
        labels
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.run();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typing::{TypingEffect, TERMINAL_COMMAND};
    use std::cell::RefCell;

    #[test]
    fn every_hook_runs_once_in_reverse_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut teardown = Teardown::new();

        for label in ["typing", "rain", "cursor"] {
            let calls = Rc::clone(&calls);
            teardown.defer(label, move || calls.borrow_mut().push(label));
        }
        assert_eq!(teardown.pending(), 3);

        assert_eq!(teardown.run(), vec!["cursor", "rain", "typing"]);
        assert!(teardown.run().is_empty());
        assert_eq!(*calls.borrow(), vec!["cursor", "rain", "typing"]);
    }

    #[test]
    fn drop_cancels_outstanding_hooks() {
        let cancelled = Rc::new(Cell::new(0));
        {
            let mut teardown = Teardown::new();
            let cancelled = Rc::clone(&cancelled);
            teardown.defer("interval", move || cancelled.set(cancelled.get() + 1));
        }
        assert_eq!(cancelled.get(), 1);
    }

    #[test]
    fn late_callbacks_leave_state_untouched() {
        let mut teardown = Teardown::new();
        let liveness = teardown.liveness();
        let typing = Rc::new(RefCell::new(TypingEffect::new(TERMINAL_COMMAND)));

        // Stands in for an interval callback that already sits in the queue.
        let scheduled = {
            let typing = Rc::clone(&typing);
            move || {
                if liveness.is_alive() {
                    typing.borrow_mut().tick();
                }
            }
        };

        scheduled();
        teardown.run();
        scheduled();
        scheduled();

        assert_eq!(typing.borrow().revealed_chars(), 1);
    }
}
