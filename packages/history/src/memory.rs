use std::cell::RefCell;

use crate::{route_from_fragment, History};

struct MemoryHistoryState {
    current: String,
    history: Vec<String>,
    future: Vec<String>,
}

/// A [`History`] provider that stores all navigation information in memory.
///
/// Nothing is ever written to a URL, so [`History::href`] only prepends the prefix.
pub struct MemoryHistory {
    state: RefCell<MemoryHistoryState>,
    base_path: Option<String>,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::with_initial_path("/")
    }
}

impl MemoryHistory {
    /// Create a [`MemoryHistory`] starting at `path`.
    ///
    /// ```rust
    /// # use delivery_history::{History, MemoryHistory};
    /// let history = MemoryHistory::with_initial_path("/reviews");
    /// assert_eq!(history.current_route(), "/reviews");
    /// assert_eq!(history.can_go_back(), false);
    /// ```
    pub fn with_initial_path(path: impl ToString) -> Self {
        Self {
            state: MemoryHistoryState {
                current: route_from_fragment(&path.to_string()),
                history: Vec::new(),
                future: Vec::new(),
            }
            .into(),
            base_path: None,
        }
    }

    /// Set the base path for the history. All hrefs will be prefixed with this path.
    ///
    /// ```rust
    /// # use delivery_history::*;
    /// let history = MemoryHistory::default().with_prefix("/console");
    /// assert_eq!(history.current_prefix(), Some("/console".to_string()));
    /// assert_eq!(history.href("/orders"), "/console/orders");
    /// ```
    pub fn with_prefix(mut self, prefix: impl ToString) -> Self {
        self.base_path = Some(prefix.to_string());
        self
    }
}

impl History for MemoryHistory {
    fn current_prefix(&self) -> Option<String> {
        self.base_path.clone()
    }

    fn current_route(&self) -> String {
        self.state.borrow().current.clone()
    }

    fn can_go_back(&self) -> bool {
        !self.state.borrow().history.is_empty()
    }

    fn go_back(&self) {
        let mut write = self.state.borrow_mut();
        if let Some(last) = write.history.pop() {
            let old = std::mem::replace(&mut write.current, last);
            write.future.push(old);
        }
    }

    fn can_go_forward(&self) -> bool {
        !self.state.borrow().future.is_empty()
    }

    fn go_forward(&self) {
        let mut write = self.state.borrow_mut();
        if let Some(next) = write.future.pop() {
            let old = std::mem::replace(&mut write.current, next);
            write.history.push(old);
        }
    }

    fn push(&self, new: String) {
        let new = route_from_fragment(&new);
        let mut write = self.state.borrow_mut();
        // don't push the same route twice
        if write.current == new {
            return;
        }
        let old = std::mem::replace(&mut write.current, new);
        write.history.push(old);
        write.future.clear();
    }

    fn replace(&self, path: String) {
        let mut write = self.state.borrow_mut();
        write.current = route_from_fragment(&path);
    }
}
