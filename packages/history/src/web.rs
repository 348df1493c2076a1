use std::{cell::RefCell, rc::Rc};

use gloo_events::EventListener;
use tracing::error;
use wasm_bindgen::JsValue;
use web_sys::Window;

use crate::{route_from_fragment, History};

/// A [`History`] provider that keeps the route in the fragment identifier of the browser's
/// location, using the [History API] to push and replace entries.
///
/// [History API]: https://developer.mozilla.org/en-US/docs/Web/API/History_API
///
/// # Prefix
/// The prefix is only used when creating `href`s. The document itself is wherever the browser
/// loaded it from.
pub struct WebHashHistory {
    window: Window,
    history: web_sys::History,
    listener_navigation: RefCell<Option<EventListener>>,
    prefix: Option<String>,
}

impl WebHashHistory {
    /// Create a new [`WebHashHistory`].
    ///
    /// Returns [`None`] outside of a browser window.
    pub fn new(prefix: Option<String>) -> Option<Self> {
        let window = web_sys::window()?;
        let history = window.history().ok()?;

        let myself = Self {
            window,
            history,
            listener_navigation: RefCell::new(None),
            prefix,
        };

        // make sure the address bar shows `#/` right away
        let current = myself.current_route();
        myself.replace(current);

        Some(myself)
    }

    fn fragment_url(&self, route: &str) -> String {
        format!("#{}", route_from_fragment(route))
    }
}

impl History for WebHashHistory {
    fn current_route(&self) -> String {
        let hash = self.window.location().hash().unwrap_or_default();
        route_from_fragment(hash.trim_start_matches('#'))
    }

    fn current_prefix(&self) -> Option<String> {
        self.prefix.clone()
    }

    fn go_back(&self) {
        if let Err(e) = self.history.back() {
            error!("failed to go back: {e:?}")
        }
    }

    fn go_forward(&self) {
        if let Err(e) = self.history.forward() {
            error!("failed to go forward: {e:?}")
        }
    }

    // `back` and `forward` only queue a traversal, the `hashchange` listener reports it
    fn navigates_synchronously(&self) -> bool {
        false
    }

    fn push(&self, route: String) {
        if route_from_fragment(&route) == self.current_route() {
            return;
        }

        let url = self.fragment_url(&route);
        if let Err(e) = self
            .history
            .push_state_with_url(&JsValue::NULL, "", Some(&url))
        {
            error!("failed to push state: {e:?}")
        }
    }

    fn replace(&self, route: String) {
        let url = self.fragment_url(&route);
        if let Err(e) = self
            .history
            .replace_state_with_url(&JsValue::NULL, "", Some(&url))
        {
            error!("failed to replace state: {e:?}")
        }
    }

    fn href(&self, route: &str) -> String {
        let fragment = self.fragment_url(route);
        match &self.prefix {
            Some(prefix) => format!("/{}/{fragment}", prefix.trim_matches('/')),
            None => fragment,
        }
    }

    fn updater(&self, callback: Rc<dyn Fn()>) {
        let listener = EventListener::new(&self.window, "hashchange", move |_| (*callback)());
        *self.listener_navigation.borrow_mut() = Some(listener);
    }
}
