use std::{cell::RefCell, rc::Rc};

use tracing::debug;
use url::Url;

use crate::{route_from_fragment, History};

const DEFAULT_DOCUMENT: &str = "http://localhost/";

struct HashHistoryState {
    document: Url,
    history: Vec<String>,
    future: Vec<String>,
}

impl HashHistoryState {
    fn route(&self) -> String {
        route_from_fragment(self.document.fragment().unwrap_or_default())
    }
}

/// A [`History`] provider that encodes the current route in the fragment identifier of a document
/// URL.
///
/// The path portion of the document URL never changes while navigating, so the server only ever
/// has to serve the document itself:
///
/// ```rust
/// # use delivery_history::{HashHistory, History};
/// let history = HashHistory::from_url("http://localhost:8080/").unwrap();
/// history.push(String::from("/orders"));
///
/// assert_eq!(history.current_route(), "/orders");
/// assert_eq!(history.current_url(), "http://localhost:8080/#/orders");
/// ```
///
/// # Prefix
/// A prefix moves the document below the domain root. It is placed before the `#`, never inside
/// the fragment.
pub struct HashHistory {
    state: RefCell<HashHistoryState>,
    prefix: Option<String>,
    updater: RefCell<Option<Rc<dyn Fn()>>>,
}

impl Default for HashHistory {
    fn default() -> Self {
        Self::from_url(DEFAULT_DOCUMENT).expect("the default document url is valid")
    }
}

impl HashHistory {
    /// Create a [`HashHistory`] for the document at `document`.
    ///
    /// A fragment already present in `document` becomes the initial route, which is how deep links
    /// like `http://localhost:8080/#/stores` land on the right page. Without a fragment the
    /// initial route is `/`.
    pub fn from_url(document: &str) -> Result<Self, url::ParseError> {
        let mut document = Url::parse(document)?;
        let route = route_from_fragment(document.fragment().unwrap_or_default());
        document.set_fragment(Some(route.as_str()));

        Ok(Self {
            state: RefCell::new(HashHistoryState {
                document,
                history: Vec::new(),
                future: Vec::new(),
            }),
            prefix: None,
            updater: RefCell::new(None),
        })
    }

    /// Serve the document from below `prefix`.
    ///
    /// ```rust
    /// # use delivery_history::{HashHistory, History};
    /// let history = HashHistory::from_url("http://localhost:8080/")
    ///     .unwrap()
    ///     .with_prefix("/console");
    /// assert_eq!(history.href("/stores"), "http://localhost:8080/console/#/stores");
    /// ```
    pub fn with_prefix(self, prefix: impl ToString) -> Self {
        let prefix = prefix.to_string();
        let trimmed = prefix.trim_matches('/');
        let path = match trimmed.is_empty() {
            true => "/".to_string(),
            false => format!("/{trimmed}/"),
        };
        self.state.borrow_mut().document.set_path(&path);

        Self {
            prefix: Some(prefix),
            ..self
        }
    }

    /// The full URL currently shown in the address bar.
    ///
    /// This always ends in `#` followed by the current route.
    pub fn current_url(&self) -> String {
        self.state.borrow().document.to_string()
    }

    /// Adopt a URL that changed outside the router, like a user editing the address bar.
    ///
    /// The previous route is kept in the navigation history and the registered
    /// [updater](History::updater) is notified.
    pub fn sync_from_url(&self, url: &str) -> Result<(), url::ParseError> {
        let mut document = Url::parse(url)?;
        let route = route_from_fragment(document.fragment().unwrap_or_default());
        document.set_fragment(Some(route.as_str()));

        {
            let mut write = self.state.borrow_mut();
            if write.document == document {
                return Ok(());
            }
            debug!(%route, "fragment changed outside the router");
            let old = write.route();
            write.document = document;
            write.history.push(old);
            write.future.clear();
        }

        let updater = self.updater.borrow().clone();
        if let Some(updater) = updater {
            updater();
        }

        Ok(())
    }
}

impl History for HashHistory {
    fn current_route(&self) -> String {
        self.state.borrow().route()
    }

    fn current_prefix(&self) -> Option<String> {
        self.prefix.clone()
    }

    fn can_go_back(&self) -> bool {
        !self.state.borrow().history.is_empty()
    }

    fn go_back(&self) {
        let mut write = self.state.borrow_mut();
        if let Some(last) = write.history.pop() {
            let old = write.route();
            write.document.set_fragment(Some(last.as_str()));
            write.future.push(old);
        }
    }

    fn can_go_forward(&self) -> bool {
        !self.state.borrow().future.is_empty()
    }

    fn go_forward(&self) {
        let mut write = self.state.borrow_mut();
        if let Some(next) = write.future.pop() {
            let old = write.route();
            write.document.set_fragment(Some(next.as_str()));
            write.history.push(old);
        }
    }

    fn push(&self, route: String) {
        let mut write = self.state.borrow_mut();
        let mut document = write.document.clone();
        document.set_fragment(Some(route_from_fragment(&route).as_str()));
        // don't push the same route twice
        if document == write.document {
            return;
        }
        let old = write.route();
        write.document = document;
        write.history.push(old);
        write.future.clear();
    }

    fn replace(&self, route: String) {
        let route = route_from_fragment(&route);
        self.state.borrow_mut().document.set_fragment(Some(route.as_str()));
    }

    fn href(&self, route: &str) -> String {
        let mut document = self.state.borrow().document.clone();
        document.set_fragment(Some(route_from_fragment(route).as_str()));
        document.to_string()
    }

    fn updater(&self, callback: Rc<dyn Fn()>) {
        *self.updater.borrow_mut() = Some(callback);
    }
}
