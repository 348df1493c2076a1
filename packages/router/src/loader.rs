//! Deferred view loaders.

use std::{cell::RefCell, future::Future, rc::Rc};

use futures_util::{future::LocalBoxFuture, FutureExt};
use thiserror::Error;

/// A failure while fetching or instantiating a view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The view could not be fetched.
    #[error("failed to fetch `{component}`: {reason}")]
    Fetch {
        /// The view that was being loaded.
        component: String,
        /// Why the fetch failed.
        reason: String,
    },
}

type LoaderFn<V> = dyn Fn() -> LocalBoxFuture<'static, Result<V, LoadError>>;

/// A deferred factory producing a view of type `V`.
///
/// Nothing happens when a [`Loader`] is created. The factory runs the first time [`Loader::load`]
/// is awaited. Once it succeeds the view is kept, and every later load returns a clone of it
/// without running the factory again. Failures are not kept, so the next load retries.
///
/// ```rust
/// # use delivery_router::Loader;
/// # futures::executor::block_on(async {
/// let loader = Loader::new(|| async { Ok("orders grid") });
/// assert!(!loader.is_loaded());
///
/// assert_eq!(loader.load().await, Ok("orders grid"));
/// assert!(loader.is_loaded());
/// # });
/// ```
pub struct Loader<V> {
    factory: Rc<LoaderFn<V>>,
    loaded: Rc<RefCell<Option<V>>>,
}

impl<V> Clone for Loader<V> {
    fn clone(&self) -> Self {
        Self {
            factory: self.factory.clone(),
            loaded: self.loaded.clone(),
        }
    }
}

impl<V: Clone + 'static> Loader<V> {
    /// Wrap an async `factory`.
    pub fn new<F, Fut>(factory: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<V, LoadError>> + 'static,
    {
        Self {
            factory: Rc::new(move || factory().boxed_local()),
            loaded: Rc::new(RefCell::new(None)),
        }
    }

    /// Whether the factory has already produced a view.
    pub fn is_loaded(&self) -> bool {
        self.loaded.borrow().is_some()
    }

    /// Produce the view, running the factory only if no earlier load succeeded.
    pub async fn load(&self) -> Result<V, LoadError> {
        let cached = self.loaded.borrow().clone();
        if let Some(view) = cached {
            return Ok(view);
        }

        let view = (self.factory)().await?;
        *self.loaded.borrow_mut() = Some(view.clone());
        Ok(view)
    }
}

impl<V> std::fmt::Debug for Loader<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("loaded", &self.loaded.borrow().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn counting(calls: Rc<Cell<usize>>, fail_first: bool) -> Loader<&'static str> {
        Loader::new(move || {
            let call = calls.get() + 1;
            calls.set(call);
            async move {
                match fail_first && call == 1 {
                    true => Err(LoadError::Fetch {
                        component: "StoreGrid".into(),
                        reason: "network unreachable".into(),
                    }),
                    false => Ok("stores"),
                }
            }
        })
    }

    #[tokio::test]
    async fn creating_a_loader_runs_nothing() {
        let calls = Rc::new(Cell::new(0));
        let _loader = counting(calls.clone(), false);
        assert_eq!(calls.get(), 0);
    }

    #[tokio::test]
    async fn success_is_kept() {
        let calls = Rc::new(Cell::new(0));
        let loader = counting(calls.clone(), false);

        assert_eq!(loader.load().await, Ok("stores"));
        assert_eq!(loader.load().await, Ok("stores"));
        assert_eq!(loader.clone().load().await, Ok("stores"));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn failure_is_retried() {
        let calls = Rc::new(Cell::new(0));
        let loader = counting(calls.clone(), true);

        let err = loader.load().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to fetch `StoreGrid`: network unreachable"
        );
        assert!(!loader.is_loaded());

        assert_eq!(loader.load().await, Ok("stores"));
        assert_eq!(calls.get(), 2);
    }
}
