use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use delivery_router::prelude::*;
use delivery_router::{HashHistory, MemoryHistory, RoutePath};
use futures::channel::oneshot::Receiver;
use futures::channel::oneshot;
use pretty_assertions::assert_eq;

fn counted(view: &'static str, calls: Rc<Cell<usize>>) -> Loader<&'static str> {
    Loader::new(move || {
        calls.set(calls.get() + 1);
        async move { Ok(view) }
    })
}

/// A loader that waits for `rx` on its first call.
fn gated<T: Clone + 'static>(
    rx: Receiver<()>,
    first: Result<T, LoadError>,
    then: T,
) -> Loader<T> {
    let rx = Rc::new(RefCell::new(Some(rx)));
    Loader::new(move || {
        let rx = rx.borrow_mut().take();
        let result = match rx {
            Some(_) => first.clone(),
            None => Ok(then.clone()),
        };
        async move {
            if let Some(rx) = rx {
                let _ = rx.await;
            }
            result
        }
    })
}

/// A history whose back and forward only happen once `settle` is called, like a browser's.
#[derive(Default)]
struct DeferredHistory {
    inner: MemoryHistory,
    queued: RefCell<Vec<bool>>,
    updater: RefCell<Option<Rc<dyn Fn()>>>,
}

impl DeferredHistory {
    fn settle(&self) {
        let queued: Vec<_> = self.queued.borrow_mut().drain(..).collect();
        for back in queued {
            match back {
                true => self.inner.go_back(),
                false => self.inner.go_forward(),
            }
            let updater = self.updater.borrow().clone();
            if let Some(updater) = updater {
                updater();
            }
        }
    }
}

impl History for DeferredHistory {
    fn current_route(&self) -> String {
        self.inner.current_route()
    }

    fn can_go_back(&self) -> bool {
        self.inner.can_go_back()
    }

    fn go_back(&self) {
        self.queued.borrow_mut().push(true);
    }

    fn can_go_forward(&self) -> bool {
        self.inner.can_go_forward()
    }

    fn go_forward(&self) {
        self.queued.borrow_mut().push(false);
    }

    fn navigates_synchronously(&self) -> bool {
        false
    }

    fn push(&self, route: String) {
        self.inner.push(route);
    }

    fn replace(&self, route: String) {
        self.inner.replace(route);
    }

    fn updater(&self, callback: Rc<dyn Fn()>) {
        *self.updater.borrow_mut() = Some(callback);
    }
}

fn table(calls: &Rc<Cell<usize>>) -> RouteTable<&'static str> {
    RouteTable::builder()
        .route("/", counted("index", calls.clone()))
        .route("/orders", counted("orders", calls.clone()))
        .route("/stores", counted("stores", calls.clone()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn navigating_does_not_load() {
    let calls = Rc::new(Cell::new(0));
    let router = Router::new(table(&calls), RouterConfig::default()).unwrap();

    let state = router.navigate("/orders");
    assert_eq!(
        state,
        RouteState::Matched {
            path: RoutePath::normalize("/orders")
        }
    );
    assert_eq!(calls.get(), 0);

    assert_eq!(router.render().await, Ok(Outcome::Rendered("orders")));
    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn views_load_once() {
    let calls = Rc::new(Cell::new(0));
    let router = Router::new(table(&calls), RouterConfig::default()).unwrap();

    router.navigate("/stores");
    router.render().await.unwrap();
    router.navigate("/");
    router.render().await.unwrap();
    router.navigate("/stores");
    assert_eq!(router.render().await, Ok(Outcome::Rendered("stores")));

    assert_eq!(calls.get(), 2);
}

#[tokio::test]
async fn unknown_paths_are_not_found() {
    let calls = Rc::new(Cell::new(0));
    let router = Router::new(table(&calls), RouterConfig::default()).unwrap();

    let state = router.navigate("/unknown");
    assert!(!state.is_match());
    assert_eq!(state.path(), "/unknown");
    assert_eq!(
        router.render().await,
        Ok(Outcome::NotFound("/unknown".to_string()))
    );
    assert_eq!(calls.get(), 0);
}

#[tokio::test]
async fn hash_history_shows_the_route_after_the_hash() {
    let calls = Rc::new(Cell::new(0));
    let config = RouterConfig::default().document_url("http://localhost:8080/");
    let router = Router::new(table(&calls), config).unwrap();

    router.navigate("/orders");
    let url = router.current_href();
    assert_eq!(url, "http://localhost:8080/#/orders");
    assert!(url.ends_with("#/orders"));
    assert!(!url.ends_with("8080/orders"));
}

#[tokio::test]
async fn deep_links_render_their_route() {
    let calls = Rc::new(Cell::new(0));
    let config = RouterConfig::default().document_url("http://localhost:8080/#/stores");
    let router = Router::new(table(&calls), config).unwrap();

    assert!(router.current_route().is_match());
    assert_eq!(router.render().await, Ok(Outcome::Rendered("stores")));
}

#[tokio::test]
async fn back_and_forward_reroute() {
    let calls = Rc::new(Cell::new(0));
    let router = Router::new(table(&calls), RouterConfig::default()).unwrap();

    router.navigate("/orders");
    router.navigate("/stores");

    assert_eq!(router.go_back().path(), "/orders");
    assert!(router.can_go_forward());
    assert_eq!(router.go_forward().path(), "/stores");
    assert_eq!(router.render().await, Ok(Outcome::Rendered("stores")));
}

#[tokio::test]
async fn on_update_sees_every_navigation() {
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    let config = RouterConfig::default()
        .history(HistoryMode::Memory)
        .on_update(move |state| log.borrow_mut().push(state.path().to_string()));
    let router = Router::new(table(&calls), config).unwrap();

    router.navigate("/orders/");
    router.navigate("/nowhere");
    router.replace("/");

    assert_eq!(*seen.borrow(), ["/orders", "/nowhere", "/"]);
}

#[tokio::test]
async fn failed_loads_surface_and_retry() {
    let attempts = Rc::new(Cell::new(0));
    let counter = attempts.clone();
    let table = RouteTable::builder()
        .route(
            "/reviews",
            Loader::new(move || {
                counter.set(counter.get() + 1);
                let attempt = counter.get();
                async move {
                    match attempt {
                        1 => Err(LoadError::Fetch {
                            component: "ReviewGrid".into(),
                            reason: "connection reset".into(),
                        }),
                        _ => Ok("reviews"),
                    }
                }
            }),
        )
        .build()
        .unwrap();

    let router = Router::with_history(
        table,
        Rc::new(MemoryHistory::with_initial_path("/reviews")),
        RouterConfig::default(),
    );

    let err = router.render().await.unwrap_err();
    assert!(matches!(err, RouterError::Load { ref path, .. } if path.as_str() == "/reviews"));

    assert_eq!(router.render().await, Ok(Outcome::Rendered("reviews")));
    assert_eq!(attempts.get(), 2);
}

#[tokio::test]
async fn latest_navigation_wins() {
    let (tx, rx) = oneshot::channel::<()>();
    let rx = Rc::new(RefCell::new(Some(rx)));
    let table = RouteTable::builder()
        .route(
            "/orders",
            Loader::new(move || {
                let rx = rx.borrow_mut().take();
                async move {
                    if let Some(rx) = rx {
                        let _ = rx.await;
                    }
                    Ok("orders")
                }
            }),
        )
        .route("/stores", Loader::new(|| async { Ok("stores") }))
        .build()
        .unwrap();

    let router = Router::new(table, RouterConfig::default()).unwrap();
    router.navigate("/orders");

    let pending = router.render();
    let interrupt = async {
        router.navigate("/stores");
        tx.send(()).unwrap();
    };
    let (outcome, ()) = futures::join!(pending, interrupt);

    assert_eq!(outcome, Ok(Outcome::Superseded));
    assert_eq!(router.render().await, Ok(Outcome::Rendered("stores")));
}

#[tokio::test]
async fn renavigating_to_the_current_route_keeps_the_pending_load() {
    let (tx, rx) = oneshot::channel::<()>();
    let table = RouteTable::builder()
        .route("/orders", gated(rx, Ok("orders"), "orders"))
        .build()
        .unwrap();
    let updates = Rc::new(Cell::new(0));
    let counter = updates.clone();
    let config = RouterConfig::default().on_update(move |_| counter.set(counter.get() + 1));

    let router = Router::new(table, config).unwrap();
    router.navigate("/orders");

    let pending = router.render();
    let click_again = async {
        let state = router.navigate("/orders");
        assert_eq!(state.path(), "/orders");
        tx.send(()).unwrap();
    };
    let (outcome, ()) = futures::join!(pending, click_again);

    assert_eq!(outcome, Ok(Outcome::Rendered("orders")));
    assert_eq!(router.current_href(), "http://localhost/#/orders");
    assert_eq!(updates.get(), 1);
}

#[tokio::test]
async fn failed_loads_are_superseded_and_retried() {
    let (tx, rx) = oneshot::channel::<()>();
    let failure = LoadError::Fetch {
        component: "OrderGrid".into(),
        reason: "timed out".into(),
    };
    let table = RouteTable::builder()
        .route("/orders", gated(rx, Err(failure), "orders"))
        .route("/stores", Loader::new(|| async { Ok("stores") }))
        .build()
        .unwrap();

    let router = Router::new(table, RouterConfig::default()).unwrap();
    router.navigate("/orders");

    let pending = router.render();
    let interrupt = async {
        router.navigate("/stores");
        tx.send(()).unwrap();
    };
    let (outcome, ()) = futures::join!(pending, interrupt);
    assert_eq!(outcome, Ok(Outcome::Superseded));

    router.navigate("/orders");
    assert_eq!(router.render().await, Ok(Outcome::Rendered("orders")));
}

#[tokio::test]
async fn asynchronous_back_is_reported_once_it_lands() {
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    let history = Rc::new(DeferredHistory::default());
    let router = Router::with_history(
        table(&calls),
        history.clone(),
        RouterConfig::default()
            .on_update(move |state| log.borrow_mut().push(state.path().to_string())),
    );

    router.navigate("/orders");
    router.navigate("/stores");

    // the browser has not moved yet
    assert_eq!(router.go_back().path(), "/stores");
    assert_eq!(*seen.borrow(), ["/orders", "/stores"]);

    history.settle();
    assert_eq!(router.current_route().path(), "/orders");
    assert_eq!(*seen.borrow(), ["/orders", "/stores", "/orders"]);

    router.go_forward();
    history.settle();
    assert_eq!(*seen.borrow(), ["/orders", "/stores", "/orders", "/stores"]);
}

#[tokio::test]
async fn encoded_locations_are_decoded_once() {
    let table = RouteTable::builder()
        .route("/aA", Loader::new(|| async { Ok("aA") }))
        .build()
        .unwrap();
    let router = Router::new(table, RouterConfig::default()).unwrap();

    let state = router.navigate("/a%2541");
    assert!(!state.is_match());
    assert_eq!(router.current_href(), "http://localhost/#/a%2541");

    assert!(router.navigate("/a%41").is_match());
    assert!(router.navigate("/AA").is_match());
}

#[tokio::test]
async fn outside_hash_changes_reroute() {
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    let history = Rc::new(HashHistory::default());
    let router = Router::with_history(
        table(&calls),
        history.clone(),
        RouterConfig::default().on_update(move |state| log.borrow_mut().push(state.clone())),
    );

    history.sync_from_url("http://localhost/#/stores").unwrap();

    assert_eq!(router.current_route().path(), "/stores");
    assert_eq!(
        *seen.borrow(),
        [RouteState::Matched {
            path: RoutePath::normalize("/stores")
        }]
    );
}

#[tokio::test]
async fn tables_are_shared_between_clones() {
    let calls = Rc::new(Cell::new(0));
    let router = Router::new(table(&calls), RouterConfig::default()).unwrap();
    let other = router.clone();

    other.navigate("/orders");
    assert_eq!(router.current_route().path(), "/orders");
    assert_eq!(router.table().len(), 3);
}
