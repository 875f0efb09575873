use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::trace;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::catalog::Catalog;
use crate::models::{Book, ResultEnvelope};
use crate::repository::BookRepository;
use crate::stage::{self, Stage};

pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    /// No query issued yet.
    Idle,
    Loading {
        query: String,
    },
    Settled {
        query: String,
        result: ResultEnvelope<Vec<Book>>,
    },
}

/// What the results screen should show. Exactly one applies at a time.
#[derive(Debug, PartialEq)]
pub enum SearchView<'a> {
    Idle,
    Loading,
    Failed(String),
    Empty,
    Results(&'a [Book]),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        match self {
            SearchState::Loading { .. } => true,
            _ => false,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        match self {
            SearchState::Settled { result, .. } => result.error.as_ref().map(|err| {
                let message = err.message();
                if message.trim().is_empty() {
                    UNKNOWN_ERROR.to_string()
                } else {
                    message.to_string()
                }
            }),
            _ => None,
        }
    }

    pub fn books(&self) -> &[Book] {
        match self {
            SearchState::Settled { result, .. } => result.data.as_deref().unwrap_or(&[]),
            _ => &[],
        }
    }

    pub fn view(&self) -> SearchView<'_> {
        match self {
            SearchState::Idle => SearchView::Idle,
            SearchState::Loading { .. } => SearchView::Loading,
            SearchState::Settled { .. } => {
                if let Some(message) = self.error_message() {
                    return SearchView::Failed(message);
                }

                match self.books() {
                    [] => SearchView::Empty,
                    books => SearchView::Results(books),
                }
            }
        }
    }
}

/// Holds the state of the search screen.
///
/// Each dispatched search takes the next sequence number. A completion is
/// published only if no newer search was dispatched in the meantime, so
/// overlapping searches always settle on the latest one.
pub struct SearchController<C> {
    repository: BookRepository<C>,
    state: watch::Sender<SearchState>,
    latest: AtomicU64,
}

impl<C: Catalog> SearchController<C> {
    pub fn new(repository: BookRepository<C>) -> SearchController<C> {
        let (state, _) = watch::channel(SearchState::Idle);

        SearchController {
            repository,
            state,
            latest: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn error_message(&self) -> Option<String> {
        self.state.borrow().error_message()
    }

    pub fn books(&self) -> Vec<Book> {
        self.state.borrow().books().to_vec()
    }

    /// Blank queries are ignored: the state is left as is and nothing is fetched.
    pub async fn search(&self, query: &str) {
        trace!("SearchController::search({})", query);

        if query.trim().is_empty() {
            return;
        }

        // seq is taken under the channel lock, the same lock the settle check
        // holds, so Loading and Settled are always published in seq order
        let mut seq = 0;
        self.state.send_modify(|state| {
            seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            *state = SearchState::Loading {
                query: query.to_string(),
            };
        });
        stage::update(query, Stage::Dispatched { seq });

        let result = self.repository.get_books(query).await;

        let published = self.state.send_if_modified(|state| {
            // compared under the channel lock so a newer Loading is never overwritten
            if self.latest.load(Ordering::SeqCst) != seq {
                return false;
            }

            *state = SearchState::Settled {
                query: query.to_string(),
                result,
            };

            true
        });

        if published {
            stage::update(query, Stage::Settled { seq });
        } else {
            let latest = self.latest.load(Ordering::SeqCst);
            stage::update(query, Stage::Discarded { seq, latest });
        }
    }
}

impl<C: Catalog + 'static> SearchController<C> {
    /// Runs [`SearchController::search`] on the runtime without waiting for it.
    pub fn spawn_search(self: &Arc<Self>, query: impl Into<String>) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        let query = query.into();

        tokio::spawn(async move { controller.search(&query).await })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::{SearchController, SearchState, SearchView, UNKNOWN_ERROR};
    use crate::catalog::Catalog;
    use crate::error::{Error, Result};
    use crate::models::{RawCatalogResource, RawItem, VolumeInfo};
    use crate::repository::tests::{Dune, Failing};
    use crate::repository::BookRepository;

    fn controller<C: Catalog>(catalog: C) -> SearchController<C> {
        SearchController::new(BookRepository::new(catalog))
    }

    /// Answers each query with a single book titled after it, after a
    /// query-specific delay.
    struct Delayed {
        calls: AtomicUsize,
    }

    impl Delayed {
        fn new() -> Delayed {
            Delayed {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Catalog for Delayed {
        async fn search_books(&self, query: &str) -> Result<RawCatalogResource> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            let millis = match query {
                "a" => 50,
                _ => 10,
            };
            tokio::time::sleep(Duration::from_millis(millis)).await;

            Ok(RawCatalogResource {
                items: Some(vec![Some(RawItem {
                    id: Some(query.to_string()),
                    volume_info: Some(VolumeInfo {
                        title: Some(query.to_uppercase()),
                        ..VolumeInfo::default()
                    }),
                    ..RawItem::default()
                })]),
                ..RawCatalogResource::default()
            })
        }

        async fn fetch_book_by_id(&self, id: &str) -> Result<RawItem> {
            Err(Error::NotFound(id.to_string()))
        }
    }

    #[tokio::test]
    async fn dune_scenario() -> anyhow::Result<()> {
        let controller = controller(Dune);

        controller.search("dune").await;

        let books = controller.books();
        assert_eq!(2, books.len());
        assert_eq!("Dune", books[0].title);
        assert_eq!("", books[1].title);
        assert!(!controller.is_loading());
        assert_eq!(None, controller.error_message());

        Ok(())
    }

    #[tokio::test]
    async fn blank_query_is_ignored() -> anyhow::Result<()> {
        let catalog = Arc::new(Delayed::new());
        let controller = controller(Arc::clone(&catalog));

        controller.search("").await;
        controller.search("   ").await;

        assert_eq!(SearchState::Idle, controller.state());
        assert_eq!(0, catalog.calls.load(Ordering::SeqCst));

        Ok(())
    }

    #[tokio::test]
    async fn blank_query_keeps_settled_results() -> anyhow::Result<()> {
        let controller = controller(Dune);

        controller.search("dune").await;
        let before = controller.state();
        controller.search(" \t").await;

        assert_eq!(before, controller.state());

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn late_response_is_discarded() -> anyhow::Result<()> {
        let controller = controller(Delayed::new());

        // "a" is dispatched first but answers last
        tokio::join!(controller.search("a"), controller.search("b"));

        let titles = controller
            .books()
            .into_iter()
            .map(|b| b.title)
            .collect::<Vec<_>>();
        assert_eq!(vec!["B".to_string()], titles);

        match controller.state() {
            SearchState::Settled { query, .. } => assert_eq!("b", query),
            other => panic!("unexpected state {:?}", other),
        }

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn in_order_responses_settle_on_latest() -> anyhow::Result<()> {
        let controller = controller(Delayed::new());

        tokio::join!(controller.search("b"), controller.search("a"));

        assert_eq!(
            vec!["A".to_string()],
            controller
                .books()
                .into_iter()
                .map(|b| b.title)
                .collect::<Vec<_>>()
        );

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn loading_while_in_flight() -> anyhow::Result<()> {
        let controller = Arc::new(controller(Delayed::new()));
        let mut rx = controller.subscribe();

        let handle = controller.spawn_search("a");

        rx.changed().await?;
        assert!(rx.borrow().is_loading());
        assert_eq!(SearchView::Loading, rx.borrow().view());

        handle.await?;
        assert!(!controller.is_loading());

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_searches_never_end_loading() -> anyhow::Result<()> {
        let controller = Arc::new(controller(Dune));

        for _ in 0..200 {
            let handles = vec![
                controller.spawn_search("dune"),
                controller.spawn_search("nothing here"),
            ];
            for handle in handles {
                handle.await?;
            }
            assert!(!controller.is_loading());
        }

        let handles = (0..200)
            .map(|i| controller.spawn_search(if i % 2 == 0 { "dune" } else { "nothing" }))
            .collect::<Vec<_>>();
        for handle in handles {
            handle.await?;
        }

        assert!(!controller.is_loading());
        match controller.state() {
            SearchState::Settled { .. } => {}
            other => panic!("unexpected state {:?}", other),
        }

        Ok(())
    }

    #[tokio::test]
    async fn failure_is_shown_as_message() -> anyhow::Result<()> {
        let controller = controller(Failing(Error::Network("offline".to_string())));

        controller.search("dune").await;

        assert_eq!(Some("offline".to_string()), controller.error_message());
        assert!(controller.books().is_empty());
        assert_eq!(
            SearchView::Failed("offline".to_string()),
            controller.state().view()
        );

        Ok(())
    }

    #[tokio::test]
    async fn empty_message_falls_back() -> anyhow::Result<()> {
        let controller = controller(Failing(Error::Unknown(String::new())));

        controller.search("dune").await;

        assert_eq!(Some(UNKNOWN_ERROR.to_string()), controller.error_message());

        Ok(())
    }

    #[tokio::test]
    async fn views_are_distinct() -> anyhow::Result<()> {
        let controller = controller(Dune);

        assert_eq!(SearchView::Idle, controller.state().view());

        controller.search("nothing here").await;
        assert_eq!(SearchView::Empty, controller.state().view());

        controller.search("dune").await;
        let state = controller.state();
        match state.view() {
            SearchView::Results(books) => assert_eq!(2, books.len()),
            other => panic!("unexpected view {:?}", other),
        }

        Ok(())
    }
}
