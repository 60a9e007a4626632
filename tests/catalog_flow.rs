//! Drives the plugin's event handler and the filter worker together, the way
//! the Zellij shim wires them, without a host.

use serde_json::json;
use zcatalog::catalog::Collection;
use zcatalog::countdown::{CountdownState, ManualTicker, TickSource};
use zcatalog::worker::{CatalogWorker, WorkerMessage, WorkerResponse};
use zcatalog::{handle_event, initialize, Action, AppState, Config, Event, InputMode, SearchFocus};

struct Harness {
    state: AppState,
    worker: CatalogWorker,
    ticker: ManualTicker,
}

impl Harness {
    fn new() -> Self {
        let ticker = ManualTicker::new();
        Self {
            state: initialize(&Config::default(), Box::new(ticker.clone())),
            worker: CatalogWorker::default(),
            ticker,
        }
    }

    /// Handles `event` and returns the messages it would post to the worker.
    fn send(&mut self, event: Event) -> Vec<WorkerMessage> {
        let (_, actions) = handle_event(&mut self.state, &event).unwrap();
        actions
            .into_iter()
            .filter_map(|action| match action {
                Action::PostToWorker(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Runs `message` on the worker, as the worker thread would, and returns its reply.
    fn work(&mut self, message: WorkerMessage) -> WorkerResponse {
        // Messages cross the thread boundary as JSON.
        let payload = serde_json::to_string(&message).unwrap();
        let message = serde_json::from_str(&payload).unwrap();
        self.worker.handle_message(message)
    }

    fn deliver(&mut self, response: WorkerResponse) {
        handle_event(&mut self.state, &Event::WorkerResponse(response)).unwrap();
    }

    /// Runs every message to completion, in order.
    fn settle(&mut self, messages: Vec<WorkerMessage>) {
        for message in messages {
            let response = self.work(message);
            self.deliver(response);
        }
    }

    fn load(&mut self, products: serde_json::Value, users: serde_json::Value) {
        let (_, actions) = handle_event(&mut self.state, &Event::PermissionsGranted).unwrap();
        assert_eq!(actions.len(), 2);

        self.send(Event::CollectionFetched {
            collection: Collection::Items,
            status: 200,
            body: json!({ "products": products }).to_string().into_bytes(),
        });
        let messages = self.send(Event::CollectionFetched {
            collection: Collection::Owners,
            status: 200,
            body: json!({ "users": users }).to_string().into_bytes(),
        });
        self.settle(messages);
    }

    fn type_query(&mut self, text: &str) -> Vec<WorkerMessage> {
        text.chars().flat_map(|c| self.send(Event::Char(c))).collect()
    }

    fn result_titles(&self) -> Vec<String> {
        self.state
            .engine
            .results()
            .iter()
            .map(|item| item.title.clone())
            .collect()
    }
}

fn sample_products() -> serde_json::Value {
    json!([
        { "id": 1, "title": "Red Shoes", "description": "Comfortable running shoes", "images": ["https://img/1.png"] },
        { "id": 2, "title": "Blue Lamp", "description": "Desk lamp", "thumbnail": "https://img/2.png" },
        { "id": 3, "title": "Green Tea", "description": "Loose leaf tea" },
    ])
}

fn sample_users() -> serde_json::Value {
    json!([
        { "id": 1, "firstName": "Ann", "lastName": "Lee", "image": "https://img/u1.png" },
        { "id": 2, "firstName": "Bob", "lastName": "Reed" },
        { "id": 3, "firstName": "Cy", "lastName": "Moss" },
    ])
}

fn loaded_harness() -> Harness {
    let mut harness = Harness::new();
    harness.load(sample_products(), sample_users());
    harness
}

#[test]
fn catalog_loads_and_reaches_the_worker() {
    let harness = loaded_harness();

    assert!(harness.state.store.is_ready());
    assert!(!harness.state.store.is_loading());
    assert!(harness.state.search_enabled());
    assert_eq!(harness.result_titles(), vec!["Red Shoes", "Blue Lamp", "Green Tea"]);
}

#[test]
fn owner_first_name_matches() {
    let mut harness = Harness::new();
    harness.load(
        json!([{ "id": "1", "title": "Red Shoes" }]),
        json!([{ "id": 1, "firstName": "Ann", "lastName": "" }]),
    );

    harness.send(Event::SearchMode);
    let messages = harness.type_query("ann");
    harness.settle(messages);

    assert_eq!(harness.result_titles(), vec!["Red Shoes"]);
    assert!(!harness.state.engine.is_computing());
}

#[test]
fn search_matches_title_description_and_last_name() {
    let mut harness = loaded_harness();
    harness.send(Event::SearchMode);

    let messages = harness.type_query("ree");
    harness.settle(messages);

    // "Green Tea" by title, "Blue Lamp" through its owner Bob Reed.
    assert_eq!(harness.result_titles(), vec!["Blue Lamp", "Green Tea"]);
}

#[test]
fn stale_result_never_wins() {
    let mut harness = loaded_harness();
    harness.send(Event::SearchMode);

    let first = harness.send(Event::Char('t'));
    let second = harness.send(Event::Char('e'));
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);

    let first_response = harness.work(first.into_iter().next().unwrap());
    let second_response = harness.work(second.into_iter().next().unwrap());

    // The newer query finishes first; the older one arrives late.
    harness.deliver(second_response);
    assert_eq!(harness.result_titles(), vec!["Green Tea"]);

    harness.deliver(first_response);
    assert_eq!(harness.result_titles(), vec!["Green Tea"]);
    assert_eq!(harness.state.engine.query(), "te");
}

#[test]
fn dead_query_growth_skips_the_worker() {
    let mut harness = loaded_harness();
    harness.send(Event::SearchMode);

    let messages = harness.type_query("zz");
    harness.settle(messages);
    assert!(harness.result_titles().is_empty());

    let messages = harness.type_query("z");
    assert!(messages.is_empty());
    assert!(harness.result_titles().is_empty());
    assert!(!harness.state.engine.is_computing());
}

#[test]
fn clearing_the_query_restores_everything_synchronously() {
    let mut harness = loaded_harness();
    harness.send(Event::SearchMode);

    let messages = harness.type_query("la");
    harness.settle(messages);
    assert_eq!(harness.result_titles(), vec!["Blue Lamp"]);

    assert!(harness.send(Event::Backspace).len() == 1);
    let messages = harness.send(Event::Backspace);
    assert!(messages.is_empty());
    assert_eq!(harness.result_titles().len(), 3);
    assert!(!harness.state.engine.is_computing());
}

#[test]
fn likes_follow_the_selection() {
    let mut harness = loaded_harness();

    harness.send(Event::KeyDown);
    harness.send(Event::ToggleLike);
    assert!(harness.state.likes.is_liked("2"));
    assert!(!harness.state.likes.is_liked("1"));

    harness.send(Event::ToggleLike);
    assert!(!harness.state.likes.is_liked("2"));
}

#[test]
fn search_navigation_and_exit_keep_the_query() {
    let mut harness = loaded_harness();
    harness.send(Event::SearchMode);
    let messages = harness.type_query("e");
    harness.settle(messages);

    harness.send(Event::FocusResults);
    assert_eq!(harness.state.input_mode, InputMode::Search(SearchFocus::Navigating));

    harness.send(Event::ExitSearch);
    assert_eq!(harness.state.input_mode, InputMode::Normal);
    assert_eq!(harness.state.engine.query(), "e");
}

#[test]
fn failed_fetch_leaves_search_disabled() {
    let mut harness = Harness::new();
    handle_event(&mut harness.state, &Event::PermissionsGranted).unwrap();

    harness.send(Event::CollectionFetched {
        collection: Collection::Owners,
        status: 500,
        body: b"oops".to_vec(),
    });

    assert!(!harness.state.store.is_loading());
    assert!(!harness.state.store.is_ready());
    assert!(harness.send(Event::SearchMode).is_empty());
    assert_eq!(harness.state.input_mode, InputMode::Normal);
}

#[test]
fn countdown_runs_on_timer_events() {
    let mut harness = loaded_harness();

    harness.send(Event::CountdownPressed);
    assert_eq!(harness.ticker.starts(), 1);

    for _ in 0..3 {
        harness.send(Event::Timer);
    }
    assert_eq!(harness.state.countdown.remaining(), 7);

    harness.send(Event::CountdownPressed);
    harness.send(Event::Timer);
    assert_eq!(harness.state.countdown.state(), CountdownState::Paused);
    assert_eq!(harness.state.countdown.remaining(), 7);

    harness.send(Event::CountdownPressed);
    for _ in 0..7 {
        harness.send(Event::Timer);
    }
    assert_eq!(harness.state.countdown.state(), CountdownState::Finished);
    assert!(!harness.ticker.is_running());
}
