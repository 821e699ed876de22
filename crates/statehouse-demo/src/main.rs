use std::env;

use anyhow::Context;
use statehouse::{Action, StoreConfig};

mod actions;
mod app;
mod logging;
mod reducers;
mod selectors;
mod state;

use actions::TodoAction;
use app::{add_unique_todos, build_store, complete_all};
use selectors::TodoSelectors;
use state::{Filter, TodoState};

fn main() -> anyhow::Result<()> {
    // An explicit config path wins over the CWD/home lookup
    let config = match env::args().nth(1) {
        Some(path) => StoreConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => StoreConfig::load(),
    };

    logging::init(&config);
    log::info!("Starting statehouse-demo");

    let store = build_store(TodoState::default(), &config);
    let selectors = TodoSelectors::new();

    let render = selectors.clone();
    let unsubscribe = store.subscribe(move |state, action: &TodoAction| {
        let visible = render.visible.select(state);
        println!(
            "[{}] {} visible ({:?}), {} remaining",
            action.action_type(),
            visible.len(),
            render.filter.select(state),
            render.remaining.select(state)
        );
    });

    store.dispatch_thunk(add_unique_todos(vec![
        "buy milk".to_string(),
        "write docs".to_string(),
        "buy milk".to_string(),
        "fix the flaky test".to_string(),
    ]));
    store.dispatch(TodoAction::Toggle(1));
    store.dispatch(TodoAction::SetFilter(Filter::Active));
    store.dispatch(TodoAction::Add("   ".to_string()));

    let state = store.get_state();
    println!("Active todos:");
    for todo in selectors.visible.select(&state).iter() {
        println!("  #{} {}", todo.id, todo.title);
    }

    store.dispatch_thunk(complete_all);
    store.dispatch(TodoAction::SetFilter(Filter::Completed));
    store.dispatch(TodoAction::ClearCompleted);
    unsubscribe.unsubscribe();

    log::info!(
        "Exiting statehouse-demo with {} todos left",
        selectors.todos.select(&store.get_state()).len()
    );
    Ok(())
}
