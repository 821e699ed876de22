use std::rc::Rc;

use statehouse::{sub_field, Dispatcher, Store, StoreConfig};

use crate::actions::TodoAction;
use crate::reducers::{filter_reducer, todos_reducer};
use crate::state::TodoState;

pub type TodoStore = Store<Rc<TodoState>, TodoAction>;

/// Build the store with every slice reducer attached
pub fn build_store(initial_state: TodoState, config: &StoreConfig) -> TodoStore {
    let store = Store::from_config(Rc::new(initial_state), config);
    store.add_sub_reducer(sub_field!(TodoState, todos), todos_reducer());
    store.add_sub_reducer(sub_field!(TodoState, filter), filter_reducer());
    store
}

/// Thunk adding each title that is not on the list yet
///
/// The check reads fresh state before every dispatch, so duplicates inside
/// `titles` are skipped as well.
pub fn add_unique_todos(
    titles: Vec<String>,
) -> impl FnOnce(&Dispatcher<Rc<TodoState>, TodoAction>) {
    move |dispatcher| {
        for title in titles {
            let exists = dispatcher
                .get_state()
                .todos
                .iter()
                .any(|todo| todo.title == title);
            if exists {
                log::debug!("Skipping duplicate todo {:?}", title);
                continue;
            }
            dispatcher.dispatch(TodoAction::Add(title));
        }
    }
}

/// Thunk that finishes every open todo, one dispatch each
pub fn complete_all(dispatcher: &Dispatcher<Rc<TodoState>, TodoAction>) {
    let open: Vec<u32> = dispatcher
        .get_state()
        .todos
        .iter()
        .filter(|todo| !todo.done)
        .map(|todo| todo.id)
        .collect();

    for id in open {
        dispatcher.dispatch(TodoAction::Toggle(id));
    }
}
