use std::rc::Rc;

use statehouse::{create_compound_selector, create_selector, Selector};

use crate::state::{Filter, Todo, TodoState};

type State = Rc<TodoState>;

/// Derived views of the todo list
///
/// `visible` and `remaining` only recompute when the todo list or the filter
/// actually changed, so their results keep their reference otherwise.
#[derive(Debug, Clone)]
pub struct TodoSelectors {
    pub todos: Selector<State, Rc<Vec<Todo>>>,
    pub filter: Selector<State, Filter>,
    pub visible: Selector<State, Rc<Vec<Todo>>>,
    pub remaining: Selector<State, usize>,
}

impl TodoSelectors {
    pub fn new() -> Self {
        let todos = create_selector(|state: &State| Rc::clone(&state.todos));
        let filter = create_selector(|state: &State| state.filter);

        let visible = create_compound_selector(
            (todos.clone(), filter.clone()),
            |(todos, filter): (Rc<Vec<Todo>>, Filter)| {
                log::trace!("recomputing visible todos for {:?}", filter);
                Rc::new(
                    todos
                        .iter()
                        .filter(|todo| filter.matches(todo))
                        .cloned()
                        .collect::<Vec<_>>(),
                )
            },
        );

        let remaining = create_compound_selector((todos.clone(),), |(todos,): (Rc<Vec<Todo>>,)| {
            todos.iter().filter(|todo| !todo.done).count()
        });

        Self {
            todos,
            filter,
            visible,
            remaining,
        }
    }
}

impl Default for TodoSelectors {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state() -> State {
        Rc::new(TodoState {
            todos: Rc::new(vec![
                Todo {
                    id: 1,
                    title: "a".to_string(),
                    done: true,
                },
                Todo {
                    id: 2,
                    title: "b".to_string(),
                    done: false,
                },
            ]),
            filter: Filter::All,
        })
    }

    #[test]
    fn test_visible_respects_filter() {
        let selectors = TodoSelectors::new();
        let all = state();
        let active = Rc::new(TodoState {
            filter: Filter::Active,
            ..(*all).clone()
        });

        assert_eq!(selectors.visible.select(&all).len(), 2);
        assert_eq!(selectors.visible.select(&active)[0].title, "b");
        assert_eq!(selectors.remaining.select(&active), 1);
    }

    #[test]
    fn test_visible_keeps_reference_for_equal_inputs() {
        let selectors = TodoSelectors::new();
        let first_state = state();
        // new state, same todos and filter
        let second_state = Rc::new((*first_state).clone());

        let first = selectors.visible.select(&first_state);
        let second = selectors.visible.select(&second_state);
        assert!(Rc::ptr_eq(&first, &second));
    }
}
