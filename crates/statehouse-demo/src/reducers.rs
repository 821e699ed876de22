use std::rc::Rc;

use statehouse::{reducer, Handlers, Reducer};

use crate::actions::TodoAction;
use crate::state::{Filter, Todo};

type Todos = Rc<Vec<Todo>>;

/// Reducer for the todo list
///
/// Every handler returns the same `Rc` when the action turns out to be a
/// no-op, so the whole state keeps its reference too.
pub fn todos_reducer() -> Reducer<Todos, TodoAction> {
    Handlers::new()
        .on("todos/add", add_todo)
        .on("todos/toggle", toggle_todo)
        .on("todos/clear_completed", clear_completed)
        .into_reducer()
}

/// Reducer for the list filter
pub fn filter_reducer() -> Reducer<Filter, TodoAction> {
    reducer(|filter: &Filter, action: &TodoAction| match action {
        TodoAction::SetFilter(next) => *next,
        _ => *filter,
    })
}

fn add_todo(todos: &Todos, action: &TodoAction) -> Todos {
    let TodoAction::Add(title) = action else {
        return Rc::clone(todos);
    };

    let title = title.trim();
    if title.is_empty() {
        log::warn!("Ignoring todo with empty title");
        return Rc::clone(todos);
    }

    let id = todos.iter().map(|todo| todo.id).max().map_or(1, |max| max + 1);
    let mut next = (**todos).clone();
    next.push(Todo {
        id,
        title: title.to_string(),
        done: false,
    });
    Rc::new(next)
}

fn toggle_todo(todos: &Todos, action: &TodoAction) -> Todos {
    let TodoAction::Toggle(id) = action else {
        return Rc::clone(todos);
    };

    if !todos.iter().any(|todo| todo.id == *id) {
        log::debug!("No todo with id {}", id);
        return Rc::clone(todos);
    }

    let next = todos
        .iter()
        .map(|todo| {
            if todo.id == *id {
                Todo {
                    done: !todo.done,
                    ..todo.clone()
                }
            } else {
                todo.clone()
            }
        })
        .collect();
    Rc::new(next)
}

fn clear_completed(todos: &Todos, _action: &TodoAction) -> Todos {
    if !todos.iter().any(|todo| todo.done) {
        return Rc::clone(todos);
    }
    Rc::new(todos.iter().filter(|todo| !todo.done).cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn todos(items: &[(&str, bool)]) -> Todos {
        Rc::new(
            items
                .iter()
                .enumerate()
                .map(|(i, (title, done))| Todo {
                    id: i as u32 + 1,
                    title: title.to_string(),
                    done: *done,
                })
                .collect(),
        )
    }

    #[test]
    fn test_add_assigns_next_id() {
        let reduce = todos_reducer();
        let next = reduce(&todos(&[("a", false)]), &TodoAction::Add(" b ".to_string()));

        assert_eq!(next.len(), 2);
        assert_eq!(next[1].id, 2);
        assert_eq!(next[1].title, "b");
    }

    #[test]
    fn test_add_empty_title_is_ignored() {
        let reduce = todos_reducer();
        let current = todos(&[("a", false)]);

        let next = reduce(&current, &TodoAction::Add("   ".to_string()));
        assert!(Rc::ptr_eq(&current, &next));
    }

    #[test]
    fn test_toggle() {
        let reduce = todos_reducer();
        let current = todos(&[("a", false), ("b", false)]);

        let next = reduce(&current, &TodoAction::Toggle(2));
        assert!(next[1].done);
        assert!(!next[0].done);

        let unknown = reduce(&current, &TodoAction::Toggle(9));
        assert!(Rc::ptr_eq(&current, &unknown));
    }

    #[test]
    fn test_clear_completed() {
        let reduce = todos_reducer();
        let current = todos(&[("a", true), ("b", false)]);

        let next = reduce(&current, &TodoAction::ClearCompleted);
        assert_eq!(next.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(), vec!["b"]);

        let again = reduce(&next, &TodoAction::ClearCompleted);
        assert!(Rc::ptr_eq(&next, &again));
    }

    #[test]
    fn test_filter_reducer() {
        let reduce = filter_reducer();
        assert_eq!(reduce(&Filter::All, &TodoAction::SetFilter(Filter::Active)), Filter::Active);
        assert_eq!(reduce(&Filter::Completed, &TodoAction::Toggle(1)), Filter::Completed);
    }
}
