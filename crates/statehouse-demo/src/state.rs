//! Application State

use std::rc::Rc;

use statehouse::ShallowEq;

#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: u32,
    pub title: String,
    pub done: bool,
}

/// Which todos the list shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.done,
            Filter::Completed => todo.done,
        }
    }
}

impl ShallowEq for Filter {
    fn shallow_eq(&self, other: &Self) -> bool {
        self == other
    }
}

/// Application state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoState {
    pub todos: Rc<Vec<Todo>>,
    pub filter: Filter,
}
