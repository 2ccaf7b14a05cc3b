use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::builtins;
use crate::object::Object;

#[derive(Debug, PartialEq)]
pub struct EnvironmentCore {
    store: HashMap<Rc<str>, Rc<Object>>,
    outer: Option<Environment>,
}

/// Cheap-to-clone handle on one scope frame. Frames chain through `outer`
/// up to the global scope; closures keep their defining frame alive by
/// holding one of these handles.
#[derive(Debug, Clone)]
pub struct Environment {
    core: Rc<RefCell<EnvironmentCore>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            core: Rc::new(RefCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: None,
            })),
        }
    }

    pub fn new_enclosed(outer: Environment) -> Environment {
        Environment {
            core: Rc::new(RefCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: Some(outer),
            })),
        }
    }

    /// Innermost binding wins; the fixed builtin registry is consulted only
    /// after the whole chain misses, so user bindings may shadow builtins.
    pub fn get(&self, name: &str) -> Option<Rc<Object>> {
        let core = self.core.borrow();
        core.store
            .get(name)
            .cloned()
            .or_else(|| core.outer.as_ref().and_then(|outer| outer.get(name)))
            .or_else(|| builtins::lookup(name))
    }

    /// Binds in this frame only, shadowing any outer binding of `name`.
    pub fn set(&mut self, name: Rc<str>, value: Rc<Object>) {
        self.core.borrow_mut().store.insert(name, value);
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }
}

impl PartialEq for Environment {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
