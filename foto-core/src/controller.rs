//! Handler identifiers ("Controller@method") and the controller registry they resolve against.
//!
//! Controllers are registered at startup with a factory and a set of named actions.
//! Resolution is a map lookup: find the controller, instantiate it, then find the action
//! on the instance.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::container::Container;
use crate::response::Response;
use crate::CoreError;

/// Positional parameter values, in the order their `{name}` segments appear in the pattern.
pub type Params = Vec<String>;

const SEPARATOR: char = '@';

/// Parsed "Controller@method" handler string.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct HandlerId {
    pub controller: String,
    pub action: String,
}

impl FromStr for HandlerId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidHandler(s.to_owned());
        let (controller, action) = s.split_once(SEPARATOR).ok_or_else(invalid)?;
        if controller.is_empty() || action.is_empty() || action.contains(SEPARATOR) {
            return Err(invalid());
        }
        Ok(Self {
            controller: controller.to_owned(),
            action: action.to_owned(),
        })
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.controller, SEPARATOR, self.action)
    }
}

/// Action on a controller of type `T`: writes its output into the response.
pub type Action<T> = Box<dyn Fn(&T, &[String], &mut Response) + Send + Sync>;

/// A bound action ready to run on an instantiated controller.
pub type BoundAction<'c> = Box<dyn Fn(&[String], &mut Response) + 'c>;

/// A controller instance created for one dispatch.
pub trait ControllerInstance {
    fn action(&self, name: &str) -> Option<BoundAction<'_>>;
}

struct Bound<T> {
    controller: T,
    actions: Arc<HashMap<String, Action<T>>>,
}

impl<T: 'static> ControllerInstance for Bound<T> {
    fn action(&self, name: &str) -> Option<BoundAction<'_>> {
        let action = self.actions.get(name)?;
        Some(Box::new(move |params: &[String], response: &mut Response| {
            action(&self.controller, params, response)
        }))
    }
}

type Factory = Box<dyn Fn(&Container) -> Box<dyn ControllerInstance> + Send + Sync>;

/// Controller definition: name, factory and actions. Register via `registry.register(def)`.
pub struct ControllerDef<T> {
    name: String,
    factory: Box<dyn Fn(&Container) -> T + Send + Sync>,
    actions: HashMap<String, Action<T>>,
}

impl<T: 'static> ControllerDef<T> {
    pub fn new(name: &str, factory: impl Fn(&Container) -> T + Send + Sync + 'static) -> Self {
        Self {
            name: name.to_owned(),
            factory: Box::new(factory),
            actions: HashMap::new(),
        }
    }

    /// Add an action. A later action with the same name replaces the earlier one.
    pub fn action(
        mut self,
        name: &str,
        action: impl Fn(&T, &[String], &mut Response) + Send + Sync + 'static,
    ) -> Self {
        self.actions.insert(name.to_owned(), Box::new(action));
        self
    }
}

/// Controller name -> factory producing instances with their actions.
#[derive(Default)]
pub struct ControllerRegistry {
    controllers: HashMap<String, Factory>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self {
            controllers: HashMap::new(),
        }
    }

    pub fn register<T: 'static>(&mut self, def: ControllerDef<T>) -> &mut Self {
        let ControllerDef {
            name,
            factory,
            actions,
        } = def;
        let actions = Arc::new(actions);
        tracing::debug!(controller = %name, actions = actions.len(), "controller registered");
        self.controllers.insert(
            name,
            Box::new(move |container: &Container| {
                Box::new(Bound {
                    controller: factory(container),
                    actions: Arc::clone(&actions),
                }) as Box<dyn ControllerInstance>
            }),
        );
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.controllers.contains_key(name)
    }

    /// Instantiate the named controller, or None if it was never registered.
    pub fn instantiate(&self, name: &str, container: &Container) -> Option<Box<dyn ControllerInstance>> {
        self.controllers.get(name).map(|factory| factory(container))
    }
}
