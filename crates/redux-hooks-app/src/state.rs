use std::rc::Rc;

use crate::app_config::AppConfig;

/// Profile state held by the store
///
/// `name` is shared so that a selector can hand out the same `Rc` for as long
/// as the name is untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileState {
    pub name: Rc<str>,
    pub age: u32,
}

impl ProfileState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            name: Rc::from(config.initial_name.as_str()),
            age: config.initial_age,
        }
    }
}

impl Default for ProfileState {
    fn default() -> Self {
        Self {
            name: Rc::from(""),
            age: 0,
        }
    }
}
