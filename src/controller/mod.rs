//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that turns key presses
//! into model operations. It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `actions`: Search, pagination, detail and favorites actions

mod input;
mod actions;

use std::sync::Arc;

use crate::model::AppModel;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<AppModel>,
}

impl AppController {
    pub fn new(model: Arc<AppModel>) -> Self {
        Self { model }
    }
}
