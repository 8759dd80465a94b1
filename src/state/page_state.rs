//! In-memory page backing the countdown display

use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use serde::{Deserialize, Serialize};

use crate::timer::{Page, PAUSE_SCREEN_ID, TIMER_ELEMENT_ID};

/// A page element: text content plus the `hidden` attribute
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub text: String,
    pub hidden: bool,
}

impl Element {
    pub fn visible(text: impl Into<String>) -> Self {
        Self { text: text.into(), hidden: false }
    }

    pub fn hidden() -> Self {
        Self { text: String::new(), hidden: true }
    }
}

/// Headless stand-in for the game page. Elements are looked up by id.
#[derive(Debug, Default)]
pub struct HeadlessPage {
    elements: Mutex<HashMap<String, Element>>,
}

impl HeadlessPage {
    /// Create a page with no elements
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a page with a clock element and a hidden pause overlay
    pub fn game_layout() -> Self {
        let page = Self::new();
        page.insert(TIMER_ELEMENT_ID, Element::visible(""));
        page.insert(PAUSE_SCREEN_ID, Element::hidden());
        page
    }

    /// Add or replace an element
    pub fn insert(&self, id: &str, element: Element) {
        self.lock().insert(id.to_string(), element);
    }

    /// Remove an element, returning it if it existed
    pub fn remove(&self, id: &str) -> Option<Element> {
        self.lock().remove(id)
    }

    /// Copy of an element
    pub fn get(&self, id: &str) -> Option<Element> {
        self.lock().get(id).cloned()
    }

    /// Text content of an element
    pub fn text(&self, id: &str) -> Option<String> {
        self.lock().get(id).map(|element| element.text.clone())
    }

    /// Set the `hidden` attribute. Returns `false` if no such element exists.
    pub fn set_hidden(&self, id: &str, hidden: bool) -> bool {
        match self.lock().get_mut(id) {
            Some(element) => {
                element.hidden = hidden;
                true
            }
            None => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Element>> {
        self.elements.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Page for HeadlessPage {
    fn set_text(&self, id: &str, text: &str) -> bool {
        match self.lock().get_mut(id) {
            Some(element) => {
                element.text.clear();
                element.text.push_str(text);
                true
            }
            None => false,
        }
    }

    fn is_hidden(&self, id: &str) -> Option<bool> {
        self.lock().get(id).map(|element| element.hidden)
    }
}
