//! DOM keyboard listeners bound to a `KeyTable`
//!
//! Unlike a fire-and-forget `Closure::forget`, the closures are owned here so
//! they can be removed again. Dropping `KeyListeners` detaches them.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{FocusEvent, KeyboardEvent, Window};

use super::KeyTable;

pub struct KeyListeners {
    window: Window,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
    keyup: Closure<dyn FnMut(KeyboardEvent)>,
    blur: Closure<dyn FnMut(FocusEvent)>,
}

impl KeyListeners {
    /// Start feeding `keys` from window key events
    pub fn attach(window: &Window, keys: Rc<KeyTable>) -> Result<Self, JsValue> {
        let keydown = {
            let keys = keys.clone();
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if keys.handle_code(&event.code(), true) {
                    // Arrow keys and space would scroll the page
                    event.prevent_default();
                }
            })
        };
        let keyup = {
            let keys = keys.clone();
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                keys.handle_code(&event.code(), false);
            })
        };
        let blur = Closure::<dyn FnMut(_)>::new(move |_event: FocusEvent| {
            keys.release_all();
        });

        window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        window.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;
        window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())?;
        log::info!("Key listeners attached");

        Ok(Self {
            window: window.clone(),
            keydown,
            keyup,
            blur,
        })
    }
}

impl Drop for KeyListeners {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("keydown", self.keydown.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("keyup", self.keyup.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("blur", self.blur.as_ref().unchecked_ref());
        log::info!("Key listeners detached");
    }
}
