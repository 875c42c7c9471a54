//! Bound callback factory for JS event handlers.
//!
//! `callback(receiver, "some_method", &bound_args)` returns a value that,
//! when invoked with call-time arguments, calls the method against the
//! receiver with `bound_args ++ call_time_args`. Binding never fails; a
//! missing or non-callable method surfaces at invocation time.

use js_sys::{Array, Function, Reflect};
use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("no method named '{0}' on receiver")]
    MethodNotFound(String),
    #[error("property '{0}' on receiver is not callable")]
    NotCallable(String),
    #[error("callback invocation failed: {0}")]
    Invocation(String),
}

/// What a callback invokes: a method looked up by name on the receiver at
/// invocation time, or a direct function (the receiver still becomes `this`).
#[derive(Debug, Clone)]
pub enum Target {
    Method(String),
    Function(Function),
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::Method(name.to_string())
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Target::Method(name)
    }
}

impl From<Function> for Target {
    fn from(function: Function) -> Self {
        Target::Function(function)
    }
}

/// A callable bound to a receiver with a fixed prefix of arguments.
#[derive(Debug, Clone)]
pub struct BoundCallback {
    receiver: JsValue,
    target: Target,
    bound: Vec<JsValue>,
}

/// Binds `target` to `receiver` with leading arguments. Never fails; target
/// resolution happens on each invocation.
pub fn callback(receiver: &JsValue, target: impl Into<Target>, bound: &[JsValue]) -> BoundCallback {
    BoundCallback {
        receiver: receiver.clone(),
        target: target.into(),
        bound: bound.to_vec(),
    }
}

impl BoundCallback {
    /// Invokes the target with `bound ++ args` and the receiver as `this`.
    pub fn invoke(&self, args: &[JsValue]) -> Result<JsValue, CallbackError> {
        let function = self.resolve()?;
        let all_args = Array::new();
        for value in self.bound.iter().chain(args) {
            all_args.push(value);
        }
        function
            .apply(&self.receiver, &all_args)
            .map_err(|e| CallbackError::Invocation(format!("{e:?}")))
    }

    fn resolve(&self) -> Result<Function, CallbackError> {
        match &self.target {
            Target::Function(function) => Ok(function.clone()),
            Target::Method(name) => {
                let value = Reflect::get(&self.receiver, &JsValue::from_str(name))
                    .map_err(|_| CallbackError::MethodNotFound(name.clone()))?;
                if value.is_undefined() || value.is_null() {
                    return Err(CallbackError::MethodNotFound(name.clone()));
                }
                value
                    .dyn_into::<Function>()
                    .map_err(|_| CallbackError::NotCallable(name.clone()))
            }
        }
    }

    /// Wraps the callback for `addEventListener`; the event object arrives as
    /// the trailing call-time argument. Invocation failures are logged, not
    /// propagated, since event dispatch has no caller to hand them to. The
    /// caller `forget`s the closure when the listener must outlive its scope.
    pub fn into_event_handler(self) -> Closure<dyn FnMut(JsValue)> {
        Closure::wrap(Box::new(move |event: JsValue| {
            if let Err(e) = self.invoke(&[event]) {
                web_sys::console::error_1(&JsValue::from_str(&format!(
                    "[CALLBACK] Handler failed: {e}"
                )));
            }
        }) as Box<dyn FnMut(JsValue)>)
    }
}
