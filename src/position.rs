use js_sys::Reflect;
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

/// How absolute positions are written to an element's inline style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementMode {
    /// Hardware-accelerated transform; the translateZ(0) forces the element
    /// onto its own compositing layer.
    Translate,
    /// Plain left/top offsets. Always available.
    Offset,
}

impl PlacementMode {
    pub fn from_probe(supports_transform: bool) -> Self {
        if supports_transform {
            Self::Translate
        } else {
            Self::Offset
        }
    }

    /// The CSS declarations this mode writes for a position. Exactly one mode
    /// fires per invocation: `Translate` touches only the transform property,
    /// `Offset` touches only left/top.
    pub fn declarations(&self, x: f64, y: f64) -> Vec<(&'static str, String)> {
        match self {
            Self::Translate => {
                vec![("transform", format!("translate({x}px, {y}px) translateZ(0)"))]
            }
            Self::Offset => vec![("left", format!("{x}px")), ("top", format!("{y}px"))],
        }
    }
}

/// Positions elements with a strategy selected once at construction.
///
/// The capability probe runs in `detect`; every later `place` call reuses the
/// bound mode instead of re-probing. The strategy travels as an explicit
/// value, handed to whatever component needs to position elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Positioner {
    mode: PlacementMode,
}

impl Positioner {
    pub fn new(mode: PlacementMode) -> Self {
        Self { mode }
    }

    /// Probes the document root's style object once for transform support and
    /// binds the winning mode.
    pub fn detect(document: &Document) -> Self {
        Self::new(PlacementMode::from_probe(supports_transform(document)))
    }

    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    /// Moves `element` to `(x, y)` using the bound mode. Idempotent: placing
    /// twice at the same point leaves the same inline style.
    pub fn place(&self, element: &HtmlElement, x: f64, y: f64) -> Result<(), JsValue> {
        let style = element.style();
        for (property, value) in self.mode.declarations(x, y) {
            style.set_property(property, &value)?;
        }
        Ok(())
    }
}

/// `'transform' in documentElement.style`, with the legacy vendor-prefixed
/// property as fallback.
fn supports_transform(document: &Document) -> bool {
    let Some(root) = document.document_element() else {
        return false;
    };
    let Ok(root) = root.dyn_into::<HtmlElement>() else {
        return false;
    };
    let style = JsValue::from(root.style());
    ["transform", "webkitTransform"].iter().any(|property| {
        Reflect::has(&style, &JsValue::from_str(property)).unwrap_or(false)
    })
}
