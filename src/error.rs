use wasm_bindgen::JsValue;

/// Failures at the planner's outer boundaries.
///
/// Editing operations never fail; they report "nothing happened" through
/// their return value. These errors only arise when talking to the browser
/// or parsing external data.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// The canvas did not hand out a 2D rendering context.
    #[error("canvas 2D context is unavailable")]
    ContextUnavailable,
    /// A room snapshot, template, or config was not valid JSON of the
    /// expected shape.
    #[error("invalid planner data: {0}")]
    Data(#[from] serde_json::Error),
    /// A DOM call rejected.
    #[error("browser call failed: {0}")]
    Js(String),
}

impl PlannerError {
    /// Wrap a JavaScript exception value.
    #[must_use]
    pub fn js(value: &JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<PlannerError> for JsValue {
    fn from(err: PlannerError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
