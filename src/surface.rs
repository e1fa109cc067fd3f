//! The form surface capability: the narrow interface the mapper drives.
//!
//! Real browser adapters live outside this crate; [`TraceSurface`] is the
//! shipped double for tests and dry runs.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tracing::info;

/// A failure reported by the surface: element not found, timeout, or any
/// driver-level problem. The mapper wraps it with the field and selector.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct SurfaceError {
    message: String,
}

impl SurfaceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn not_found(selector: &str) -> Self {
        Self::new(format!("no element matches '{selector}'"))
    }

    pub fn timeout(selector: &str) -> Self {
        Self::new(format!("timed out waiting for '{selector}'"))
    }
}

/// Live form state against which field interactions are performed.
///
/// Every method is a suspension point; interactions within one scenario are
/// strictly ordered by the caller. Implementations own their timeouts and
/// report them as [`SurfaceError`]; the core never retries.
#[allow(async_fn_in_trait)]
pub trait FormSurface {
    /// Navigate to a URL.
    async fn goto(&self, url: &str) -> Result<(), SurfaceError>;

    /// Set a text control's value to the raw string.
    async fn set_text(&self, selector: &str, value: &str) -> Result<(), SurfaceError>;

    /// Choose the select option whose underlying value matches.
    async fn choose_by_value(&self, selector: &str, value: &str) -> Result<(), SurfaceError>;

    /// Choose the select option whose display label matches.
    async fn choose_by_label(&self, selector: &str, label: &str) -> Result<(), SurfaceError>;

    /// Check a checkbox or radio control. Re-checking is a no-op.
    async fn set_checked(&self, selector: &str) -> Result<(), SurfaceError>;

    /// Click an element.
    async fn click(&self, selector: &str) -> Result<(), SurfaceError>;

    /// Visible text content of an element.
    async fn get_text(&self, selector: &str) -> Result<String, SurfaceError>;

    /// Whether an element is currently visible.
    async fn is_visible(&self, selector: &str) -> Result<bool, SurfaceError>;

    /// Focus an element.
    async fn focus(&self, selector: &str) -> Result<(), SurfaceError>;
}

/// One recorded surface interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Goto { url: String },
    SetText { selector: String, value: String },
    ChooseByValue { selector: String, value: String },
    ChooseByLabel { selector: String, label: String },
    SetChecked { selector: String },
    Click { selector: String },
    Focus { selector: String },
}

/// A surface that records every interaction and logs it, instead of driving
/// a browser. Canned text and visibility can be staged per selector;
/// selectors registered via [`fail_on`](Self::fail_on) report a lookup
/// failure, for exercising error propagation.
#[derive(Debug, Default)]
pub struct TraceSurface {
    ops: Mutex<Vec<SurfaceOp>>,
    texts: Mutex<HashMap<String, String>>,
    hidden: Mutex<HashSet<String>>,
    failing: Mutex<HashSet<String>>,
}

impl TraceSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage the text returned by `get_text` for a selector.
    pub fn with_text(self, selector: impl Into<String>, text: impl Into<String>) -> Self {
        self.texts
            .lock()
            .unwrap()
            .insert(selector.into(), text.into());
        self
    }

    /// Mark a selector as not visible.
    pub fn with_hidden(self, selector: impl Into<String>) -> Self {
        self.hidden.lock().unwrap().insert(selector.into());
        self
    }

    /// Make every interaction with a selector fail as element-not-found.
    pub fn fail_on(self, selector: impl Into<String>) -> Self {
        self.failing.lock().unwrap().insert(selector.into());
        self
    }

    /// All interactions recorded so far, in order.
    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.ops.lock().unwrap().clone()
    }

    fn record(&self, op: SurfaceOp) -> Result<(), SurfaceError> {
        let selector = match &op {
            SurfaceOp::Goto { .. } => None,
            SurfaceOp::SetText { selector, .. }
            | SurfaceOp::ChooseByValue { selector, .. }
            | SurfaceOp::ChooseByLabel { selector, .. }
            | SurfaceOp::SetChecked { selector }
            | SurfaceOp::Click { selector }
            | SurfaceOp::Focus { selector } => Some(selector.clone()),
        };
        if let Some(ref sel) = selector {
            if self.failing.lock().unwrap().contains(sel) {
                return Err(SurfaceError::not_found(sel));
            }
        }
        self.ops.lock().unwrap().push(op);
        Ok(())
    }
}

impl FormSurface for TraceSurface {
    async fn goto(&self, url: &str) -> Result<(), SurfaceError> {
        info!("goto: {url}");
        self.record(SurfaceOp::Goto { url: url.into() })
    }

    async fn set_text(&self, selector: &str, value: &str) -> Result<(), SurfaceError> {
        info!("set_text: {selector} = '{value}'");
        self.record(SurfaceOp::SetText {
            selector: selector.into(),
            value: value.into(),
        })
    }

    async fn choose_by_value(&self, selector: &str, value: &str) -> Result<(), SurfaceError> {
        info!("choose_by_value: {selector} = '{value}'");
        self.record(SurfaceOp::ChooseByValue {
            selector: selector.into(),
            value: value.into(),
        })
    }

    async fn choose_by_label(&self, selector: &str, label: &str) -> Result<(), SurfaceError> {
        info!("choose_by_label: {selector} = '{label}'");
        self.record(SurfaceOp::ChooseByLabel {
            selector: selector.into(),
            label: label.into(),
        })
    }

    async fn set_checked(&self, selector: &str) -> Result<(), SurfaceError> {
        info!("set_checked: {selector}");
        self.record(SurfaceOp::SetChecked {
            selector: selector.into(),
        })
    }

    async fn click(&self, selector: &str) -> Result<(), SurfaceError> {
        info!("click: {selector}");
        self.record(SurfaceOp::Click {
            selector: selector.into(),
        })
    }

    async fn get_text(&self, selector: &str) -> Result<String, SurfaceError> {
        if self.failing.lock().unwrap().contains(selector) {
            return Err(SurfaceError::not_found(selector));
        }
        Ok(self
            .texts
            .lock()
            .unwrap()
            .get(selector)
            .cloned()
            .unwrap_or_default())
    }

    async fn is_visible(&self, selector: &str) -> Result<bool, SurfaceError> {
        Ok(!self.hidden.lock().unwrap().contains(selector))
    }

    async fn focus(&self, selector: &str) -> Result<(), SurfaceError> {
        self.record(SurfaceOp::Focus {
            selector: selector.into(),
        })
    }
}
