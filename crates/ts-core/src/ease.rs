//! Easing functions: pure maps from normalized progress to eased progress.
//!
//! The scheduler never interprets an ease; it applies it to `t` in `[0, 1)`
//! and substitutes exactly `1.0` once a transition completes.

use std::fmt;
use std::sync::Arc;

/// A shared, named easing function.
#[derive(Clone)]
pub struct Ease {
    name: &'static str,
    f:    Arc<dyn Fn(f64) -> f64 + Send + Sync>,
}

impl Ease {
    /// Wrap an arbitrary easing function.
    pub fn custom<F>(name: &'static str, f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self { name, f: Arc::new(f) }
    }

    /// Identity ease: eased progress equals normalized progress.
    pub fn linear() -> Self {
        Self::custom("linear", |t| t)
    }

    /// Symmetric cubic ease; the conventional default for transitions.
    pub fn cubic_in_out() -> Self {
        Self::custom("cubic-in-out", |t| {
            let t = t * 2.0;
            if t <= 1.0 {
                t * t * t / 2.0
            } else {
                let t = t - 2.0;
                (t * t * t + 2.0) / 2.0
            }
        })
    }

    /// Apply the ease to `t`.
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        (self.f)(t)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for Ease {
    fn default() -> Self {
        Self::cubic_in_out()
    }
}

impl fmt::Debug for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Ease").field(&self.name).finish()
    }
}
