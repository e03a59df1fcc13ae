//! Opaque loadparm context
//!
//! Configuration is owned by an external service. RPC-facing code receives a
//! [`LoadParmContext`] from a [`LoadParmProvider`] and passes it through, or
//! uses its label to annotate errors. Nothing in this crate looks inside it.

use crate::error::{MiscError, Result};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Handle to configuration state owned by an external service
#[derive(Clone)]
pub struct LoadParmContext {
    label: Arc<str>,
    inner: Arc<dyn Any + Send + Sync>,
}

impl LoadParmContext {
    /// Wrap a provider's context value under a human-readable label
    /// (typically the configuration file it was loaded from).
    pub fn new<T: Any + Send + Sync>(label: impl Into<Arc<str>>, inner: T) -> Self {
        Self {
            label: label.into(),
            inner: Arc::new(inner),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Recover the provider's own type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Whether two handles refer to the same context instance
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Annotate an error with this context's label
    pub fn annotate(&self, err: MiscError) -> MiscError {
        MiscError::WithContext {
            context: self.label.to_string(),
            source: Box::new(err),
        }
    }
}

impl fmt::Debug for LoadParmContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadParmContext")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Source of loadparm contexts
pub trait LoadParmProvider {
    /// Return the current configuration context.
    ///
    /// Failures are reported as [`MiscError::ContextUnavailable`].
    fn get_context(&self) -> Result<LoadParmContext>;
}

impl<P: LoadParmProvider + ?Sized> LoadParmProvider for Arc<P> {
    fn get_context(&self) -> Result<LoadParmContext> {
        (**self).get_context()
    }
}

/// Provider that always hands out the same context
#[derive(Debug, Clone)]
pub struct StaticProvider {
    context: LoadParmContext,
}

impl StaticProvider {
    pub fn new(context: LoadParmContext) -> Self {
        Self { context }
    }
}

impl LoadParmProvider for StaticProvider {
    fn get_context(&self) -> Result<LoadParmContext> {
        Ok(self.context.clone())
    }
}
