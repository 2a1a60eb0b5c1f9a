//! Test double wrapping the in-memory service with scripted failures and call gating.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use super::{ContactService, InMemoryContactService, ServiceLatency};
use crate::errors::AppError;
use crate::models::{Contact, ContactFormData};

pub(crate) struct ScriptedService {
    inner: InMemoryContactService,
    fail: AtomicBool,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
    gate_reads: bool,
}

impl ScriptedService {
    pub(crate) fn seeded() -> Self {
        Self {
            inner: InMemoryContactService::seeded(ServiceLatency::none()),
            fail: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            gate: None,
            gate_reads: false,
        }
    }

    /// Every call waits for one `notify_one` on `gate` before it runs.
    pub(crate) fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            gate_reads: true,
            ..Self::seeded()
        }
    }

    /// Like `gated`, but `list` runs straight through.
    pub(crate) fn write_gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::seeded()
        }
    }

    pub(crate) fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn inner(&self) -> &InMemoryContactService {
        &self.inner
    }

    async fn before_call(&self, read: bool) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            if !read || self.gate_reads {
                gate.notified().await;
            }
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Transport("scripted failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ContactService for ScriptedService {
    async fn list(&self) -> Result<Vec<Contact>, AppError> {
        self.before_call(true).await?;
        self.inner.list().await
    }

    async fn create(&self, data: &ContactFormData) -> Result<Contact, AppError> {
        self.before_call(false).await?;
        self.inner.create(data).await
    }

    async fn update(&self, id: &str, data: &ContactFormData) -> Result<Contact, AppError> {
        self.before_call(false).await?;
        self.inner.update(id, data).await
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.before_call(false).await?;
        self.inner.delete(id).await
    }
}
