//! Completion-tracking response body
//!
//! The audit stage must not start until the transport has consumed the whole
//! response. [`CompletionBody`] forwards every frame unchanged and hands the
//! pending audit to the runtime once polling the inner body yields its end,
//! empty bodies included. A body dropped before that point (client went
//! away) never triggers the audit.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::{Body, Bytes};
use http_body::{Body as HttpBody, Frame, SizeHint};
use sprint_service::{AuditContext, Auditor};
use tracing::debug;

use super::scope::AuditScope;

/// Everything needed to finish one invocation's audit once delivery completes
pub(crate) struct PendingAudit {
    pub(crate) auditor: Arc<Auditor>,
    pub(crate) context: AuditContext,
    pub(crate) scope: AuditScope,
}

impl PendingAudit {
    fn start(self) {
        let scratch = self.scope.take();
        // The handle is intentionally not awaited.
        let _ = self.auditor.spawn(self.context, scratch);
    }
}

pub(crate) struct CompletionBody {
    inner: Body,
    pending: Option<PendingAudit>,
}

impl CompletionBody {
    pub(crate) fn new(inner: Body, pending: PendingAudit) -> Self {
        Self {
            inner,
            pending: Some(pending),
        }
    }

    fn complete(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.start();
        }
    }
}

impl HttpBody for CompletionBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        let polled = Pin::new(&mut this.inner).poll_frame(cx);

        match &polled {
            Poll::Ready(None) => this.complete(),
            Poll::Ready(Some(Err(e))) => {
                debug!(error = %e, "Response body failed; audit skipped");
                this.pending = None;
            }
            _ => {}
        }

        polled
    }

    /// Never reports the end while an audit is pending, so the transport
    /// keeps polling until the inner body yields its terminal `None`.
    fn is_end_stream(&self) -> bool {
        self.pending.is_none() && self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

impl Drop for CompletionBody {
    fn drop(&mut self) {
        if self.pending.is_some() {
            debug!("Response body dropped before completion; audit skipped");
        }
    }
}
