//! In-flight camera transitions and the handles returned to callers.
//!
//! A transition settles its completion exactly once: `Ok(())` when progress
//! reaches 1, `Err(Canceled)` when it is cancelled, superseded by a newer
//! transition, or dropped together with its animator.

use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use glam::Vec3;

use super::easing::ease_in_out_cubic;

pub use futures::channel::oneshot::Canceled;

/// Shared cancellation flag, checked by the animator every frame
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Observed state of a transition's completion signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStatus {
    Running,
    Finished,
    Cancelled,
}

/// Completion signal of one transition
///
/// Awaitable (`Output = Result<(), Canceled>`) or pollable without an
/// executor through [`Completion::status`].
#[derive(Debug)]
pub struct Completion {
    rx: oneshot::Receiver<()>,
    outcome: Option<Result<(), Canceled>>,
}

impl Completion {
    fn new(rx: oneshot::Receiver<()>) -> Self {
        Self { rx, outcome: None }
    }

    /// Non-blocking check; the first settled outcome is cached
    pub fn status(&mut self) -> TransitionStatus {
        if self.outcome.is_none() {
            match self.rx.try_recv() {
                Ok(Some(())) => self.outcome = Some(Ok(())),
                Ok(None) => {}
                Err(canceled) => self.outcome = Some(Err(canceled)),
            }
        }

        match self.outcome {
            None => TransitionStatus::Running,
            Some(Ok(())) => TransitionStatus::Finished,
            Some(Err(_)) => TransitionStatus::Cancelled,
        }
    }
}

impl Future for Completion {
    type Output = Result<(), Canceled>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if let Some(outcome) = self.outcome {
            return Poll::Ready(outcome);
        }

        let polled = Pin::new(&mut self.rx).poll(cx);
        if let Poll::Ready(outcome) = polled {
            self.outcome = Some(outcome);
        }
        polled
    }
}

/// What a caller gets back from every transition request
#[derive(Debug)]
pub struct TransitionHandle {
    pub completion: Completion,
    pub cancel: CancelToken,
}

impl TransitionHandle {
    /// Handle for a transition that already finished (immediate moves, no-ops)
    pub fn completed() -> Self {
        let (tx, rx) = oneshot::channel();
        // Receiver is alive, send cannot fail
        let _ = tx.send(());
        Self {
            completion: Completion::new(rx),
            cancel: CancelToken::new(),
        }
    }

    pub fn status(&mut self) -> TransitionStatus {
        self.completion.status()
    }

    /// Stop the transition at its current frame
    ///
    /// The animator notices on its next `tick`; until then [`status`](Self::status)
    /// stays `Running`.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

/// Camera position and orbit target at one instant of a transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSample {
    pub position: Vec3,
    pub target: Vec3,
    /// Linear progress in [0, 1]
    pub progress: f32,
    /// Progress after easing
    pub eased: f32,
}

/// Transition state owned by the animator while it runs
#[derive(Debug)]
pub(crate) struct ActiveTransition {
    start_position: Vec3,
    start_target: Vec3,
    end_position: Vec3,
    end_target: Vec3,
    start_ms: f64,
    duration_ms: f64,
    done: Option<oneshot::Sender<()>>,
    cancel: CancelToken,
}

impl ActiveTransition {
    /// Start a transition at `start_ms`, returning it with the caller's handle
    pub(crate) fn begin(
        from: (Vec3, Vec3),
        to: (Vec3, Vec3),
        start_ms: f64,
        duration_ms: f64,
    ) -> (Self, TransitionHandle) {
        let (tx, rx) = oneshot::channel();
        let cancel = CancelToken::new();

        let transition = Self {
            start_position: from.0,
            start_target: from.1,
            end_position: to.0,
            end_target: to.1,
            start_ms,
            duration_ms,
            done: Some(tx),
            cancel: cancel.clone(),
        };

        let handle = TransitionHandle {
            completion: Completion::new(rx),
            cancel,
        };

        (transition, handle)
    }

    /// `min(elapsed / duration, 1)`; a non-positive duration is already done
    pub(crate) fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }

        let elapsed = (now_ms - self.start_ms).max(0.0);
        (elapsed / self.duration_ms).min(1.0) as f32
    }

    pub(crate) fn sample(&self, now_ms: f64) -> TransitionSample {
        let progress = self.progress(now_ms);
        let eased = ease_in_out_cubic(progress);

        TransitionSample {
            position: self.start_position.lerp(self.end_position, eased),
            target: self.start_target.lerp(self.end_target, eased),
            progress,
            eased,
        }
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Settle the completion signal; later calls are no-ops
    pub(crate) fn finish(&mut self) {
        if let Some(tx) = self.done.take() {
            // Caller may have dropped the handle
            let _ = tx.send(());
        }
    }
}
