//! In-memory host that records what an expression asks the animation engine to do.
//!
//! [`RecordingContext`] backs the CLI's `run` command and the test suite. Nothing is animated:
//! tweens are logged, and completion is signalled explicitly with [`RecordingContext::complete`]
//! or [`RecordingContext::complete_all`].

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::eval::{Continuation, EvalContext};
use crate::foundation::error::{AnimExprError, AnimExprResult};
use crate::tween::{ChannelKind, ChannelValues, Ease, Tween};

/// Cheap handle onto shared recorder state; clones observe the same recording.
///
/// Continuations waiting on incomplete tweens hold a clone of the context. Call
/// [`RecordingContext::discard_pending`] to drop them if the recording is abandoned.
#[derive(Clone, Default)]
pub struct RecordingContext {
    inner: Rc<RefCell<Recorder>>,
}

#[derive(Default)]
struct Recorder {
    aliases: BTreeMap<String, String>,
    variables: BTreeMap<String, f64>,
    known_objects: Option<BTreeSet<String>>,
    tweens: Vec<TweenRecord>,
    pending: Vec<(usize, Continuation)>,
    active: BTreeMap<String, bool>,
    callbacks: usize,
    events: Vec<TraceEvent>,
    variable_reads: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TweenRecord {
    pub id: usize,
    pub object: String,
    pub channel: ChannelKind,
    pub duration: f64,
    pub to: Option<Vec<f64>>,
    pub from: Option<StartValues>,
    pub delay: f64,
    pub animate: bool,
    pub ease: Option<String>,
    /// Number of `Then` bodies registered on this tween.
    pub continuations: usize,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StartValues {
    pub values: Vec<f64>,
    pub relative: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    Tween { id: usize },
    SetActive { object: String, active: bool },
    Callback,
    Completed { id: usize },
}

/// Serializable snapshot of everything recorded so far.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Trace {
    pub tweens: Vec<TweenRecord>,
    pub active: BTreeMap<String, bool>,
    pub callbacks: usize,
    pub events: Vec<TraceEvent>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alias(self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.inner
            .borrow_mut()
            .aliases
            .insert(name.into(), path.into());
        self
    }

    pub fn with_variable(self, name: impl Into<String>, value: f64) -> Self {
        self.inner
            .borrow_mut()
            .variables
            .insert(name.into(), value);
        self
    }

    /// Restrict resolution to these paths; any other object name fails with
    /// [`AnimExprError::Resolve`]. Without this every path resolves.
    pub fn with_objects<I, S>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let known = paths.into_iter().map(Into::into).collect();
        self.inner.borrow_mut().known_objects = Some(known);
        self
    }

    pub fn trace(&self) -> Trace {
        let rec = self.inner.borrow();
        Trace {
            tweens: rec.tweens.clone(),
            active: rec.active.clone(),
            callbacks: rec.callbacks,
            events: rec.events.clone(),
        }
    }

    pub fn tween(&self, id: usize) -> Option<TweenRecord> {
        self.inner.borrow().tweens.get(id).cloned()
    }

    pub fn tween_count(&self) -> usize {
        self.inner.borrow().tweens.len()
    }

    pub fn callback_count(&self) -> usize {
        self.inner.borrow().callbacks
    }

    pub fn is_active(&self, path: &str) -> Option<bool> {
        self.inner.borrow().active.get(path).copied()
    }

    /// Variable names looked up so far, in lookup order.
    pub fn variable_reads(&self) -> Vec<String> {
        self.inner.borrow().variable_reads.clone()
    }

    /// Ids of tweens that still have continuations waiting.
    pub fn pending(&self) -> Vec<usize> {
        let rec = self.inner.borrow();
        let mut ids: Vec<usize> = rec.pending.iter().map(|(id, _)| *id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Mark a tween finished and run its continuations in registration order.
    ///
    /// Returns `false` for an unknown or already completed tween.
    pub fn complete(&self, id: usize) -> AnimExprResult<bool> {
        let ready = {
            let mut rec = self.inner.borrow_mut();
            let Some(t) = rec.tweens.get_mut(id) else {
                return Ok(false);
            };
            if t.completed {
                return Ok(false);
            }
            t.completed = true;
            rec.events.push(TraceEvent::Completed { id });

            let (ready, waiting): (Vec<_>, Vec<_>) =
                std::mem::take(&mut rec.pending).into_iter().partition(|(t, _)| *t == id);
            rec.pending = waiting;
            ready
        };

        // Every continuation runs even if an earlier one fails; the first error is reported.
        tracing::debug!(id, continuations = ready.len(), "tween completed");
        let mut first_err = None;
        for (_, c) in ready {
            if let Err(e) = c.resume() {
                tracing::debug!(id, error = %e, "continuation failed");
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(true),
        }
    }

    /// Complete every playing tween, including ones started by continuations along the way,
    /// in creation order. Tweens with `Animate(false)` never play and are left alone.
    pub fn complete_all(&self) -> AnimExprResult<usize> {
        let mut done = 0usize;
        loop {
            let next = {
                let rec = self.inner.borrow();
                rec.tweens
                    .iter()
                    .find(|t| !t.completed && t.animate)
                    .map(|t| t.id)
            };
            let Some(id) = next else {
                return Ok(done);
            };
            self.complete(id)?;
            done += 1;
        }
    }

    pub fn discard_pending(&self) {
        let pending = std::mem::take(&mut self.inner.borrow_mut().pending);
        drop(pending);
    }

    fn with_tween(&self, id: usize, f: impl FnOnce(&mut TweenRecord)) {
        if let Some(t) = self.inner.borrow_mut().tweens.get_mut(id) {
            f(t);
        }
    }
}

impl EvalContext for RecordingContext {
    type Object = String;
    type Tween = RecordingTween;

    fn resolve_object(&self, name: &str) -> AnimExprResult<String> {
        let rec = self.inner.borrow();
        let path = rec.aliases.get(name).map_or(name, String::as_str);
        if let Some(known) = &rec.known_objects
            && !known.contains(path)
        {
            return Err(AnimExprError::resolve(format!(
                "no object at '{path}' (from name '{name}')"
            )));
        }
        Ok(path.to_owned())
    }

    fn resolve_variable(&self, name: &str) -> Option<f64> {
        let mut rec = self.inner.borrow_mut();
        rec.variable_reads.push(name.to_owned());
        rec.variables.get(name).copied()
    }

    fn set_active(&self, object: &String, active: bool) {
        let mut rec = self.inner.borrow_mut();
        rec.active.insert(object.clone(), active);
        rec.events.push(TraceEvent::SetActive {
            object: object.clone(),
            active,
        });
    }

    fn on_callback(&self) {
        let mut rec = self.inner.borrow_mut();
        rec.callbacks += 1;
        rec.events.push(TraceEvent::Callback);
    }

    fn create_tween(
        &self,
        object: &String,
        channel: ChannelKind,
        duration: f64,
        to: Option<ChannelValues>,
    ) -> AnimExprResult<RecordingTween> {
        let mut rec = self.inner.borrow_mut();
        let id = rec.tweens.len();
        rec.tweens.push(TweenRecord {
            id,
            object: object.clone(),
            channel,
            duration,
            to: to.map(|v| v.to_vec()),
            from: None,
            delay: 0.0,
            animate: true,
            ease: None,
            continuations: 0,
            completed: false,
        });
        rec.events.push(TraceEvent::Tween { id });
        Ok(RecordingTween {
            id,
            ctx: self.clone(),
        })
    }
}

/// Handle returned by [`RecordingContext::create_tween`].
pub struct RecordingTween {
    id: usize,
    ctx: RecordingContext,
}

impl RecordingTween {
    pub fn id(&self) -> usize {
        self.id
    }
}

impl Tween for RecordingTween {
    fn set_from(&mut self, values: ChannelValues) {
        self.ctx.with_tween(self.id, |t| {
            t.from = Some(StartValues {
                values: values.to_vec(),
                relative: false,
            });
        });
    }

    fn set_from_relative(&mut self, values: ChannelValues) {
        self.ctx.with_tween(self.id, |t| {
            t.from = Some(StartValues {
                values: values.to_vec(),
                relative: true,
            });
        });
    }

    fn set_delay(&mut self, seconds: f64) {
        self.ctx.with_tween(self.id, |t| t.delay = seconds);
    }

    fn set_animate(&mut self, animate: bool) {
        self.ctx.with_tween(self.id, |t| t.animate = animate);
    }

    fn set_easing(&mut self, ease: Ease) {
        self.ctx.with_tween(self.id, |t| t.ease = Some(ease.name()));
    }

    fn on_complete(&mut self, continuation: Continuation) {
        self.ctx.with_tween(self.id, |t| t.continuations += 1);
        self.ctx
            .inner
            .borrow_mut()
            .pending
            .push((self.id, continuation));
    }
}
