use std::sync::Arc;

use crate::ast::Node;
use crate::foundation::error::AnimExprResult;
use crate::tween::{ChannelKind, ChannelValues, Tween};

/// Capabilities the evaluator needs from its host.
///
/// The context is cloned into every [`Continuation`] registered by a `Then` call, so
/// implementations are expected to be cheap handles onto shared host state.
pub trait EvalContext: Clone + 'static {
    /// A live scene object.
    type Object;
    type Tween: Tween;

    /// Map a logical name to a live object. Hosts decide how unknown names fail.
    fn resolve_object(&self, name: &str) -> AnimExprResult<Self::Object>;

    /// Named numeric value. `None` evaluates as `0`.
    fn resolve_variable(&self, name: &str) -> Option<f64>;

    fn set_active(&self, object: &Self::Object, active: bool);

    /// Invoked once per evaluated `Callback()` statement.
    fn on_callback(&self);

    /// Hand a new tween to the animation engine.
    ///
    /// `to` holds one value per channel of `channel` when the call supplied target values.
    fn create_tween(
        &self,
        object: &Self::Object,
        channel: ChannelKind,
        duration: f64,
        to: Option<ChannelValues>,
    ) -> AnimExprResult<Self::Tween>;
}

/// Deferred `Then` body bound to the context that registered it.
pub struct Continuation {
    body: Arc<Node>,
    run: Box<dyn FnOnce(&Node) -> AnimExprResult<()>>,
}

impl Continuation {
    pub(crate) fn new<C: EvalContext>(body: Arc<Node>, ctx: C) -> Self {
        Self {
            body,
            run: Box::new(move |node: &Node| node.evaluate(&ctx)),
        }
    }

    /// Evaluate the body. Consumes the continuation.
    pub fn resume(self) -> AnimExprResult<()> {
        tracing::debug!("resuming continuation");
        (self.run)(&self.body)
    }
}

impl std::fmt::Debug for Continuation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Continuation")
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}
