use crate::eval::context::Continuation;
use crate::tween::channel::ChannelValues;
use crate::tween::ease::Ease;

/// Host-side handle to a tween that the animation engine has already accepted.
///
/// Chained calls (`From`, `Delay`, `Ease*`, `Animate`, `Then`) configure the tween through
/// this trait in source order. `values` passed to the `set_from*` methods always hold exactly
/// one entry per channel of the tween.
pub trait Tween {
    fn set_from(&mut self, values: ChannelValues);

    /// Start values expressed as offsets from the object's current value.
    fn set_from_relative(&mut self, values: ChannelValues);

    fn set_delay(&mut self, seconds: f64);

    /// `false` keeps the tween from starting playback.
    fn set_animate(&mut self, animate: bool);

    fn set_easing(&mut self, ease: Ease);

    /// Register the work to run when the tween finishes.
    ///
    /// The engine must call [`Continuation::resume`] at most once; the continuation is consumed
    /// by that call.
    fn on_complete(&mut self, continuation: Continuation);
}
