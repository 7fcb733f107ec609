pub mod channel;
pub mod ease;
pub mod handle;

pub use channel::{ChannelKind, ChannelValues};
pub use ease::{Ease, EaseFamily, EaseMode};
pub use handle::Tween;
