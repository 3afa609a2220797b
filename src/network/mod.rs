pub mod network;
pub mod gradients;
pub mod backprop;

pub use network::{Network, InitScheme};
pub use gradients::Gradients;
pub use backprop::backprop;
