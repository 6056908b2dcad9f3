pub mod backprop;
pub mod export;
pub mod network;

pub use backprop::BackpropOrder;
pub use export::{LayerKind, LayerRecord, ModelDocument};
pub use network::Network;
