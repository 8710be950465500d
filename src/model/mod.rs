//! Core model types: labels, fragments, the registry and the tangler.

mod fragment;
mod label;
mod registry;
mod resolver;
mod tangle;

pub use fragment::Fragment;
pub use label::FragmentLabel;
pub use registry::Registry;
pub use resolver::{resolve, Resolution};
pub use tangle::{tangle_label, tangle_root, CycleDetector, Tangler};
