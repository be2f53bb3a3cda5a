pub mod policy;

pub use policy::{best_move, hint, random_move, Policy, PolicyKind};
