//! Reference renderer for markup units.
//!
//! Evaluates a unit's default export with an environment of bindings and
//! host functions, recording each host call. Two modes: `Transformed`
//! renders rewritten trees, where a conditional only evaluates the branch
//! it selects; `Fallback` renders untransformed trees the way the runtime
//! components do, evaluating every branch's props and children up front.
//!
//! Nothing here feeds the transform; tests and the CLI use it to observe
//! what a tree does when it runs.

pub mod render;
pub mod value;


pub use render::{clean_jsx_text, Environment, HostFn, RenderError, RenderMode, Renderer};
pub use value::{Markup, Value};
