//! Time conversion between wire instants and local values.
//!
//! Goals travel as epoch milliseconds and are viewed as zone-aware local
//! values. This crate converts between the two, parses and formats form
//! input, and renders display strings.

#![warn(missing_docs)]

mod context;
mod input;
mod display;
mod goal;
mod range;

pub use context::{encode_instant, TimeContext};
pub use input::{format_for_input, InputError, InputKind, ParseKind};
pub use display::{format_for_display, DisplayKind};
pub use goal::{encode_goal, encode_goals};
