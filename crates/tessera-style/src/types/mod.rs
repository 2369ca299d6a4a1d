//! Value types shared by configuration and resolution.

mod state;
mod value;

pub use state::State;
pub use value::{IconPlacement, PropertyValue, ShadowDirection, TextAlign};
