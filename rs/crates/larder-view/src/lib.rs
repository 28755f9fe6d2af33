//! larder-view: regions, patching and screens
//!
//! Screens implement [`Template`]; [`render`] and [`update`] put their markup
//! into a [`Region`]. Events fired on a region resolve to the closest bound
//! element and become core actions through [`to_action`].

pub mod event;
pub mod fraction;
pub mod region;
pub mod screens;
pub mod view;

pub use event::{to_action, EventError};
pub use fraction::format_quantity;
pub use region::{Mutation, Region, UiEvent};
pub use view::{render, render_error, render_message, render_spinner, update, Template};
