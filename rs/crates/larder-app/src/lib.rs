//! larder-app: the controller and the page it drives.
//!
//! [`Controller`] turns actions into store calls and screen renders. The
//! [`Page`] it owns holds every region and reports what changed after each
//! action, which is all the `larder` binary prints.

pub mod config;
pub mod controller;
pub mod logging;
pub mod page;

pub use config::AppConfig;
pub use controller::{Controller, RECIPE_DELETED};
pub use page::{Page, RegionChange};
