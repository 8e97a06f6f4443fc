//! Library components of the formfit command-line driver.

pub mod logging;
pub mod prefs;
