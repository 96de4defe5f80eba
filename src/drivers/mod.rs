//! Button debouncing and raw pin access.

pub mod button;
pub mod gpio;
