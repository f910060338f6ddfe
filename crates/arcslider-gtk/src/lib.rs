//! GTK4 front end for the arc slider: a relm4 component drawing with cairo, its theme and
//! settings, and the demo application around it.

pub mod config;
pub mod events;
pub mod gui;
pub mod sys;
