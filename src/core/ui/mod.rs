//! Core domain: menu screens outside of a run.

mod main_menu;

pub(crate) use main_menu::{cleanup_main_menu, handle_start_input, spawn_main_menu};
