//! Dioxus renderer for the calculator. Reads [`crate::domain::WorkflowView`]
//! and calls back into the workflow on submit; nothing else.

pub mod components;
pub mod pages;
pub mod shell;
pub mod theme;

pub const APP_TITLE: &str = "Калькулятор стоимости";
