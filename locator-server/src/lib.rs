//! Washroom locator.
//!
//! Answers questions like "Where can I find a toilet near Connaught Place?"
//! by pulling the place name out of the text, fuzzy-matching it against a
//! catalog of transit stops, and returning the washroom nearest that stop
//! with a walking-directions link.

pub mod catalog;
pub mod domain;
pub mod extract;
pub mod matcher;
pub mod presentation;
pub mod resolver;
pub mod text;
pub mod web;
