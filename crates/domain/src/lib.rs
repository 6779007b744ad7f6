//! # scenepad-domain
//!
//! Pure domain model for the scenepad button-to-scene automation system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Lights** and the partial-merge patches that mutate them
//! - Define **Scenes** (ordered, timed action lists)
//! - Define **Buttons**, **Gestures** and the per-button **Configuration**
//! - Classify raw press streams into gestures (**press classifier**)
//! - Define **Events** observed by renderers and the notification wire types
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod action_key;
pub mod button;
pub mod catalog;
pub mod configuration;
pub mod event;
pub mod light;
pub mod notification;
pub mod press;
pub mod scene;
