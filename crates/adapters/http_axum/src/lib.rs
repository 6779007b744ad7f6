//! # scenepad-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** over the catalog, the light store and the
//!   configuration (`/api/lights`, `/api/buttons`, `/api/scenes`,
//!   `/api/configuration`, …)
//! - Accept **raw button input** (`/api/buttons/{id}/press`) and hand it to
//!   the press service, or dispatch an already classified gesture directly
//! - Serve the **action endpoint** (`/api/action`) that remote notifiers post to
//! - Stream domain events to renderers over **SSE** (`/api/events/stream`)
//!
//! ## Dependency rule
//! Depends on `scenepad-app` (for the dispatcher, stores and ports) and
//! `scenepad-domain` (for request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
