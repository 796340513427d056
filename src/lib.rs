//! Client-side core of the nursery-management portal: session state, the
//! typed gateway to the portal's REST backend, role-gated navigation, and
//! the admissions and staff workflows. The backend itself is an external
//! collaborator reached over HTTP; rendering is left to the embedding UI.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod portal;
pub mod shared;
