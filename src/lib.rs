//! Insight projection engine for the journaling clients: pure data-shaping
//! from per-entry analytic records into renderer-ready chart structures.
//! Both clients consume this one engine so their threshold constants cannot
//! drift apart.

pub mod api_types;
pub mod classify;
pub mod controller;
pub mod distribution;
pub mod fetch;
pub mod models;
pub mod pivot;
pub mod radial;
pub mod render;
pub mod select;
pub mod treemap;
pub mod viz_export;
