//! cashboard — cash market analytics core.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`]. The [`service`] facade drives the
//! pipeline for a presentation layer: authenticate, load, restrict to a date
//! window, aggregate KPIs.

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod service;
