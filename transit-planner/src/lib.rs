//! Time-dependent multi-modal public-transport journey planner.
//!
//! Computes earliest-arrival and least-cost journeys across a lazily
//! materialised transit graph, fetching schedule data from a remote
//! source on demand and persisting it as durable graph edges.

pub mod catalogue;
pub mod domain;
pub mod graph;
pub mod journey;
pub mod materialiser;
pub mod schedule;
pub mod search;
pub mod web;
