//! Midpoint finder server.
//!
//! Two people enter where they are; the server finds the point halfway
//! between them, the railway stations nearby and places to meet around
//! either the midpoint or a chosen station.

pub mod advisory;
pub mod cache;
pub mod config;
pub mod domain;
pub mod map;
pub mod nominatim;
pub mod orchestrator;
pub mod overpass;
pub mod query;
pub mod session;
pub mod web;
