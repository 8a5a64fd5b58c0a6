//! Earliest-arrival journey planner.
//!
//! Loads a timetable of routes and scheduled services, finds the journey
//! between two stations that arrives soonest, and re-plans found journeys
//! from any interchange. A small web front end serves both.

pub mod cache;
pub mod config;
pub mod domain;
pub mod planner;
pub mod timetable;
pub mod web;
