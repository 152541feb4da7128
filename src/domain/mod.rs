//! Domain aggregates exposed by the GlobeTrotter service layer.

pub mod activity;
pub mod budget;
pub mod calendar;
pub mod city;
pub mod community;
pub mod dashboard;
pub mod expense;
pub mod itinerary;
pub mod search;
pub mod stats;
pub mod trip;
pub mod types;
pub mod user;
