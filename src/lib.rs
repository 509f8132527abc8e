//! MemberDesk - Gym membership administration service
//!
//! This crate implements member registration, lifecycle management
//! (renewal, expiry, status transitions) and reporting for a gym
//! front desk, exposed over a REST API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
