//! Gatepass - Real-Time Visitor Gate-Approval Coordination
//!
//! This crate notifies a resident's devices in real time when a visitor
//! requests entry at a gate, and relays the resident's approve/deny decision
//! back to the originating gate device — always after the durable write.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
