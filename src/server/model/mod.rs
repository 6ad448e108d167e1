//! Server-side domain models.
//!
//! This module contains the domain models used throughout the service layer: the marketplace
//! OAuth token, inbound webhook notifications and their Discord presentation, authorization
//! outcomes, and notification destination (subscription) records. Wire formats are parsed into
//! these types at the controller or client boundary.

pub mod authorization;
pub mod notification;
pub mod subscription;
pub mod token;
