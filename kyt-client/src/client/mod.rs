//! This module provides the client for interacting with the KYT API

/// Client for the KYT API endpoints
pub mod kyt_client;
/// Request envelope and signature
pub mod signature;
