//! Delivery fee quoting and seller management backend.
//!
//! This crate provides the server functionality as a library,
//! allowing it to be tested and reused by the CLI.
//!
//! The core pipeline is CEP validation → address lookup (ViaCEP) → fee
//! calculation by state; see [`services::FeeQuoteService`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod viacep;
