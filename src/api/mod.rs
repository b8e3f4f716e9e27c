//! HTTP adapter layer
//!
//! Exposes the classifier to presentation layers over REST. The adapter
//! parses and validates requests, calls the core once per submission, and
//! renders the structured result; it holds no state of its own.

pub mod rest;
