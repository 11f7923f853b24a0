//! Test modules for the coordinator
//!
//! Scenario tests pin exact report sequences; concurrency tests check
//! delivery and liveness over many pixels; failure tests cover source
//! errors, sink errors and cancellation.

mod support;
