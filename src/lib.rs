//! Flow metrics and velocity forecasting over issue-tracker tickets.
//!
//! Every computation in [`services`] is a pure function over a ticket slice:
//! callers load and filter tickets, pick a date range and granularity, and get
//! serializable series back.

pub mod commands;
pub mod domain;
pub mod services;

#[cfg(test)]
mod test_support;
