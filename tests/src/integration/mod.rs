//! End-to-end bridge transfer choreography.

mod failure_modes;
mod flows;
