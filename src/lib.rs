//! multiclass-svm: a multiclass linear classifier trained with stochastic
//! sub-gradient descent on the Crammer-Singer hinge loss.
//!
//! The crate is deliberately small: a dense weight matrix (one row per class),
//! a shared bias, and a single-threaded training loop with L2 weight decay and
//! an average-loss convergence check. Prediction is a pure read over the
//! learned state.
//!
//! The design favors small, testable modules and keeps the math containers
//! dependency-free so the crate stays portable and easy to test.
pub mod config;
pub mod error;
pub mod math;
pub mod models;
