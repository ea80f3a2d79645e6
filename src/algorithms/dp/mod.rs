//! Exact dynamic-programming solvers.
//!
//! Both solvers back up values through the full transition model, but with
//! different orderings:
//! - [`ValueIteration`] copies the value vector before each sweep (Jacobi).
//! - [`PolicyIteration`] evaluates in place, so later states see values
//!   written earlier in the same sweep (Gauss-Seidel).

mod policy_iteration;
mod value_iteration;

pub use policy_iteration::PolicyIteration;
pub use value_iteration::ValueIteration;
