//! Visualization of concentration profiles using `plotters`
//!
//! # Organization
//!
//! - **config**: Plot configuration (`PlotConfig`)
//! - **profile**: `Cg/Cg₀` against column height
//!
//! | Use Case | Function |
//! |----------|----------|
//! | One profile | `plot_profile` |
//! | Compare profiles (sweeps) | `plot_profile_comparison` |

pub mod config;
pub mod profile;

pub use config::{IntoOptionalTitle, PlotConfig, NO_TITLE};

pub use profile::{plot_profile, plot_profile_comparison};
