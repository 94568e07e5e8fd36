//! Domain entities for labkit.
//!
//! This module contains the core entities:
//! - ModelSpec: the model handed to the visualization tool
//! - GraphStyle: layout and output options for the rendered graph
//! - RepoTarget: a repository under the user's workspace root

mod graph;
mod model;
mod repo;

pub use graph::{GraphStyle, OutputFormat, RankDir};
pub use model::{Device, InputShape, ModelSpec};
pub use repo::{workspace_root, RepoTarget};
