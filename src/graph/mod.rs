// src/graph/mod.rs

//! Prerequisite graph representation and analysis.
//!
//! - [`course_graph`] holds the index-based directed graph of courses.
//! - [`analyze`] performs Kahn elimination, cycle extraction and
//!   reachability classification.

pub mod analyze;
pub mod course_graph;

pub use analyze::{Analysis, analyze};
pub use course_graph::{CourseGraph, MissingRef};
