//! Property and plugin model tests
//!
//! Reads and writes through the public model API:
//! - Scalar properties and version-dependent spellings
//! - Lists written as varargs, setters and assignments
//! - Maps assembled from several statements
//! - Plugin requests in all their forms
//! - Settings scripts: included modules and their directories

pub mod tests_maps;
pub mod tests_plugins;
pub mod tests_properties;
pub mod tests_settings;
