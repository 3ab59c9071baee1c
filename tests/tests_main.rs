#[path = "helpers/mod.rs"]
mod helpers;

#[path = "model/mod.rs"]
mod model;

#[path = "writer/mod.rs"]
mod writer;
