//! Use-Cases der Application-Layer-Orchestrierung.

pub mod camera;
pub mod editing;
pub mod file_io;
pub mod options;
pub mod selection;
pub mod tool;
pub mod viewport;
