//! Infrastructure layer: database connection and schema bootstrap.

pub mod db;
