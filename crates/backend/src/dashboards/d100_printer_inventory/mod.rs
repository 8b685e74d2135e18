pub mod service;
pub mod stats;
pub mod view_model;
