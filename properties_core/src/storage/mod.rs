pub mod grid_config;
