pub mod builder;
pub mod clients;
pub mod config;
pub mod corridor;
pub mod error;
pub mod net;
pub mod overpass;
pub mod persistence;
pub mod route_geo;
pub mod selector;
pub mod sequencer;
pub mod session;
pub mod theme;
pub mod types;
