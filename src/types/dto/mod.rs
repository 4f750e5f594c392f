pub mod geom;
pub mod route;
