//! Backend clients for the remote image services.
//!
//! The face service is reached through the [`FaceBackend`] trait so the
//! session and its tests never need a live server; [`HttpFaceBackend`] is
//! the production implementation. The coloring-page service is stateless
//! and gets its own one-shot [`ColoringClient`].

mod backend;
mod coloring;
mod http;

pub use backend::FaceBackend;
pub use coloring::ColoringClient;
pub use http::HttpFaceBackend;
