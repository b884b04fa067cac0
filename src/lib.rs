// CorsMap Library
// Station catalog, port resolution and spatial queries behind the
// SmartFix network map page. Rendering stays in the page; this crate
// owns the data.

pub mod catalog;
pub mod error;
pub mod feeds;
pub mod legend;
pub mod reference;
pub mod regions;
pub mod search;
pub mod session;
pub mod spatial;
pub mod tools;
