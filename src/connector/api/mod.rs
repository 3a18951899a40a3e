pub mod container;
pub mod controller;
pub mod middleware;
pub mod response;
pub mod router;

pub use container::{Container, ContainerConfig};
pub use response::{ApiError, ChatSuccess};
pub use router::Router;
