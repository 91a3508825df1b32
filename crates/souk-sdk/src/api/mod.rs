//! Remote backend collaborators: ports, the HTTP adapter, and a mock

pub mod http;
pub mod mock;
pub mod traits;

pub use mock::MockMarket;
pub use traits::{BookingsApi, MessagesApi, ProfilesApi};
