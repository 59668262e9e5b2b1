//! `bs-network` — routes, stops, and the interpolated paths buses move along.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`route`]    | `Stop`, `Route`                                            |
//! | [`path`]     | `PathPoint`, `PathBuilder` — stops → dense polyline        |
//! | [`resolver`] | `PathSample`, `position_at` — progress → coordinate        |
//! | [`network`]  | `RouteNetwork` (routes + paths + stop R-tree), builder     |
//! | [`loader`]   | CSV route loading                                          |
//! | [`error`]    | `NetworkError`, `NetworkResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod loader;
pub mod network;
pub mod path;
pub mod resolver;
pub mod route;


pub use error::{NetworkError, NetworkResult};
pub use loader::{load_routes_csv, load_routes_reader};
pub use network::{RouteNetwork, RouteNetworkBuilder, StopHit};
pub use path::{PathBuilder, PathPoint};
pub use resolver::{PathSample, position_at};
pub use route::{Route, Stop};
