//! Reactive data layer: remote-backed entity caches, derived aggregation
//! views, and optimistic mutation tracking.

pub mod entity;
pub mod entity_store;
pub mod live_query;
pub mod optimistic;

pub use entity::{Entity, RemoteCollection};
pub use entity_store::{Confirmation, EntityStore, MutationKind};
pub use live_query::{AggregationView, JoinKind};
pub use optimistic::{MutationState, OptimisticMutation};
