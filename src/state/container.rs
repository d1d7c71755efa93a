//! Shared application state container.
//!
//! One instance is created at startup and handed to every surface that needs
//! it. Mutations go through the methods here so each change is logged and
//! broadcast to subscribers; there is no other way to touch the fields.

use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};
use tracing::info;

use super::model::{
    Profile, ProfileUpdate, Ride, RiderRole, SessionSnapshot, StateEvent,
};

/// Broadcast buffer per subscriber. Readers that fall further behind lag and
/// must resync from a snapshot.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Mutable session fields, guarded together so a snapshot is consistent.
#[derive(Debug, Default)]
struct SessionFields {
    role: RiderRole,
    availability: bool,
    authenticated: bool,
    profile: Profile,
}

/// Owns the session fields and the seeded ride list.
///
/// Cheap to share: clone the `Arc`, not the container.
pub struct StateContainer {
    session: RwLock<SessionFields>,
    /// Seeded once at construction; rides have no mutation surface.
    rides: Vec<Ride>,
    events: broadcast::Sender<StateEvent>,
}

impl StateContainer {
    /// Create a container with default session fields and the given rides.
    ///
    /// Defaults: role `Hitchhiker`, availability `true`, not authenticated,
    /// empty profile.
    pub fn new(rides: Vec<Ride>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            session: RwLock::new(SessionFields {
                availability: true,
                ..Default::default()
            }),
            rides,
            events,
        })
    }

    pub async fn role(&self) -> RiderRole {
        self.session.read().await.role
    }

    pub async fn set_role(&self, role: RiderRole) {
        {
            let mut session = self.session.write().await;
            if session.role == role {
                return;
            }
            session.role = role;
        }
        info!(%role, "Role changed");
        let _ = self.events.send(StateEvent::RoleChanged { role });
    }

    pub async fn availability(&self) -> bool {
        self.session.read().await.availability
    }

    /// Flip availability and return the new value.
    pub async fn toggle_availability(&self) -> bool {
        let availability = {
            let mut session = self.session.write().await;
            session.availability = !session.availability;
            session.availability
        };
        info!(availability, "Availability toggled");
        let _ = self
            .events
            .send(StateEvent::AvailabilityChanged { availability });
        availability
    }

    pub async fn authenticated(&self) -> bool {
        self.session.read().await.authenticated
    }

    pub async fn set_authenticated(&self, authenticated: bool) {
        {
            let mut session = self.session.write().await;
            if session.authenticated == authenticated {
                return;
            }
            session.authenticated = authenticated;
        }
        info!(authenticated, "Auth flag changed");
        let _ = self
            .events
            .send(StateEvent::AuthChanged { authenticated });
    }

    pub async fn profile(&self) -> Profile {
        self.session.read().await.profile.clone()
    }

    /// Shallow-merge `update` into the profile and return the result.
    ///
    /// Fields the payload omits keep their prior values. An empty payload
    /// still returns the current profile but emits no event.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Profile {
        let profile = {
            let mut session = self.session.write().await;
            if update.is_empty() {
                return session.profile.clone();
            }
            update.apply(&mut session.profile);
            session.profile.clone()
        };
        info!("Profile updated");
        let _ = self.events.send(StateEvent::ProfileUpdated {
            profile: profile.clone(),
        });
        profile
    }

    /// The seeded ride list, in fixture order.
    pub fn rides(&self) -> &[Ride] {
        &self.rides
    }

    /// Consistent view of all mutable fields at once.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let session = self.session.read().await;
        SessionSnapshot {
            role: session.role,
            availability: session.availability,
            authenticated: session.authenticated,
            profile: session.profile.clone(),
        }
    }

    /// Subscribe to state change events.
    ///
    /// Only changes made after this call are delivered; pair with
    /// [`snapshot`](Self::snapshot) to establish a baseline first.
    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use crate::state::model::RideStatus;

    use super::*;

    fn sample_ride() -> Ride {
        Ride {
            id: uuid::Uuid::new_v4(),
            user_id: "u-test".to_string(),
            role: RiderRole::Driver,
            origin: "Cluj-Napoca".to_string(),
            destination: "Sibiu".to_string(),
            status: RideStatus::Pending,
            time: "2025-08-30T09:00:00Z".parse().unwrap(),
            seats: 2,
        }
    }

    #[tokio::test]
    async fn fresh_container_has_documented_defaults() {
        let container = StateContainer::new(Vec::new());
        let snapshot = container.snapshot().await;
        assert_eq!(snapshot.role, RiderRole::Hitchhiker);
        assert!(snapshot.availability);
        assert!(!snapshot.authenticated);
        assert_eq!(snapshot.profile, Profile::default());
    }

    #[tokio::test]
    async fn set_role_is_observable() {
        let container = StateContainer::new(Vec::new());
        container.set_role(RiderRole::Driver).await;
        assert_eq!(container.role().await, RiderRole::Driver);
        container.set_role(RiderRole::Hitchhiker).await;
        assert_eq!(container.role().await, RiderRole::Hitchhiker);
    }

    #[tokio::test]
    async fn toggle_twice_restores_availability() {
        let container = StateContainer::new(Vec::new());
        let initial = container.availability().await;
        assert!(!container.toggle_availability().await);
        assert!(container.toggle_availability().await);
        assert_eq!(container.availability().await, initial);
    }

    #[tokio::test]
    async fn profile_merge_leaves_unmentioned_fields() {
        let container = StateContainer::new(Vec::new());
        container
            .update_profile(ProfileUpdate {
                first_name: Some("Elena".to_string()),
                age: Some(26),
                ..Default::default()
            })
            .await;

        let merged = container
            .update_profile(ProfileUpdate {
                email: Some("elena@example.com".to_string()),
                ..Default::default()
            })
            .await;

        assert_eq!(merged.first_name, "Elena");
        assert_eq!(merged.age, Some(26));
        assert_eq!(merged.email, "elena@example.com");
    }

    #[tokio::test]
    async fn mutations_reach_subscribers_in_order() {
        let container = StateContainer::new(Vec::new());
        let mut events = container.subscribe();

        container.set_role(RiderRole::Driver).await;
        container.toggle_availability().await;
        container.set_authenticated(true).await;

        assert_eq!(
            events.recv().await.unwrap(),
            StateEvent::RoleChanged {
                role: RiderRole::Driver
            }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            StateEvent::AvailabilityChanged {
                availability: false
            }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            StateEvent::AuthChanged {
                authenticated: true
            }
        );
    }

    #[tokio::test]
    async fn no_op_mutations_emit_nothing() {
        let container = StateContainer::new(Vec::new());
        let mut events = container.subscribe();

        // Already the default role and auth state.
        container.set_role(RiderRole::Hitchhiker).await;
        container.set_authenticated(false).await;
        container.update_profile(ProfileUpdate::default()).await;

        assert!(matches!(
            events.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn rides_are_returned_as_seeded() {
        let ride = sample_ride();
        let container = StateContainer::new(vec![ride.clone()]);
        assert_eq!(container.rides(), &[ride]);
    }

    #[tokio::test]
    async fn snapshot_reflects_all_mutations() {
        let container = StateContainer::new(Vec::new());
        container.set_role(RiderRole::Driver).await;
        container.toggle_availability().await;
        container.set_authenticated(true).await;
        container
            .update_profile(ProfileUpdate {
                first_name: Some("Mihai".to_string()),
                ..Default::default()
            })
            .await;

        let snapshot = container.snapshot().await;
        assert_eq!(snapshot.role, RiderRole::Driver);
        assert!(!snapshot.availability);
        assert!(snapshot.authenticated);
        assert_eq!(snapshot.profile.first_name, "Mihai");
    }
}
