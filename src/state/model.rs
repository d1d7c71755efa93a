//! Session and ride data models.
//!
//! Wire casing follows the AutoStop UI: camelCase record fields, capitalized
//! role strings, lowercase ride statuses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which side of a carpool the user is on.
///
/// Serialized as `"Driver"` / `"Hitchhiker"`, the strings the UI stores and
/// displays. A closed enum: no other value can be constructed or
/// deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiderRole {
    Driver,
    Hitchhiker,
}

impl Default for RiderRole {
    fn default() -> Self {
        Self::Hitchhiker
    }
}

impl std::fmt::Display for RiderRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Driver => write!(f, "Driver"),
            Self::Hitchhiker => write!(f, "Hitchhiker"),
        }
    }
}

/// Lifecycle status of a ride record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    Pending,
    Confirmed,
    Completed,
}

impl std::fmt::Display for RideStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

/// A single carpool trip record.
///
/// Rides are seeded once from the static fixture at container creation and
/// have no further lifecycle: there are no create, update, or delete
/// operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    pub id: Uuid,
    /// Opaque handle of the user who posted the ride.
    pub user_id: String,
    pub role: RiderRole,
    pub origin: String,
    pub destination: String,
    pub status: RideStatus,
    /// Departure time, RFC 3339 on the wire.
    pub time: DateTime<Utc>,
    /// Seats offered (driver) or requested (hitchhiker).
    pub seats: u32,
}

/// The user profile filled in during onboarding.
///
/// Every field starts empty; `age` is null or a non-negative integer by
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub age: Option<u32>,
    /// Photo reference (URL or asset handle).
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// Partial profile payload for shallow merges.
///
/// A field that is absent (or JSON null) keeps its prior value; only
/// supplied fields are replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<u32>,
    pub photo: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl ProfileUpdate {
    /// Shallow-merge the supplied fields into `profile`.
    pub fn apply(&self, profile: &mut Profile) {
        if let Some(ref first_name) = self.first_name {
            profile.first_name = first_name.clone();
        }
        if let Some(ref last_name) = self.last_name {
            profile.last_name = last_name.clone();
        }
        if let Some(age) = self.age {
            profile.age = Some(age);
        }
        if let Some(ref photo) = self.photo {
            profile.photo = Some(photo.clone());
        }
        if let Some(ref phone) = self.phone {
            profile.phone = phone.clone();
        }
        if let Some(ref email) = self.email {
            profile.email = email.clone();
        }
    }

    /// Whether the payload supplies no fields at all.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.age.is_none()
            && self.photo.is_none()
            && self.phone.is_none()
            && self.email.is_none()
    }
}

/// Point-in-time view of the mutable session fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub role: RiderRole,
    pub availability: bool,
    pub authenticated: bool,
    pub profile: Profile,
}

/// A state change broadcast to WebSocket subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateEvent {
    /// Full snapshot (sent on connect and after a client lags behind).
    Sync { session: SessionSnapshot },
    /// The rider role changed.
    RoleChanged { role: RiderRole },
    /// The availability flag flipped.
    AvailabilityChanged { availability: bool },
    /// The authentication flag changed.
    AuthChanged { authenticated: bool },
    /// The profile was merged with a partial update.
    ProfileUpdated { profile: Profile },
}
