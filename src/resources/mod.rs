//! One namespace per backend domain, each method maps onto one endpoint.
//!
//! Methods only build the call, the [`Client`] does everything else.

use crate::api::Client;

mod assignment;
pub use assignment::{AssignmentOutcome, AssignmentPlan, AssignmentReport, Change};

pub mod apartment_types;
pub mod apartments;
pub mod auth;
pub mod bookings;
pub mod cancellation_rules;
pub mod chat;
pub mod cleaners;
pub mod concierges;
pub mod contracts;
pub mod dictionaries;
pub mod favorites;
pub mod locations;
pub mod locks;
pub mod notifications;
pub mod platform_settings;
pub mod users;

/// Numeric id of a backend record.
pub type Id = i64;

impl Client {
    /// `/auth`
    pub fn auth(&self) -> auth::Auth<'_> {
        auth::Auth { client: self }
    }
    /// `/admin/users, /users`
    pub fn users(&self) -> users::Users<'_> {
        users::Users { client: self }
    }
    /// `/apartments, /admin/apartments`
    pub fn apartments(&self) -> apartments::Apartments<'_> {
        apartments::Apartments { client: self }
    }
    /// `/bookings, /owner/bookings, /admin/bookings`
    pub fn bookings(&self) -> bookings::Bookings<'_> {
        bookings::Bookings { client: self }
    }
    /// `/locks`
    pub fn locks(&self) -> locks::Locks<'_> {
        locks::Locks { client: self }
    }
    /// `/notifications`
    pub fn notifications(&self) -> notifications::Notifications<'_> {
        notifications::Notifications { client: self }
    }
    /// `/chat`
    pub fn chat(&self) -> chat::Chat<'_> {
        chat::Chat { client: self }
    }
    /// `/contracts`
    pub fn contracts(&self) -> contracts::Contracts<'_> {
        contracts::Contracts { client: self }
    }
    /// `/concierges, /concierge`
    pub fn concierges(&self) -> concierges::Concierges<'_> {
        concierges::Concierges { client: self }
    }
    /// `/cleaners, /cleaner`
    pub fn cleaners(&self) -> cleaners::Cleaners<'_> {
        cleaners::Cleaners { client: self }
    }
    /// `/locations`
    pub fn locations(&self) -> locations::Locations<'_> {
        locations::Locations { client: self }
    }
    /// `/dictionaries`
    pub fn dictionaries(&self) -> dictionaries::Dictionaries<'_> {
        dictionaries::Dictionaries { client: self }
    }
    /// `/favorites`
    pub fn favorites(&self) -> favorites::Favorites<'_> {
        favorites::Favorites { client: self }
    }
    /// `/cancellation-rules`
    pub fn cancellation_rules(&self) -> cancellation_rules::CancellationRules<'_> {
        cancellation_rules::CancellationRules { client: self }
    }
    /// `/settings`
    pub fn platform_settings(&self) -> platform_settings::PlatformSettings<'_> {
        platform_settings::PlatformSettings { client: self }
    }
    /// `/apartment-types`
    pub fn apartment_types(&self) -> apartment_types::ApartmentTypes<'_> {
        apartment_types::ApartmentTypes { client: self }
    }
}
