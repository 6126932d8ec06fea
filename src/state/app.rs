//! Application state owned by the root controller.
//!
//! DESIGN
//! ======
//! One explicit state object replaces module-level singletons. Panels borrow
//! it read-only; only `AppController` mutates it, and collections are always
//! replaced together so no screen ever mixes two fetches.

use crate::net::types::{Appointment, Client, Pet};

/// Top-level navigation tabs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Dashboard,
    Clients,
    Pets,
    Appointments,
}

impl Tab {
    pub const ALL: [Self; 4] = [Self::Dashboard, Self::Clients, Self::Pets, Self::Appointments];

    /// Label shown in the navigation bar.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "📊 Dashboard",
            Self::Clients => "👥 Clientes",
            Self::Pets => "🐕 Mascotas",
            Self::Appointments => "📅 Citas",
        }
    }

    /// Name accepted by the `tab` command.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Clients => "clientes",
            Self::Pets => "mascotas",
            Self::Appointments => "citas",
        }
    }

    /// Parse a tab name, Spanish or English.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dashboard" | "inicio" => Some(Self::Dashboard),
            "clientes" | "clients" => Some(Self::Clients),
            "mascotas" | "pets" => Some(Self::Pets),
            "citas" | "appointments" => Some(Self::Appointments),
            _ => None,
        }
    }
}

/// The three server collections, fetched and replaced as one unit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Collections {
    pub clients: Vec<Client>,
    pub pets: Vec<Pet>,
    pub appointments: Vec<Appointment>,
}

/// Root view state: active tab, loaded collections, and the loading flag.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub active_tab: Tab,
    pub clients: Vec<Client>,
    pub pets: Vec<Pet>,
    pub appointments: Vec<Appointment>,
    pub loading: bool,
}

impl AppState {
    /// Swap in a complete fetch result.
    pub fn replace_collections(&mut self, collections: Collections) {
        let Collections { clients, pets, appointments } = collections;
        self.clients = clients;
        self.pets = pets;
        self.appointments = appointments;
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;
