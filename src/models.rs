use std::fmt;

use crate::MigrationError;

/// Physical port role; each role owns a canonical RouterOS name pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InterfaceRole {
    Ethernet,
    Sfp,
    SfpPlus,
    Sfp28,
    Wlan,
}

impl InterfaceRole {
    /// Roles in classification order. Longer prefixes first so that
    /// sfp-sfpplus1 and sfp28-1 are never misread as sfp ports.
    pub const ALL: [InterfaceRole; 5] = [
        InterfaceRole::SfpPlus,
        InterfaceRole::Sfp28,
        InterfaceRole::Sfp,
        InterfaceRole::Wlan,
        InterfaceRole::Ethernet,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            InterfaceRole::Ethernet => "ether",
            InterfaceRole::Sfp => "sfp",
            InterfaceRole::SfpPlus => "sfp-sfpplus",
            InterfaceRole::Sfp28 => "sfp28-",
            InterfaceRole::Wlan => "wlan",
        }
    }

    pub fn slot_name(&self, index: u32) -> String {
        format!("{}{}", self.prefix(), index)
    }

    /// Match a token against this role's name pattern.
    pub fn classify(&self, token: &str) -> Option<u32> {
        let rest = token.strip_prefix(self.prefix())?;
        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        rest.parse().ok()
    }
}

impl fmt::Display for InterfaceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceRole::Ethernet => write!(f, "ethernet"),
            InterfaceRole::Sfp => write!(f, "sfp"),
            InterfaceRole::SfpPlus => write!(f, "sfp+"),
            InterfaceRole::Sfp28 => write!(f, "sfp28"),
            InterfaceRole::Wlan => write!(f, "wlan"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceSlot {
    pub name: String,
    pub role: InterfaceRole,
    /// 1-based, contiguous within a role.
    pub index: u32,
}

/// Static capability description for one hardware model.
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    pub slots: Vec<InterfaceSlot>,
}

impl ModelDescriptor {
    fn new(id: &'static str, title: &'static str, counts: &[(InterfaceRole, u32)]) -> Self {
        let mut slots = Vec::new();
        for &(role, count) in counts {
            for index in 1..=count {
                slots.push(InterfaceSlot {
                    name: role.slot_name(index),
                    role,
                    index,
                });
            }
        }
        ModelDescriptor { id, title, slots }
    }

    /// Slots of one role, ascending by index.
    pub fn slots_of(&self, role: InterfaceRole) -> Vec<&InterfaceSlot> {
        self.slots.iter().filter(|s| s.role == role).collect()
    }

    /// Roles present on this model, in classification order.
    pub fn roles(&self) -> Vec<InterfaceRole> {
        InterfaceRole::ALL
            .iter()
            .copied()
            .filter(|role| self.slots.iter().any(|s| s.role == *role))
            .collect()
    }

    pub fn has_role(&self, role: InterfaceRole) -> bool {
        self.slots.iter().any(|s| s.role == role)
    }

    /// Classify a token against this model's interface name patterns.
    /// Only roles the model actually carries participate, so a token like
    /// wlan1 on a radio-less model is not an interface reference.
    pub fn classify(&self, token: &str) -> Option<(InterfaceRole, u32)> {
        for role in InterfaceRole::ALL {
            if !self.has_role(role) {
                continue;
            }
            if let Some(index) = role.classify(token) {
                return Some((role, index));
            }
        }
        None
    }

    /// Port counts per role, for display.
    pub fn port_summary(&self) -> String {
        self.roles()
            .iter()
            .map(|&role| format!("{} x{}", role, self.slots_of(role).len()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Immutable table of supported models, built once at startup and shared
/// read-only across migrations.
#[derive(Debug)]
pub struct ModelRegistry {
    models: Vec<ModelDescriptor>,
}

impl ModelRegistry {
    pub fn builtin() -> Self {
        use InterfaceRole::*;
        ModelRegistry {
            models: vec![
                ModelDescriptor::new(
                    "ccr1036-12g-4s",
                    "CCR1036-12G-4S",
                    &[(Ethernet, 12), (Sfp, 4)],
                ),
                ModelDescriptor::new(
                    "ccr2004-1g-12s",
                    "CCR2004-1G-12S+2XS",
                    &[(Ethernet, 1), (SfpPlus, 12), (Sfp28, 2)],
                ),
                ModelDescriptor::new(
                    "rb4011igs",
                    "RB4011iGS+",
                    &[(Ethernet, 10), (SfpPlus, 1)],
                ),
                ModelDescriptor::new("rb750gr3", "hEX (RB750Gr3)", &[(Ethernet, 5)]),
                ModelDescriptor::new("hap-ac2", "hAP ac2", &[(Ethernet, 5), (Wlan, 2)]),
            ],
        }
    }

    pub fn describe(&self, id: &str) -> Result<&ModelDescriptor, MigrationError> {
        self.models
            .iter()
            .find(|m| m.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| MigrationError::UnknownModel(id.to_string()))
    }

    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }
}
