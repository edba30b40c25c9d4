//! Channel registry and the fixed channel → color map.
//!
//! The set of order channels is closed: the dataset columns are matched
//! against [`Channel::ALL`] instead of being discovered by name pattern.

use std::collections::HashMap;
use std::fmt;

use egui::Color32;

/// Suffix of the percentage column paired with each channel's count column.
pub const PCT_SUFFIX: &str = "_pct";

/// A sales acquisition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    WhatsApp,
    Site,
    Telefone,
    Presencial,
    Email,
    SemCanal,
    Visita,
}

impl Channel {
    /// Every channel, in registry (and legend) order.
    pub const ALL: [Channel; 7] = [
        Channel::WhatsApp,
        Channel::Site,
        Channel::Telefone,
        Channel::Presencial,
        Channel::Email,
        Channel::SemCanal,
        Channel::Visita,
    ];

    /// Display name; also the name of the absolute count column.
    pub fn name(&self) -> &'static str {
        match self {
            Channel::WhatsApp => "WhatsApp",
            Channel::Site => "Site",
            Channel::Telefone => "Telefone",
            Channel::Presencial => "Presencial",
            Channel::Email => "E-mail",
            Channel::SemCanal => "Sem canal",
            Channel::Visita => "Visita",
        }
    }

    pub fn count_column(&self) -> &'static str {
        self.name()
    }

    pub fn pct_column(&self) -> String {
        format!("{}{PCT_SUFFIX}", self.name())
    }

    /// Look a channel up by its display name (exact match).
    pub fn from_name(name: &str) -> Option<Channel> {
        Channel::ALL.iter().copied().find(|c| c.name() == name)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a `#rrggbb` (or `rrggbb`) hex string.
pub fn parse_hex_color(s: &str) -> Option<Color32> {
    let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color32::from_rgb(r, g, b))
}

/// Channel → display color. Channels without an entry are drawn with the
/// plot's automatic palette.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelColors {
    colors: HashMap<Channel, Color32>,
}

impl Default for ChannelColors {
    fn default() -> Self {
        let colors = [
            (Channel::WhatsApp, Color32::from_rgb(0x98, 0xdf, 0x8a)),
            (Channel::Site, Color32::from_rgb(0xff, 0x98, 0x96)),
            (Channel::Telefone, Color32::from_rgb(0xff, 0x7f, 0x0e)),
            (Channel::Presencial, Color32::from_rgb(0x1f, 0x77, 0xb4)),
            (Channel::Email, Color32::from_rgb(0xae, 0xc7, 0xe8)),
            (Channel::SemCanal, Color32::from_rgb(0xe3, 0x77, 0xc2)),
            (Channel::Visita, Color32::from_rgb(0xbc, 0xbd, 0x22)),
        ];
        Self {
            colors: colors.into_iter().collect(),
        }
    }
}

impl ChannelColors {
    /// An empty map: every channel falls back to the automatic palette.
    pub fn empty() -> Self {
        Self {
            colors: HashMap::new(),
        }
    }

    pub fn with(mut self, channel: Channel, color: Color32) -> Self {
        self.colors.insert(channel, color);
        self
    }

    pub fn get(&self, channel: Channel) -> Option<Color32> {
        self.colors.get(&channel).copied()
    }

    /// Pairs of distinct channels that were given the same color.
    pub fn shared_colors(&self) -> Vec<(Channel, Channel)> {
        let mut out = Vec::new();
        for (i, a) in Channel::ALL.iter().enumerate() {
            for b in &Channel::ALL[i + 1..] {
                if let (Some(ca), Some(cb)) = (self.get(*a), self.get(*b)) {
                    if ca == cb {
                        out.push((*a, *b));
                    }
                }
            }
        }
        out
    }
}
