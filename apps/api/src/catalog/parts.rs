//! Replacement parts a technician can order against a case.

use serde::{Deserialize, Serialize};

/// A known replacement part.
///
/// Variant order is the catalog order: the part-order text is always written
/// back in this order, and when two labels could match the same line the
/// earlier variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum PartName {
    MbPlanar,
    Ram,
    Ssd,
    Speaker,
    CCover,
    ACover,
    BCover,
    DCover,
    EdpCable,
    SpeakerCable,
    Subboard,
    DcIn,
    Cmos,
    Battery,
    Lcd,
    LcdCable,
    Tp,
    TpCable,
    Keyboard,
    CCoverKeyboard,
    Psu,
    Dock,
}

impl PartName {
    pub const ALL: [PartName; 22] = [
        PartName::MbPlanar,
        PartName::Ram,
        PartName::Ssd,
        PartName::Speaker,
        PartName::CCover,
        PartName::ACover,
        PartName::BCover,
        PartName::DCover,
        PartName::EdpCable,
        PartName::SpeakerCable,
        PartName::Subboard,
        PartName::DcIn,
        PartName::Cmos,
        PartName::Battery,
        PartName::Lcd,
        PartName::LcdCable,
        PartName::Tp,
        PartName::TpCable,
        PartName::Keyboard,
        PartName::CCoverKeyboard,
        PartName::Psu,
        PartName::Dock,
    ];

    /// Text written into the part-order box.
    pub fn label(self) -> &'static str {
        match self {
            PartName::MbPlanar => "MB/PLANAR",
            PartName::Ram => "RAM",
            PartName::Ssd => "SSD",
            PartName::Speaker => "SPEAKER",
            PartName::CCover => "C-COVER",
            PartName::ACover => "A-COVER",
            PartName::BCover => "B-COVER",
            PartName::DCover => "D-COVER",
            PartName::EdpCable => "EDP-CABLE",
            PartName::SpeakerCable => "SPK-CABLE",
            PartName::Subboard => "SUBBOARD",
            PartName::DcIn => "DC-IN",
            PartName::Cmos => "CMOS",
            PartName::Battery => "BATTERY",
            PartName::Lcd => "LCD",
            PartName::LcdCable => "LCD-CABLE",
            PartName::Tp => "TP",
            PartName::TpCable => "TP-CABLE",
            PartName::Keyboard => "KEYBOARD",
            PartName::CCoverKeyboard => "C-CVR+KB",
            PartName::Psu => "PSU",
            PartName::Dock => "DOCK",
        }
    }

    /// Stable identifier used over JSON.
    pub fn key(self) -> &'static str {
        match self {
            PartName::MbPlanar => "mb_planar",
            PartName::Ram => "ram",
            PartName::Ssd => "ssd",
            PartName::Speaker => "speaker",
            PartName::CCover => "c_cover",
            PartName::ACover => "a_cover",
            PartName::BCover => "b_cover",
            PartName::DCover => "d_cover",
            PartName::EdpCable => "edp_cable",
            PartName::SpeakerCable => "speaker_cable",
            PartName::Subboard => "subboard",
            PartName::DcIn => "dc_in",
            PartName::Cmos => "cmos",
            PartName::Battery => "battery",
            PartName::Lcd => "lcd",
            PartName::LcdCable => "lcd_cable",
            PartName::Tp => "tp",
            PartName::TpCable => "tp_cable",
            PartName::Keyboard => "keyboard",
            PartName::CCoverKeyboard => "c_cover_keyboard",
            PartName::Psu => "psu",
            PartName::Dock => "dock",
        }
    }

    /// Parts that are usually ordered in multiples; the chip editor asks for a
    /// quantity when they are added.
    pub fn prompts_quantity(self) -> bool {
        matches!(self, PartName::Ram | PartName::Ssd)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(label))
    }
}

impl From<PartName> for &'static str {
    fn from(part: PartName) -> Self {
        part.key()
    }
}

impl TryFrom<String> for PartName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PartName::from_key(&value)
            .or_else(|| PartName::from_label(&value))
            .ok_or_else(|| format!("unknown part '{value}'"))
    }
}
