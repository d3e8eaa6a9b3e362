//! Troubleshooting actions a CE can report as already performed.

use serde::{Deserialize, Serialize};

/// (label, description) in catalog order. The label is what the chip shows and
/// what the Premier template lists; the description is the sentence the APF
/// report uses.
const TS_CATALOG: &[(&str, &str)] = &[
    ("AC ADAPTER", "AC adapter and power cord checked, known-good adapter tested"),
    ("PERIPHERALS-OFF", "All external peripherals disconnected"),
    ("LCD/HINGES", "LCD panel and hinges inspected for damage"),
    ("SSD INSPECT", "SSD inspected and seating verified"),
    ("FRONT-CABLES", "Front I/O cables checked"),
    ("BATT-CONN", "Battery connector inspected and reseated"),
    ("CABLE-ROUTE", "Internal cable routing verified"),
    ("KEYBOARD", "Keyboard function tested"),
    ("POWER-DRAIN", "Power drain performed"),
    ("DOCK-STATION", "Docking station disconnected and tested separately"),
    ("CAM-SHUTTER", "Camera shutter position checked"),
    ("WLAN-RESEAT", "WLAN card reseated"),
    ("MB-INSPECT", "Mainboard visually inspected"),
    ("BATT-REMOVED", "Unit tested with battery removed"),
    ("CMOS-RESET", "CMOS reset performed"),
    ("TOUCHPAD", "Touchpad function tested"),
    ("AC-PORT", "AC power port inspected"),
    ("USB-PORTS", "USB ports tested"),
    ("DISP-MECH", "Display mechanics checked"),
    ("ANT-CABLES", "Antenna cables checked"),
    ("FAN-CHECK", "Fan operation checked"),
    ("BATT-SWELL", "Battery checked for swelling"),
    ("POST/BEEP", "POST and beep codes evaluated"),
    ("MB-HEAT", "Mainboard checked for hot spots"),
    ("LIQUID-DMG", "Unit inspected for liquid damage"),
    ("LAN-PORT", "LAN port tested"),
    ("RAM-RESEAT", "Memory modules reseated"),
    ("GPU-RESEAT", "Graphics card reseated"),
    ("PSU-CABLES", "PSU cables checked"),
    ("HEATSINK-MT", "Heatsink mounting checked"),
    ("USB-C-PWR", "USB-C power delivery tested"),
    ("HINGE-STAB", "Hinge stability checked"),
    ("SPK-OPEN", "Speakers checked for open circuit"),
    ("PORT-DMG", "Ports inspected for physical damage"),
    ("EXT-DEV-OFF", "External devices removed"),
    ("EXT-MONITOR", "Tested with external monitor"),
    ("RAM-INDIV", "Memory modules tested individually"),
    ("SSD-RESEAT", "SSD reseated"),
    ("PSU-SWITCH", "PSU switch and voltage selector checked"),
    ("THERMAL-IND", "Thermal indicators checked"),
    ("CHASSIS-INS", "Chassis inspected"),
    ("VIDEO-OUT", "Video outputs tested"),
    ("AUDIO-PORTS", "Audio ports tested"),
    ("WIFI-ANT", "WiFi antenna connection checked"),
    ("BLUETOOTH", "Bluetooth function tested"),
    ("BIOS-UPDATE", "BIOS updated to latest version"),
    ("DRIVER-REINST", "Drivers reinstalled"),
    ("OS-REINSTALL", "Operating system reinstalled"),
    ("MEM-TEST", "Memory diagnostic run"),
    ("DISP-CALIB", "Display calibration checked"),
    ("TOUCH-TEST", "Touchscreen function tested"),
    ("WEBCAM-TEST", "Webcam function tested"),
    ("MIC-TEST", "Microphone function tested"),
    ("CHARGER-TEST", "Charger output tested"),
    ("BATT-CALIB", "Battery calibration performed"),
];

/// A known troubleshooting action. Only constructible from the catalog, so
/// `label` and `description` are total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub struct TsAction(usize);

impl TsAction {
    pub fn all() -> impl Iterator<Item = TsAction> {
        (0..TS_CATALOG.len()).map(TsAction)
    }

    pub fn label(self) -> &'static str {
        TS_CATALOG[self.0].0
    }

    pub fn description(self) -> &'static str {
        TS_CATALOG[self.0].1
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        TS_CATALOG
            .iter()
            .position(|(l, _)| l.eq_ignore_ascii_case(label))
            .map(TsAction)
    }

    /// Case-insensitive substring match on label or description.
    pub fn matches(self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.label().to_lowercase().contains(&query)
            || self.description().to_lowercase().contains(&query)
    }
}

impl From<TsAction> for &'static str {
    fn from(action: TsAction) -> Self {
        action.label()
    }
}

impl TryFrom<String> for TsAction {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TsAction::from_label(&value).ok_or_else(|| format!("unknown troubleshooting action '{value}'"))
    }
}

/// Visible candidates for a chip-grid search box, in catalog order.
pub fn filter_ts_actions(query: &str) -> Vec<TsAction> {
    TsAction::all().filter(|a| a.matches(query)).collect()
}
