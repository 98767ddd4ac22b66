// shared/src/season.rs
//
// Season tables backing the filter menu: selectable years, the Grand Prix
// calendar of each year and the race-seat roster of each year.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const YEARS: [&str; 5] = ["2021", "2022", "2023", "2024", "2025"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash, Default)]
pub enum SessionIdentifier {
    #[serde(rename = "FP1")]
    Fp1,
    #[serde(rename = "FP2")]
    Fp2,
    #[serde(rename = "FP3")]
    Fp3,
    #[default]
    Qualifying,
    Race,
}

impl SessionIdentifier {
    pub const ALL: [SessionIdentifier; 5] = [
        SessionIdentifier::Fp1,
        SessionIdentifier::Fp2,
        SessionIdentifier::Fp3,
        SessionIdentifier::Qualifying,
        SessionIdentifier::Race,
    ];

    /// Human label shown in the session selector.
    pub fn label(&self) -> &'static str {
        match self {
            SessionIdentifier::Fp1 => "FP1",
            SessionIdentifier::Fp2 => "FP2",
            SessionIdentifier::Fp3 => "FP3",
            SessionIdentifier::Qualifying => "Qualifying",
            SessionIdentifier::Race => "Race",
        }
    }

    /// Code the analytics API expects in the `identifier` parameter.
    pub fn api_code(&self) -> &'static str {
        match self {
            SessionIdentifier::Fp1 => "FP1",
            SessionIdentifier::Fp2 => "FP2",
            SessionIdentifier::Fp3 => "FP3",
            SessionIdentifier::Qualifying => "Q",
            SessionIdentifier::Race => "R",
        }
    }

    /// Accepts either the selector label or the API code.
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.label().eq_ignore_ascii_case(s) || id.api_code().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for SessionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const SESSIONS_2021: &[&str] = &[
    "Bahrain Grand Prix",
    "Emilia Romagna Grand Prix",
    "Portuguese Grand Prix",
    "Spanish Grand Prix",
    "Monaco Grand Prix",
    "Azerbaijan Grand Prix",
    "French Grand Prix",
    "Styrian Grand Prix",
    "Austrian Grand Prix",
    "British Grand Prix",
    "Hungarian Grand Prix",
    "Belgian Grand Prix",
    "Dutch Grand Prix",
    "Italian Grand Prix",
    "Russian Grand Prix",
    "Turkish Grand Prix",
    "United States Grand Prix",
    "Mexico City Grand Prix",
    "São Paulo Grand Prix",
    "Qatar Grand Prix",
    "Saudi Arabian Grand Prix",
    "Abu Dhabi Grand Prix",
];

const SESSIONS_2022: &[&str] = &[
    "Bahrain Grand Prix",
    "Saudi Arabian Grand Prix",
    "Australian Grand Prix",
    "Emilia Romagna Grand Prix",
    "Miami Grand Prix",
    "Spanish Grand Prix",
    "Monaco Grand Prix",
    "Azerbaijan Grand Prix",
    "Canadian Grand Prix",
    "British Grand Prix",
    "Austrian Grand Prix",
    "French Grand Prix",
    "Hungarian Grand Prix",
    "Belgian Grand Prix",
    "Dutch Grand Prix",
    "Italian Grand Prix",
    "Singapore Grand Prix",
    "Japanese Grand Prix",
    "United States Grand Prix",
    "Mexico City Grand Prix",
    "São Paulo Grand Prix",
    "Abu Dhabi Grand Prix",
];

const SESSIONS_2023: &[&str] = &[
    "Bahrain Grand Prix",
    "Saudi Arabian Grand Prix",
    "Australian Grand Prix",
    "Azerbaijan Grand Prix",
    "Miami Grand Prix",
    "Monaco Grand Prix",
    "Spanish Grand Prix",
    "Canadian Grand Prix",
    "Austrian Grand Prix",
    "British Grand Prix",
    "Hungarian Grand Prix",
    "Belgian Grand Prix",
    "Dutch Grand Prix",
    "Italian Grand Prix",
    "Singapore Grand Prix",
    "Japanese Grand Prix",
    "Qatar Grand Prix",
    "United States Grand Prix",
    "Mexico City Grand Prix",
    "São Paulo Grand Prix",
    "Las Vegas Grand Prix",
    "Abu Dhabi Grand Prix",
];

const SESSIONS_2024: &[&str] = &[
    "Bahrain Grand Prix",
    "Saudi Arabian Grand Prix",
    "Australian Grand Prix",
    "Japanese Grand Prix",
    "Chinese Grand Prix",
    "Miami Grand Prix",
    "Emilia Romagna Grand Prix",
    "Monaco Grand Prix",
    "Canadian Grand Prix",
    "Spanish Grand Prix",
    "Austrian Grand Prix",
    "British Grand Prix",
    "Hungarian Grand Prix",
    "Belgian Grand Prix",
    "Dutch Grand Prix",
    "Italian Grand Prix",
    "Azerbaijan Grand Prix",
    "Singapore Grand Prix",
    "United States Grand Prix",
    "Mexico City Grand Prix",
    "São Paulo Grand Prix",
    "Las Vegas Grand Prix",
    "Qatar Grand Prix",
    "Abu Dhabi Grand Prix",
];

const SESSIONS_2025: &[&str] = &[
    "Australian Grand Prix",
    "Chinese Grand Prix",
    "Japanese Grand Prix",
    "Bahrain Grand Prix",
    "Saudi Arabian Grand Prix",
    "Miami Grand Prix",
    "Emilia Romagna Grand Prix",
    "Monaco Grand Prix",
    "Spanish Grand Prix",
    "Canadian Grand Prix",
    "Austrian Grand Prix",
    "British Grand Prix",
    "Belgian Grand Prix",
    "Hungarian Grand Prix",
    "Dutch Grand Prix",
    "Italian Grand Prix",
    "Azerbaijan Grand Prix",
    "Singapore Grand Prix",
    "United States Grand Prix",
    "Mexico City Grand Prix",
    "São Paulo Grand Prix",
    "Las Vegas Grand Prix",
    "Qatar Grand Prix",
    "Abu Dhabi Grand Prix",
];

const DRIVERS_2021: &[&str] = &[
    "Lewis Hamilton",
    "Valtteri Bottas",
    "Max Verstappen",
    "Sergio Pérez",
    "Lando Norris",
    "Daniel Ricciardo",
    "Charles Leclerc",
    "Carlos Sainz",
    "Pierre Gasly",
    "Yuki Tsunoda",
    "Fernando Alonso",
    "Esteban Ocon",
    "Sebastian Vettel",
    "Lance Stroll",
    "Kimi Räikkönen",
    "Antonio Giovinazzi",
    "George Russell",
    "Nicholas Latifi",
    "Mick Schumacher",
    "Nikita Mazepin",
];

const DRIVERS_2022: &[&str] = &[
    "Max Verstappen",
    "Sergio Pérez",
    "Charles Leclerc",
    "Carlos Sainz",
    "Lewis Hamilton",
    "George Russell",
    "Lando Norris",
    "Daniel Ricciardo",
    "Esteban Ocon",
    "Fernando Alonso",
    "Valtteri Bottas",
    "Zhou Guanyu",
    "Pierre Gasly",
    "Yuki Tsunoda",
    "Sebastian Vettel",
    "Lance Stroll",
    "Kevin Magnussen",
    "Mick Schumacher",
    "Alexander Albon",
    "Nicholas Latifi",
    "Nyck de Vries",
    "Nico Hülkenberg",
];

const DRIVERS_2023: &[&str] = &[
    "Max Verstappen",
    "Sergio Pérez",
    "Lewis Hamilton",
    "George Russell",
    "Charles Leclerc",
    "Carlos Sainz",
    "Lando Norris",
    "Oscar Piastri",
    "Fernando Alonso",
    "Lance Stroll",
    "Pierre Gasly",
    "Esteban Ocon",
    "Alexander Albon",
    "Logan Sargeant",
    "Valtteri Bottas",
    "Zhou Guanyu",
    "Nico Hülkenberg",
    "Kevin Magnussen",
    "Yuki Tsunoda",
    "Nyck de Vries",
    "Daniel Ricciardo",
    "Liam Lawson",
];

const DRIVERS_2024: &[&str] = &[
    "Max Verstappen",
    "Sergio Pérez",
    "Lewis Hamilton",
    "George Russell",
    "Charles Leclerc",
    "Carlos Sainz",
    "Lando Norris",
    "Oscar Piastri",
    "Fernando Alonso",
    "Lance Stroll",
    "Pierre Gasly",
    "Esteban Ocon",
    "Alexander Albon",
    "Logan Sargeant",
    "Franco Colapinto",
    "Valtteri Bottas",
    "Zhou Guanyu",
    "Nico Hülkenberg",
    "Kevin Magnussen",
    "Oliver Bearman",
    "Yuki Tsunoda",
    "Daniel Ricciardo",
    "Liam Lawson",
];

const DRIVERS_2025: &[&str] = &[
    "Max Verstappen",
    "Yuki Tsunoda",
    "Liam Lawson",
    "Lewis Hamilton",
    "Charles Leclerc",
    "George Russell",
    "Andrea Kimi Antonelli",
    "Lando Norris",
    "Oscar Piastri",
    "Fernando Alonso",
    "Lance Stroll",
    "Pierre Gasly",
    "Jack Doohan",
    "Franco Colapinto",
    "Alexander Albon",
    "Carlos Sainz",
    "Nico Hülkenberg",
    "Gabriel Bortoleto",
    "Esteban Ocon",
    "Oliver Bearman",
    "Isack Hadjar",
];

/// Grand Prix names run in `year`. Unknown years have no sessions.
pub fn sessions_for(year: &str) -> &'static [&'static str] {
    match year.trim() {
        "2021" => SESSIONS_2021,
        "2022" => SESSIONS_2022,
        "2023" => SESSIONS_2023,
        "2024" => SESSIONS_2024,
        "2025" => SESSIONS_2025,
        _ => &[],
    }
}

/// Drivers who raced in `year`. Unknown years have no drivers.
pub fn drivers_for(year: &str) -> &'static [&'static str] {
    match year.trim() {
        "2021" => DRIVERS_2021,
        "2022" => DRIVERS_2022,
        "2023" => DRIVERS_2023,
        "2024" => DRIVERS_2024,
        "2025" => DRIVERS_2025,
        _ => &[],
    }
}
