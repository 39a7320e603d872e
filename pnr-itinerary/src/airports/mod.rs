//! Airport reference data.
//!
//! Timezone resolution and rendering both need to know, per IATA code, the
//! airport's IANA timezone and a display name. The table is an explicit
//! value passed into the pipeline, so callers can extend or replace the
//! built-in data without touching any global state.

use std::collections::HashMap;
use std::io::Read;

use chrono_tz::Tz;
use serde::Deserialize;

use crate::domain::{IataCode, InvalidIata};

/// Errors loading or extending airport data.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("invalid airport JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid override CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    InvalidIata(#[from] InvalidIata),

    #[error("unknown IANA zone {zone:?} for airport {iata}")]
    UnknownZone { iata: IataCode, zone: String },
}

/// One airport: its timezone and display names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirportRecord {
    pub iata: IataCode,
    pub tz: Tz,
    /// English city name.
    pub city: String,
    /// Russian city name, when known.
    pub city_ru: Option<String>,
}

impl AirportRecord {
    /// Preferred display name: Russian if known, else English.
    pub fn display_name(&self) -> &str {
        self.city_ru.as_deref().unwrap_or(&self.city)
    }
}

/// On-disk shape of an airport record, with the zone as an IANA name.
#[derive(Debug, Deserialize)]
struct RawAirportRecord {
    iata: String,
    tz: String,
    city: String,
    #[serde(default)]
    city_ru: Option<String>,
}

/// Immutable-by-convention lookup table keyed by IATA code.
#[derive(Debug, Clone, Default)]
pub struct AirportTable {
    records: HashMap<IataCode, AirportRecord>,
}

impl AirportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any previous entry for the same code.
    pub fn insert(&mut self, record: AirportRecord) {
        self.records.insert(record.iata, record);
    }

    pub fn get(&self, iata: IataCode) -> Option<&AirportRecord> {
        self.records.get(&iata)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The compiled-in table covering the airports this tool most commonly
    /// sees. Callers needing more load a JSON table on top.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for &(iata, tz, city, city_ru) in BUILTIN_AIRPORTS {
            // Entries are literals; the well-formedness test keeps them valid.
            let Ok(iata) = IataCode::parse(iata) else {
                continue;
            };
            table.insert(AirportRecord {
                iata,
                tz,
                city: city.to_string(),
                city_ru: Some(city_ru.to_string()),
            });
        }
        table
    }

    /// Load additional airports from a JSON array of records:
    ///
    /// ```json
    /// [{"iata": "NQZ", "tz": "Asia/Almaty", "city": "Astana", "city_ru": "Астана"}]
    /// ```
    ///
    /// Loaded records override built-in ones with the same code.
    pub fn load_json(&mut self, reader: impl Read) -> Result<usize, TableError> {
        let raw: Vec<RawAirportRecord> = serde_json::from_reader(reader)?;
        let count = raw.len();
        for record in raw {
            let iata = IataCode::parse(&record.iata)?;
            let tz: Tz = record.tz.parse().map_err(|_| TableError::UnknownZone {
                iata,
                zone: record.tz.clone(),
            })?;
            self.insert(AirportRecord {
                iata,
                tz,
                city: record.city,
                city_ru: record.city_ru,
            });
        }
        Ok(count)
    }

    /// Apply Russian display-name overrides from a CSV with an
    /// `iata,airport_ru` header. Overrides for codes not already in the
    /// table are skipped with a warning, since there is no timezone to pair
    /// them with. Returns the number of overrides applied.
    pub fn apply_ru_overrides(&mut self, reader: impl Read) -> Result<usize, TableError> {
        #[derive(Debug, Deserialize)]
        struct Override {
            iata: String,
            airport_ru: String,
        }

        let mut applied = 0;
        let mut csv = csv::Reader::from_reader(reader);
        for row in csv.deserialize() {
            let row: Override = row?;
            let iata = IataCode::parse(&row.iata)?;
            match self.records.get_mut(&iata) {
                Some(record) => {
                    record.city_ru = Some(row.airport_ru);
                    applied += 1;
                }
                None => {
                    tracing::warn!(%iata, "name override for unknown airport skipped");
                }
            }
        }
        Ok(applied)
    }
}

/// Compiled-in airports: code, zone, English city, Russian city.
const BUILTIN_AIRPORTS: &[(&str, Tz, &str, &str)] = &[
    // Kazakhstan and Central Asia
    ("NQZ", Tz::Asia__Almaty, "Astana", "Астана"),
    ("ALA", Tz::Asia__Almaty, "Almaty", "Алматы"),
    ("CIT", Tz::Asia__Almaty, "Shymkent", "Шымкент"),
    ("GUW", Tz::Asia__Atyrau, "Atyrau", "Атырау"),
    ("TAS", Tz::Asia__Tashkent, "Tashkent", "Ташкент"),
    ("FRU", Tz::Asia__Bishkek, "Bishkek", "Бишкек"),
    ("GYD", Tz::Asia__Baku, "Baku", "Баку"),
    ("TBS", Tz::Asia__Tbilisi, "Tbilisi", "Тбилиси"),
    ("EVN", Tz::Asia__Yerevan, "Yerevan", "Ереван"),
    // Russia
    ("SVO", Tz::Europe__Moscow, "Moscow Sheremetyevo", "Москва Шереметьево"),
    ("DME", Tz::Europe__Moscow, "Moscow Domodedovo", "Москва Домодедово"),
    ("VKO", Tz::Europe__Moscow, "Moscow Vnukovo", "Москва Внуково"),
    ("LED", Tz::Europe__Moscow, "Saint Petersburg", "Санкт-Петербург"),
    ("KZN", Tz::Europe__Moscow, "Kazan", "Казань"),
    ("SVX", Tz::Asia__Yekaterinburg, "Yekaterinburg", "Екатеринбург"),
    ("OVB", Tz::Asia__Novosibirsk, "Novosibirsk", "Новосибирск"),
    // Europe
    ("FRA", Tz::Europe__Berlin, "Frankfurt", "Франкфурт"),
    ("MUC", Tz::Europe__Berlin, "Munich", "Мюнхен"),
    ("BER", Tz::Europe__Berlin, "Berlin", "Берлин"),
    ("LHR", Tz::Europe__London, "London Heathrow", "Лондон Хитроу"),
    ("LGW", Tz::Europe__London, "London Gatwick", "Лондон Гатвик"),
    ("CDG", Tz::Europe__Paris, "Paris Charles de Gaulle", "Париж Шарль-де-Голль"),
    ("ORY", Tz::Europe__Paris, "Paris Orly", "Париж Орли"),
    ("AMS", Tz::Europe__Amsterdam, "Amsterdam", "Амстердам"),
    ("ZRH", Tz::Europe__Zurich, "Zurich", "Цюрих"),
    ("GVA", Tz::Europe__Zurich, "Geneva", "Женева"),
    ("VIE", Tz::Europe__Vienna, "Vienna", "Вена"),
    ("PRG", Tz::Europe__Prague, "Prague", "Прага"),
    ("WAW", Tz::Europe__Warsaw, "Warsaw", "Варшава"),
    ("HEL", Tz::Europe__Helsinki, "Helsinki", "Хельсинки"),
    ("RIX", Tz::Europe__Riga, "Riga", "Рига"),
    ("MAD", Tz::Europe__Madrid, "Madrid", "Мадрид"),
    ("BCN", Tz::Europe__Madrid, "Barcelona", "Барселона"),
    ("FCO", Tz::Europe__Rome, "Rome Fiumicino", "Рим Фьюмичино"),
    ("MXP", Tz::Europe__Rome, "Milan Malpensa", "Милан Мальпенса"),
    ("IST", Tz::Europe__Istanbul, "Istanbul", "Стамбул"),
    ("SAW", Tz::Europe__Istanbul, "Istanbul Sabiha Gokcen", "Стамбул Сабиха Гёкчен"),
    ("AYT", Tz::Europe__Istanbul, "Antalya", "Анталья"),
    // Middle East and Asia
    ("DXB", Tz::Asia__Dubai, "Dubai", "Дубай"),
    ("AUH", Tz::Asia__Dubai, "Abu Dhabi", "Абу-Даби"),
    ("DOH", Tz::Asia__Qatar, "Doha", "Доха"),
    ("DEL", Tz::Asia__Kolkata, "Delhi", "Дели"),
    ("BKK", Tz::Asia__Bangkok, "Bangkok", "Бангкок"),
    ("PEK", Tz::Asia__Shanghai, "Beijing", "Пекин"),
    ("ICN", Tz::Asia__Seoul, "Seoul Incheon", "Сеул Инчхон"),
    ("NRT", Tz::Asia__Tokyo, "Tokyo Narita", "Токио Нарита"),
    // Americas
    ("JFK", Tz::America__New_York, "New York JFK", "Нью-Йорк"),
    ("LAX", Tz::America__Los_Angeles, "Los Angeles", "Лос-Анджелес"),
    ("YYZ", Tz::America__Toronto, "Toronto", "Торонто"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn iata(code: &str) -> IataCode {
        IataCode::parse(code).unwrap()
    }

    #[test]
    fn builtin_table_is_well_formed() {
        let table = AirportTable::builtin();
        assert_eq!(table.len(), BUILTIN_AIRPORTS.len());
        for &(code, _, _, _) in BUILTIN_AIRPORTS {
            assert!(IataCode::parse(code).is_ok(), "{code}");
            assert!(table.get(iata(code)).is_some(), "{code}");
        }
    }

    #[test]
    fn builtin_lookup() {
        let table = AirportTable::builtin();
        let record = table.get(iata("NQZ")).unwrap();
        assert_eq!(record.tz, Tz::Asia__Almaty);
        assert_eq!(record.display_name(), "Астана");
        assert!(table.get(iata("ZZZ")).is_none());
    }

    #[test]
    fn display_name_falls_back_to_english() {
        let record = AirportRecord {
            iata: iata("XYZ"),
            tz: Tz::UTC,
            city: "Nowhere".to_string(),
            city_ru: None,
        };
        assert_eq!(record.display_name(), "Nowhere");
    }

    #[test]
    fn load_json_adds_and_overrides() {
        let mut table = AirportTable::builtin();
        let json = r#"[
            {"iata": "TSE", "tz": "Asia/Almaty", "city": "Astana (old code)", "city_ru": "Астана"},
            {"iata": "FRA", "tz": "Europe/Berlin", "city": "Frankfurt am Main"}
        ]"#;
        let count = table.load_json(Cursor::new(json)).unwrap();
        assert_eq!(count, 2);
        assert_eq!(table.get(iata("TSE")).unwrap().display_name(), "Астана");
        // Override replaced the record, dropping the Russian name
        assert_eq!(
            table.get(iata("FRA")).unwrap().display_name(),
            "Frankfurt am Main"
        );
    }

    #[test]
    fn load_json_rejects_bad_zone() {
        let mut table = AirportTable::new();
        let json = r#"[{"iata": "AAA", "tz": "Mars/Olympus", "city": "Nowhere"}]"#;
        let err = table.load_json(Cursor::new(json)).unwrap_err();
        assert!(matches!(err, TableError::UnknownZone { .. }));
    }

    #[test]
    fn load_json_rejects_bad_iata() {
        let mut table = AirportTable::new();
        let json = r#"[{"iata": "toolong", "tz": "UTC", "city": "Nowhere"}]"#;
        assert!(matches!(
            table.load_json(Cursor::new(json)),
            Err(TableError::InvalidIata(_))
        ));
    }

    #[test]
    fn ru_overrides_applied_and_unknown_skipped() {
        let mut table = AirportTable::builtin();
        let csv = "iata,airport_ru\nFRA,Франкфурт-на-Майне\nQQQ,Нигде\n";
        let applied = table.apply_ru_overrides(Cursor::new(csv)).unwrap();
        assert_eq!(applied, 1);
        assert_eq!(
            table.get(iata("FRA")).unwrap().display_name(),
            "Франкфурт-на-Майне"
        );
        assert!(table.get(iata("QQQ")).is_none());
    }

    #[test]
    fn ru_overrides_load_from_file() {
        use std::io::Write as _;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "iata,airport_ru\nNQZ,Астана Нурсултан\n").unwrap();

        let mut table = AirportTable::builtin();
        let reader = std::fs::File::open(file.path()).unwrap();
        assert_eq!(table.apply_ru_overrides(reader).unwrap(), 1);
        assert_eq!(
            table.get(iata("NQZ")).unwrap().display_name(),
            "Астана Нурсултан"
        );
    }

    #[test]
    fn ru_overrides_bad_csv_is_an_error() {
        let mut table = AirportTable::builtin();
        let csv = "iata,airport_ru\nFRA\n";
        assert!(matches!(
            table.apply_ru_overrides(Cursor::new(csv)),
            Err(TableError::Csv(_))
        ));
    }
}
