//! Static corpora used across harnesses.
//!
//! Phrases come as `(phrase, expected canonical text)` pairs against the
//! reference date 2025-04-30. Snapshots are JSON lines in the shape each
//! bookmaker adapter expects.

/// Reference date for [`PHRASES`].
pub const PHRASE_REF: (i32, u32, u32) = (2025, 4, 30);

/// Listing phrases in every supported shape, with their resolution.
pub const PHRASES: &[(&str, &str)] = &[
    ("astăzi, 15:30", "30/04/2025 15:30"),
    ("Azi, 09:05", "30/04/2025 09:05"),
    ("mâine, 15:15", "01/05/2025 15:15"),
    ("Maine, 23:59", "01/05/2025 23:59"),
    ("lun. 28, 00:30", "28/05/2025 00:30"),
    ("Vin. 30, 21:00", "30/04/2025 21:00"),
    ("03.05, 16:00", "03/05/2025 16:00"),
    ("1.5, 8:00", "01/05/2025 08:00"),
    ("Sâmbătă, 3 mai 2025, 19:30", "03/05/2025 19:30"),
];

/// Phrases no grammar accepts.
pub const UNRECOGNIZED: &[&str] = &["foo, bar", "", "15:30", "astăzi", "28 aprilie"];

/// Superbet listing: one card per poll, then a batch with a repeat.
pub const SUPERBET_SNAPSHOT: &str = r#"
{"fields":{"date":"Astăzi, 18:00","team1":"FCSB","team2":"Rapid"},"odds":[{"label":"1","value":"2.05"},{"label":"X","value":"3.40"},{"label":"2","value":"3.60"}]}
[{"fields":{"date":"Mâine, 20:30","team1":"CFR Cluj","team2":"U Cluj"},"odds":[{"label":"1","value":"1.90"},{"label":"X","value":"3.30"},{"label":"2","value":"4.20"}]},{"fields":{"date":"astăzi, 18:00","team1":"F.C.S.B.","team2":"Rapid"}},{"fields":{"date":"Astăzi, 18:00","team1":"fcsb","team2":"RAPID"},"odds":[{"label":"1","value":"2.10"}]}]
{"fields":{"date":"foo, bar","team1":"Farul","team2":"Oţelul"}}
"#;

/// MaxBet listing with two-line time and competitor blocks.
pub const MAXBET_SNAPSHOT: &str = r#"
[{"fields":{"time":"01/05\n20:30","competitors":"CFR Cluj\nU Cluj"},"odds":[{"value":"1.95"},{"value":"3.20"},{"value":"4.00"}]},{"fields":{"time":"30/04\n18:00","competitors":"FCSB\nRapid"},"odds":[{"value":"2.00"},{"value":"3.70"},{"value":"3.75"}]}]
"#;

/// Spin listing with separate date and hour spans.
pub const SPIN_SNAPSHOT: &str = r#"
{"fields":{"date":"Azi","hour":"18:00","team1":"FCSB","team2":"Rapid"},"odds":[{"label":"1","value":"2.20"},{"label":"X","value":"3.25"},{"label":"2","value":"3.50"}]}
{"fields":{"date":"–","hour":"–","team1":"Dinamo","team2":"Petrolul"}}
"#;
