// crates/geocity-core/src/extract.rs

//! Qualifier extraction: peel country and subdivision qualifiers off a
//! query before scoring.
//!
//! Four passes, front-or-back matching on each: full country name (longest
//! name first), two-letter USPS state code, full US state name, and
//! finally an international admin-1 code hanging off the end of the query.
//! Whatever survives becomes the name tokens handed to the scorer.

use crate::model::{AdminDirectory, CountryInfo};
use crate::text::lower;

/// What the extractor peels off a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Qualifiers {
    /// Two-letter country code, or empty.
    pub country_iso: String,
    /// Subdivision code (2–3 chars, uppercase), or empty.
    pub state_code: String,
    /// Every 2–3 character ALL-CAPS token of the original query, in order.
    /// A weak region/country hint for the scorer.
    pub abbrevs: Vec<String>,
    /// Surviving tokens of the residual query, lowercased.
    pub name_slice: Vec<String>,
}

/// USPS two-letter codes and full names of the US states plus DC.
pub const US_STATES: [(&str, &str); 51] = [
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("DC", "District of Columbia"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

/// Precomputed matching tables. Built once per facade from the country
/// table and the admin-1 directory.
#[derive(Debug, Clone, Default)]
pub struct QualifierExtractor {
    /// (lowercased country name, ISO-2), longest names first so that
    /// "guinea-bissau" wins over "guinea".
    countries: Vec<(String, String)>,
}

impl QualifierExtractor {
    pub fn new(countries: &[CountryInfo]) -> Self {
        let mut table: Vec<(String, String)> = countries
            .iter()
            .filter(|c| !c.name.is_empty())
            .map(|c| (lower(&c.name), c.iso.clone()))
            .collect();
        table.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.0.cmp(&b.0))
        });
        Self { countries: table }
    }

    /// Run all four passes over an already-normalized query. Never fails:
    /// a query matching nothing comes back with empty qualifiers and its
    /// own whitespace-split tokens as the name slice.
    pub fn extract(&self, query: &str, admin: &AdminDirectory) -> Qualifiers {
        let mut out = Qualifiers {
            abbrevs: collect_abbrevs(query),
            ..Default::default()
        };
        let mut residual = lower(query);

        // Pass 1: country names, longest first.
        for (name, iso) in &self.countries {
            if let Some(rest) = strip_segment(&residual, name) {
                out.country_iso = iso.clone();
                residual = rest;
                break;
            }
        }

        // Pass 2: two-letter USPS codes.
        for (code, _) in &US_STATES {
            if let Some(rest) = strip_segment(&residual, &lower(code)) {
                out.state_code = (*code).to_string();
                if out.country_iso.is_empty() {
                    out.country_iso = "US".to_string();
                }
                residual = rest;
                break;
            }
        }

        // Pass 3: full US state names.
        if out.state_code.is_empty() {
            for (code, name) in &US_STATES {
                if let Some(rest) = strip_segment(&residual, &lower(name)) {
                    out.state_code = (*code).to_string();
                    if out.country_iso.is_empty() {
                        out.country_iso = "US".to_string();
                    }
                    residual = rest;
                    break;
                }
            }
        }

        // Pass 4: trailing international admin-1 code.
        if out.state_code.is_empty() {
            let tokens: Vec<&str> = residual.split_whitespace().collect();
            if tokens.len() >= 2 {
                let last = tokens[tokens.len() - 1].trim_end_matches([',', ' ']);
                let code = last.to_uppercase();
                if (2..=3).contains(&code.chars().count()) {
                    let accepted = if !out.country_iso.is_empty() {
                        admin.contains(&out.country_iso, &code)
                    } else if let Some(country) = admin.sole_country_for_code(&code) {
                        out.country_iso = country.to_string();
                        true
                    } else {
                        false
                    };
                    if accepted {
                        out.state_code = code;
                        residual = tokens[..tokens.len() - 1].join(" ");
                    }
                }
            }
        }

        let residual = residual.trim_matches([',', ' ']);
        out.name_slice = if residual.is_empty() {
            Vec::new()
        } else {
            residual.split_whitespace().map(str::to_string).collect()
        };
        out
    }
}

/// Match `name` against the front or back of `q` (both lowercased) and
/// return the residual on a hit. A hit is exact equality, a prefix
/// followed by ", " or a space, or a suffix preceded by ", " or a space.
fn strip_segment(q: &str, name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    if q == name {
        return Some(String::new());
    }
    if let Some(rest) = q.strip_prefix(name) {
        if let Some(rest) = rest.strip_prefix(", ") {
            return Some(rest.to_string());
        }
        if let Some(rest) = rest.strip_prefix(' ') {
            return Some(rest.to_string());
        }
    }
    if let Some(front) = q.strip_suffix(name) {
        if let Some(front) = front.strip_suffix(", ") {
            return Some(front.to_string());
        }
        if let Some(front) = front.strip_suffix(' ') {
            return Some(front.to_string());
        }
    }
    None
}

/// Every 2–3 character ALL-CAPS token of the original query, in order.
fn collect_abbrevs(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|token| {
            let n = token.chars().count();
            (2..=3).contains(&n) && token.chars().all(|c| c.is_uppercase())
        })
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AdminDivision;

    fn extractor() -> QualifierExtractor {
        let countries = vec![
            country("FR", "France"),
            country("US", "United States"),
            country("GN", "Guinea"),
            country("GW", "Guinea-Bissau"),
            country("IN", "India"),
            country("AT", "Austria"),
        ];
        QualifierExtractor::new(&countries)
    }

    fn country(iso: &str, name: &str) -> CountryInfo {
        CountryInfo {
            iso: iso.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    fn admin() -> AdminDirectory {
        AdminDirectory::new(vec![
            AdminDivision {
                country: "AT".into(),
                code: "05".into(),
                name: "Salzburg".into(),
            },
            AdminDivision {
                country: "IN".into(),
                code: "16".into(),
                name: "Maharashtra".into(),
            },
            AdminDivision {
                country: "AT".into(),
                code: "TYR".into(),
                name: "Tyrol".into(),
            },
        ])
    }

    #[test]
    fn state_code_suffix() {
        let q = extractor().extract("Paris, TX", &admin());
        assert_eq!(q.country_iso, "US");
        assert_eq!(q.state_code, "TX");
        assert_eq!(q.name_slice, vec!["paris"]);
        assert_eq!(q.abbrevs, vec!["TX"]);
    }

    #[test]
    fn country_name_suffix() {
        let q = extractor().extract("Paris, France", &admin());
        assert_eq!(q.country_iso, "FR");
        assert_eq!(q.state_code, "");
        assert_eq!(q.name_slice, vec!["paris"]);
        assert!(q.abbrevs.is_empty());
    }

    #[test]
    fn longest_country_name_wins() {
        let q = extractor().extract("Bissau, Guinea-Bissau", &admin());
        assert_eq!(q.country_iso, "GW");
        assert_eq!(q.name_slice, vec!["bissau"]);
    }

    #[test]
    fn state_without_comma_defaults_country() {
        let q = extractor().extract("Austin TX", &admin());
        assert_eq!(q.country_iso, "US");
        assert_eq!(q.state_code, "TX");
        assert_eq!(q.name_slice, vec!["austin"]);
    }

    #[test]
    fn explicit_country_beats_state_default() {
        // The earlier country pass wins; the state pass must not override.
        let q = extractor().extract("France, TX", &admin());
        assert_eq!(q.country_iso, "FR");
        assert_eq!(q.state_code, "TX");
    }

    #[test]
    fn full_state_name() {
        let q = extractor().extract("Springfield, Illinois", &admin());
        assert_eq!(q.country_iso, "US");
        assert_eq!(q.state_code, "IL");
        assert_eq!(q.name_slice, vec!["springfield"]);
    }

    #[test]
    fn country_name_prefix() {
        let q = extractor().extract("France Paris", &admin());
        assert_eq!(q.country_iso, "FR");
        assert_eq!(q.name_slice, vec!["paris"]);
    }

    #[test]
    fn admin_code_with_known_country() {
        let q = extractor().extract("Austria, Salzburg 05", &admin());
        assert_eq!(q.country_iso, "AT");
        assert_eq!(q.state_code, "05");
        assert_eq!(q.name_slice, vec!["salzburg"]);
    }

    #[test]
    fn admin_code_with_unique_country() {
        let q = extractor().extract("Innsbruck TYR", &admin());
        assert_eq!(q.country_iso, "AT");
        assert_eq!(q.state_code, "TYR");
        assert_eq!(q.name_slice, vec!["innsbruck"]);
    }

    #[test]
    fn ambiguous_admin_code_is_ignored() {
        let directory = AdminDirectory::new(vec![
            AdminDivision {
                country: "AT".into(),
                code: "07".into(),
                name: "Tyrol".into(),
            },
            AdminDivision {
                country: "CH".into(),
                code: "07".into(),
                name: "Ticino".into(),
            },
        ]);
        let q = extractor().extract("Somewhere 07", &directory);
        assert_eq!(q.state_code, "");
        assert_eq!(q.name_slice, vec!["somewhere", "07"]);
    }

    #[test]
    fn admin_pass_needs_two_tokens() {
        let q = extractor().extract("TYR", &admin());
        assert_eq!(q.state_code, "");
        assert_eq!(q.name_slice, vec!["tyr"]);
    }

    #[test]
    fn no_match_passes_through() {
        let q = extractor().extract("Zxqwvbn", &admin());
        assert_eq!(q, Qualifiers {
            name_slice: vec!["zxqwvbn".to_string()],
            ..Default::default()
        });
    }

    #[test]
    fn abbrevs_collects_all_caps_tokens() {
        let q = extractor().extract("NYC area, TX", &admin());
        assert_eq!(q.abbrevs, vec!["NYC", "TX"]);
    }

    #[test]
    fn exact_country_query_leaves_empty_slice() {
        let q = extractor().extract("France", &admin());
        assert_eq!(q.country_iso, "FR");
        assert!(q.name_slice.is_empty());
    }
}
