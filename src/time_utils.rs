// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! Shared helpers for Spanish weekday names.

use chrono::{DateTime, Datelike, NaiveDate, Weekday};

/// Display label used for schedule buckets.
pub fn spanish_weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Lunes",
        Weekday::Tue => "Martes",
        Weekday::Wed => "Miércoles",
        Weekday::Thu => "Jueves",
        Weekday::Fri => "Viernes",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

/// Parse a Spanish weekday name, with or without accents, any case.
pub fn parse_spanish_weekday(name: &str) -> Option<Weekday> {
    let folded: String = name
        .trim()
        .trim_end_matches([',', ':', ';'])
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            other => other,
        })
        .collect();

    match folded.as_str() {
        "lunes" => Some(Weekday::Mon),
        "martes" => Some(Weekday::Tue),
        "miercoles" => Some(Weekday::Wed),
        "jueves" => Some(Weekday::Thu),
        "viernes" => Some(Weekday::Fri),
        "sabado" => Some(Weekday::Sat),
        "domingo" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Resolve the weekday of a schedule string such as `"lunes 10:00"` or
/// `"2024-01-15 08:00"`. Returns the weekday and the remaining time text.
pub fn resolve_weekday(horario: &str) -> Option<(Weekday, String)> {
    let trimmed = horario.trim();
    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };

    if let Some(day) = parse_spanish_weekday(head) {
        return Some((day, rest.to_string()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(head, "%Y-%m-%d") {
        return Some((date.weekday(), rest.to_string()));
    }

    // Full RFC 3339 timestamp in one token ("2024-01-15T10:00:00Z")
    DateTime::parse_from_rfc3339(head)
        .ok()
        .map(|dt| (dt.weekday(), dt.format("%H:%M").to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spanish_weekday_accents_and_case() {
        assert_eq!(parse_spanish_weekday("Miércoles"), Some(Weekday::Wed));
        assert_eq!(parse_spanish_weekday("miercoles"), Some(Weekday::Wed));
        assert_eq!(parse_spanish_weekday("SÁBADO,"), Some(Weekday::Sat));
        assert_eq!(parse_spanish_weekday("monday"), None);
    }

    #[test]
    fn test_resolve_weekday_from_name() {
        let (day, rest) = resolve_weekday("lunes 10:00").unwrap();
        assert_eq!(day, Weekday::Mon);
        assert_eq!(rest, "10:00");
    }

    #[test]
    fn test_resolve_weekday_from_date() {
        // 2024-01-17 was a Wednesday
        let (day, rest) = resolve_weekday("2024-01-17 08:00-10:00").unwrap();
        assert_eq!(day, Weekday::Wed);
        assert_eq!(rest, "08:00-10:00");

        let (day, rest) = resolve_weekday("2024-01-19T14:30:00Z").unwrap();
        assert_eq!(day, Weekday::Fri);
        assert_eq!(rest, "14:30");
    }

    #[test]
    fn test_resolve_weekday_unknown() {
        assert!(resolve_weekday("por definir").is_none());
        assert!(resolve_weekday("").is_none());
    }
}
