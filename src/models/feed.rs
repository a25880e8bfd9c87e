// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! Read-only feed items (news, events, videos, tasks, debts).

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Server-assigned item id. Some endpoints send numbers, others strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{}", n),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

/// News entry (`/noticias`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct NewsItem {
    #[cfg_attr(feature = "binding-generation", ts(type = "number | string"))]
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub img: String,
}

impl NewsItem {
    /// Case-insensitive match on title or date.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.date.to_lowercase().contains(&needle)
    }
}

/// Filter news by a search string; an empty query keeps everything.
pub fn filter_news<'a>(items: &'a [NewsItem], query: &str) -> Vec<&'a NewsItem> {
    let query = query.trim();
    items
        .iter()
        .filter(|item| query.is_empty() || item.matches(query))
        .collect()
}

/// Campus event (`/eventos`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct EventItem {
    #[cfg_attr(feature = "binding-generation", ts(type = "number | string"))]
    pub id: ItemId,
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub fecha_evento: String,
    #[serde(default)]
    pub lugar: String,
    /// "lat, lng"
    #[serde(default)]
    pub coordenadas: String,
}

impl EventItem {
    /// Parse `coordenadas` into (latitude, longitude).
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let (lat, lng) = self.coordenadas.split_once(',')?;
        let lat: f64 = lat.trim().parse().ok()?;
        let lng: f64 = lng.trim().parse().ok()?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return None;
        }
        Some((lat, lng))
    }
}

/// Learning resource video (`/videos`). `url` holds a YouTube video id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct VideoItem {
    #[cfg_attr(feature = "binding-generation", ts(type = "number | string"))]
    pub id: ItemId,
    pub titulo: String,
    #[serde(default)]
    pub fecha_publicacion: String,
    pub url: String,
}

impl VideoItem {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.url)
    }

    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.url)
    }
}

/// Assignment (`/tareas`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct TaskItem {
    #[cfg_attr(feature = "binding-generation", ts(type = "number | string"))]
    pub id: ItemId,
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub fecha_vencimiento: String,
    #[serde(default)]
    pub completada: bool,
}

impl TaskItem {
    pub fn status_label(&self) -> &'static str {
        if self.completada {
            "Completada"
        } else {
            "Pendiente"
        }
    }
}

/// Outstanding balance line (`/deudas`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct DebtItem {
    #[cfg_attr(feature = "binding-generation", ts(type = "number | string"))]
    pub id: ItemId,
    #[serde(default)]
    pub concepto: String,
    #[serde(default)]
    pub monto: f64,
    #[serde(default)]
    pub fecha_vencimiento: String,
    #[serde(default)]
    pub pagada: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn news(id: u64, title: &str, date: &str) -> NewsItem {
        NewsItem {
            id: ItemId::Number(id),
            title: title.to_string(),
            summary: String::new(),
            date: date.to_string(),
            url: String::new(),
            img: String::new(),
        }
    }

    #[test]
    fn test_filter_news_by_title_or_date() {
        let items = vec![
            news(1, "Inicio de clases", "2024-01-15"),
            news(2, "Feria de empleo", "2024-02-10"),
        ];

        let by_title: Vec<_> = filter_news(&items, "CLASES");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, ItemId::Number(1));

        let by_date = filter_news(&items, "2024-02");
        assert_eq!(by_date.len(), 1);
        assert_eq!(by_date[0].id, ItemId::Number(2));

        assert_eq!(filter_news(&items, "  ").len(), 2);
    }

    #[test]
    fn test_event_coordinates() {
        let mut event: EventItem = serde_json::from_value(serde_json::json!({
            "id": 3,
            "titulo": "Feria",
            "coordenadas": "18.4861, -69.9312"
        }))
        .unwrap();
        assert_eq!(event.coordinates(), Some((18.4861, -69.9312)));

        event.coordenadas = "norte".to_string();
        assert_eq!(event.coordinates(), None);
    }

    #[test]
    fn test_item_id_accepts_string_or_number() {
        let a: ItemId = serde_json::from_str("12").unwrap();
        let b: ItemId = serde_json::from_str("\"n-12\"").unwrap();
        assert_eq!(a.to_string(), "12");
        assert_eq!(b.to_string(), "n-12");
    }
}
