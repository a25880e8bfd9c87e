// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! Weekly schedule derivation from pre-selected courses.
//!
//! Each selection is joined with the catalog by `codigo` and placed in the
//! bucket of the weekday named by its `horario`. Rows that cannot be placed
//! are dropped with a warning rather than reported to the user.

use crate::models::{CatalogItem, ScheduledCourse, SelectionItem, WeeklySchedule};
use crate::time_utils::resolve_weekday;
use std::collections::HashMap;

/// Build the weekly schedule for `selections`.
///
/// A selection whose code is missing from the catalog, or whose schedule
/// has no recognizable weekday, does not appear in any bucket.
pub fn build_weekly_schedule(
    catalog: &[CatalogItem],
    selections: &[SelectionItem],
) -> WeeklySchedule {
    let by_code: HashMap<&str, &CatalogItem> = catalog
        .iter()
        .map(|item| (item.codigo.as_str(), item))
        .collect();

    let mut schedule = WeeklySchedule::default();

    for selection in selections {
        let Some(course) = by_code.get(selection.codigo.as_str()) else {
            tracing::warn!(
                codigo = %selection.codigo,
                "Selected course not found in catalog, skipping"
            );
            continue;
        };

        let Some((day, hora)) = resolve_weekday(&course.horario) else {
            tracing::warn!(
                codigo = %course.codigo,
                horario = %course.horario,
                "Unrecognized weekday in schedule, skipping"
            );
            continue;
        };

        schedule.push(
            day,
            ScheduledCourse {
                codigo: course.codigo.clone(),
                nombre: course.nombre.clone(),
                hora,
                aula: course.aula.clone(),
                ubicacion: course.ubicacion.clone(),
            },
        );
    }

    schedule
}
