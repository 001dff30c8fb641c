use shared::Route;

use crate::state::DayFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayButton {
    pub label: String,
    pub filter: DayFilter,
    pub active: bool,
}

/// "All" followed by one button per day.
pub fn day_buttons(total_days: u32, current: DayFilter) -> Vec<DayButton> {
    std::iter::once(DayFilter::All)
        .chain((1..=total_days).map(DayFilter::Day))
        .map(|filter| DayButton {
            label: match filter {
                DayFilter::All => "All".to_string(),
                DayFilter::Day(day) => day.to_string(),
            },
            filter,
            active: filter == current,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub color: String,
    pub name: String,
}

/// Every route, whatever the day filter.
pub fn legend(routes: &[Route]) -> Vec<LegendEntry> {
    routes
        .iter()
        .map(|route| LegendEntry {
            color: route.color.clone(),
            name: route.name.clone(),
        })
        .collect()
}
