//! 凡例コンポーネント

use leptos::prelude::*;
use report_map_common::LegendEntry;

#[component]
pub fn Legend(entries: Vec<LegendEntry>) -> impl IntoView {
    view! {
        <div class="map-legend" dir="rtl">
            <h4>"حالة البلاغات"</h4>
            {entries
                .into_iter()
                .map(|entry| {
                    view! {
                        <div class="legend-item">
                            <span
                                class="legend-dot"
                                style=format!("background-color: {}", entry.color.hex())
                            />
                            <span>{entry.label}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
