//! 通報詳細ポップアップ

use leptos::prelude::*;
use report_map_common::{status_color, MarkerReport};

#[component]
pub fn ReportDetails<FC>(report: MarkerReport, on_close: FC) -> impl IntoView
where
    FC: Fn(()) + 'static + Clone,
{
    let badge_style = format!("background-color: {}", status_color(&report.status).hex());
    let created = format!("تاريخ البلاغ: {}", report.created_at.format("%Y-%m-%d"));
    let location = report.coordinates().map(|point| point.to_string());

    view! {
        <div class="report-details" dir="rtl">
            <div class="report-details-header">
                <h3>{report.category.clone()}</h3>
                <button class="btn-close" on:click=move |_| on_close(())>"×"</button>
            </div>
            <span class="status-badge" style=badge_style>{report.status.label()}</span>
            <p>{report.summary.clone()}</p>
            <p class="text-muted">{created}</p>
            {location.map(|text| view! { <p class="text-muted coordinates">{text}</p> })}
        </div>
    }
}
