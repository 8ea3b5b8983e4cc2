use dioxus::prelude::*;

use crate::domain::{WorkflowState, WorkflowView};
use crate::ui::components::PointBadgeGrid;

#[component]
pub fn ResultPanel(view: WorkflowView) -> Element {
    let WorkflowState::Success(record) = &view.state else {
        return rsx! {
            div { class: "placeholder", "Введите кадастровый номер и нажмите \"Рассчитать\"" }
        };
    };

    let total = view.formatted_total.clone().unwrap_or_default();
    let breakdown = view.breakdown.clone().unwrap_or_default();

    rsx! {
        div {
            div { class: "row",
                span { class: "muted", "Участок:" }
                span { "{record.identifier}" }
            }
            if let Some(address) = &record.address {
                div { class: "row",
                    span { class: "muted", "Адрес:" }
                    span { "{address}" }
                }
            }
            if let Some(area) = &view.formatted_area {
                div { class: "row",
                    span { class: "muted", "Площадь:" }
                    span { "{area}" }
                }
            }
            div { class: "row",
                span { class: "muted", "Количество точек:" }
                strong { "{record.points_count}" }
            }
            div { class: "row",
                span { class: "muted", "Цена за точку:" }
                span { "{view.formatted_price_per_point}" }
            }
            div { class: "total",
                p { "Итоговая стоимость" }
                p { class: "amount", "{total}" }
                p { "({breakdown})" }
            }
            PointBadgeGrid { badges: view.point_badges.clone(), overflow: view.overflow_count }
        }
    }
}
