use dioxus::prelude::*;

use crate::domain::PointBadge;

#[component]
pub fn PointBadgeGrid(badges: Vec<PointBadge>, overflow: u32) -> Element {
    rsx! {
        div { class: "badges",
            for badge in badges {
                div { key: "{badge.index}", class: "badge", "📍 {badge.index}" }
            }
            if overflow > 0 {
                div { class: "badge overflow", "+{overflow}" }
            }
        }
    }
}
