use dioxus::prelude::*;

use crate::ui::APP_TITLE;

#[component]
pub fn Shell(children: Element) -> Element {
    rsx! {
        div { class: "page",
            h1 { class: "title", "{APP_TITLE}" }
            p { class: "subtitle", "Расчёт стоимости выноса границ земельного участка" }
            {children}
        }
    }
}
