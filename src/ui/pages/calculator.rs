use dioxus::prelude::*;

use crate::{
    app::{submit_calculation, LookupHandle},
    domain::CalculationWorkflow,
    ui::{components::ResultPanel, theme::submit_button_label},
};

#[component]
pub fn CalculatorPage() -> Element {
    let workflow = use_context::<Signal<CalculationWorkflow>>();
    let lookup = use_context::<LookupHandle>();
    let mut cadastral_number = use_signal(String::new);

    let view = workflow.with(|wf| wf.view());
    let loading = workflow.with(|wf| wf.is_loading());
    let can_submit = workflow.with(|wf| wf.can_submit(&cadastral_number()));
    let error_message = lookup.error().or_else(|| view.error.clone());

    let on_calculate = move |_| {
        submit_calculation(workflow, lookup.clone(), cadastral_number());
    };

    rsx! {
        div { class: "grid",
            div { class: "card",
                h2 { "Ввод данных" }
                p { class: "muted", "Введите кадастровый номер участка для расчёта стоимости" }
                label { r#for: "cadastral", "Кадастровый номер" }
                input {
                    id: "cadastral",
                    class: "input",
                    placeholder: "77:01:0001001:1234",
                    value: "{cadastral_number}",
                    oninput: move |evt| cadastral_number.set(evt.value()),
                }
                p { class: "muted",
                    "Количество точек определяется автоматически на основе данных кадастровой карты"
                }
                if let Some(message) = error_message {
                    div { class: "error", "{message}" }
                }
                button {
                    class: "btn",
                    disabled: !can_submit,
                    onclick: on_calculate,
                    "{submit_button_label(loading)}"
                }
            }
            div { class: "card",
                h2 { "Результат расчёта" }
                p { class: "muted", "Детализация стоимости выноса границ" }
                ResultPanel { view }
            }
        }
    }
}
