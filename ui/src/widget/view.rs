use dioxus::logger::tracing::debug;
use dioxus::prelude::*;
use time::OffsetDateTime;

use super::export_flow::{settle, ExportStatus};
use super::state::{LabelPosition, ViewState, MAX_CORNER_RADIUS_PX};
use crate::core::platform;
use crate::export::{self, CAPTURE_AREA_ID};
use crate::t;

#[component]
pub fn LifeProgress() -> Element {
    // Re-render captions when the language changes elsewhere.
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_marker = lang_code.as_ref().map(|s| s()).unwrap_or_default();

    let mut state = use_signal(ViewState::default);
    let mut status = use_signal(|| ExportStatus::Idle);

    let plan = state.read().render();
    let raw_date = state.read().raw_date().to_string();
    let position = state.read().label_position().as_str();
    let radius = state.read().corner_radius_px();
    let caption = plan.caption_text();

    #[cfg(debug_assertions)]
    debug!(
        "LifeProgress render pct={} color={} export={}",
        plan.percentage_text, plan.graphic_color, plan.export_enabled
    );

    let on_export = move |_| {
        if !state.with_mut(|s| s.begin_export()) {
            return;
        }
        status.set(ExportStatus::Working);
        let snapshot = ViewState::clone(&state.peek());

        // Scoped to this component: dropped with it if it unmounts mid-export.
        spawn(async move {
            let outcome = export::export_current(&snapshot).await;
            let settled = settle(outcome, |file| async move { export::deliver(&file).await }).await;
            if let Some(notice) = settled.notice.as_deref() {
                platform::alert(notice);
            }
            let next = state.with_mut(|s| settled.release(s));
            status.set(next);
        });
    };

    let feedback = match status() {
        ExportStatus::Idle => None,
        ExportStatus::Working => Some(("life-export__status", t!("export-working"))),
        ExportStatus::Done(Some(path)) => Some((
            "life-export__status life-export__status--success",
            t!("export-saved", path = path),
        )),
        ExportStatus::Done(None) => Some((
            "life-export__status life-export__status--success",
            t!("export-started"),
        )),
        ExportStatus::Error => Some((
            "life-export__status life-export__status--error",
            t!("export-failed"),
        )),
    };

    rsx! {
        div { style: "display:none", "{_lang_marker}" }
        article { class: "life-widget", style: "{plan.style_vars()}",
            div { class: "life-widget__controls",
                label { class: "life-widget__field",
                    span { {t!("field-birth-date")} }
                    input {
                        r#type: "date",
                        id: "dob",
                        value: "{raw_date}",
                        oninput: move |evt| {
                            let value = evt.value();
                            debug!("birth date changed: {value:?}");
                            state.with_mut(|s| s.set_birth_date(&value, OffsetDateTime::now_utc()));
                        },
                    }
                }
                label { class: "life-widget__field",
                    span { {t!("field-color")} }
                    input {
                        r#type: "color",
                        id: "colorPicker",
                        value: "{plan.picker_value}",
                        oninput: move |evt| {
                            state.with_mut(|s| {
                                s.pick_color(&evt.value());
                            });
                        },
                    }
                }
                label { class: "life-widget__field",
                    span { {t!("field-layout")} }
                    select {
                        id: "positionSelector",
                        value: "{position}",
                        oninput: move |evt| state.with_mut(|s| s.select_label_position(&evt.value())),
                        option { value: LabelPosition::Inline.as_str(), {t!("layout-inline")} }
                        option { value: LabelPosition::Below.as_str(), {t!("layout-below")} }
                    }
                }
                label { class: "life-widget__field",
                    span { {t!("field-radius")} }
                    input {
                        r#type: "range",
                        id: "radiusSelector",
                        min: "0",
                        max: "{MAX_CORNER_RADIUS_PX}",
                        value: "{radius}",
                        oninput: move |evt| state.with_mut(|s| s.set_corner_radius_input(&evt.value())),
                    }
                }
            }

            div { id: CAPTURE_AREA_ID, class: "{plan.capture_class}", style: "{plan.style_vars()}",
                div { class: "progress-row",
                    div { class: "progress-track",
                        div { class: "progress-fill", style: "width: {plan.bar_width};" }
                    }
                    span { class: "progress-label", "{plan.percentage_text}" }
                }
                p { class: "progress-caption", "{caption}" }
            }

            div { class: "life-export",
                button {
                    r#type: "button",
                    id: "downloadBtn",
                    class: "button button--primary",
                    disabled: !plan.export_enabled,
                    onclick: on_export,
                    {t!("export-button")}
                }
                if let Some((class_name, message)) = feedback {
                    p { class: "{class_name}", role: "status", "{message}" }
                }
            }
        }
    }
}
