use shared::templates::grouped;
use shared::{CertificateDraft, Template, TemplateSelection};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TemplatePickerModalProps {
    /// Receives the chosen preset's data
    pub on_confirm: Callback<CertificateDraft>,
    pub on_close: Callback<()>,
}

fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "shield" => "🛡",
        "code" => "💻",
        "briefcase" => "💼",
        "book-open" => "📚",
        "star" => "⭐",
        _ => "🏆",
    }
}

#[function_component(TemplatePickerModal)]
pub fn template_picker_modal(props: &TemplatePickerModalProps) -> Html {
    let selection = use_state(TemplateSelection::default);

    let on_use = {
        let selection = selection.clone();
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(data) = selection.confirm() {
                on_confirm.emit(data);
            }
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let template_tile = |template: &'static Template| {
        let onclick = {
            let selection = selection.clone();
            Callback::from(move |_: MouseEvent| {
                let mut next = *selection;
                next.select(template.id);
                selection.set(next);
            })
        };
        html! {
            <button
                key={template.id}
                class={classes!("template-tile", selection.is_selected(template.id).then_some("selected"))}
                {onclick}
            >
                <span class={classes!("template-icon", template.color)}>{icon_glyph(template.icon)}</span>
                <span class="template-name">{template.name}</span>
                <span class="template-issuer">{template.issuer}</span>
            </button>
        }
    };

    html! {
        <div class="modal-backdrop" onclick={on_close.clone()}>
            <div class="modal template-picker-modal" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                <div class="modal-header">
                    <h2>{"Choose a Template"}</h2>
                    <button class="icon-btn" onclick={on_close.clone()}>{"✕"}</button>
                </div>

                {for grouped().into_iter().map(|(category, templates)| html! {
                    <section class="template-category" key={category}>
                        <h3>{category}</h3>
                        <div class="template-grid">
                            {for templates.into_iter().map(&template_tile)}
                        </div>
                    </section>
                })}

                {if let Some(template) = selection.selected() {
                    html! {
                        <div class="template-preview">
                            <h4>{template.title}</h4>
                            <p>{template.description}</p>
                        </div>
                    }
                } else {
                    html! {}
                }}

                <div class="modal-buttons">
                    <button class="btn btn-primary" onclick={on_use} disabled={selection.selected().is_none()}>
                        {"Use Template"}
                    </button>
                    <button class="btn btn-secondary" onclick={on_close}>{"Cancel"}</button>
                </div>
            </div>
        </div>
    }
}
