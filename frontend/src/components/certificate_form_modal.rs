use shared::{CertificateDraft, CertificateForm, Field, NewCertificate};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CertificateFormModalProps {
    /// Pre-fill data, e.g. from a confirmed template
    #[prop_or_default]
    pub initial: Option<CertificateDraft>,
    /// True while the dashboard is persisting a submission
    #[prop_or_default]
    pub submitting: bool,
    pub on_submit: Callback<NewCertificate>,
    pub on_close: Callback<()>,
}

fn on_field_input(form: &UseStateHandle<CertificateForm>, field: Field) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
        let value = match e.target_dyn_into::<HtmlInputElement>() {
            Some(input) => input.value(),
            None => e.target_unchecked_into::<HtmlTextAreaElement>().value(),
        };
        let mut next = (*form).clone();
        next.set_field(field, value);
        form.set(next);
    })
}

#[function_component(CertificateFormModal)]
pub fn certificate_form_modal(props: &CertificateFormModalProps) -> Html {
    let form = {
        let initial = props.initial.clone();
        use_state(move || CertificateForm::new(initial.as_ref()))
    };

    // Merge template data that arrives while the form is open
    {
        let form = form.clone();
        use_effect_with(props.initial.clone(), move |initial| {
            if let Some(data) = initial {
                let mut next = (*form).clone();
                next.apply_template(data);
                if next != *form {
                    form.set(next);
                }
            }
            || ()
        });
    }

    let on_submit = {
        let form = form.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut next = (*form).clone();
            if let Ok(certificate) = next.submit() {
                on_submit.emit(certificate);
            }
            form.set(next);
        })
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let input = |field: Field, label: &'static str, input_type: &'static str, placeholder: &'static str, required: bool| {
        let error = form.error(field).map(str::to_string);
        html! {
            <div class="form-group">
                <label for={field.name()}>
                    {label}{if required { " *" } else { "" }}
                </label>
                <input
                    id={field.name()}
                    name={field.name()}
                    type={input_type}
                    class={classes!("form-input", error.is_some().then_some("has-error"))}
                    placeholder={placeholder}
                    value={form.value(field).to_string()}
                    oninput={on_field_input(&form, field)}
                    disabled={props.submitting}
                />
                {if let Some(error) = error {
                    html! { <p class="field-error">{error}</p> }
                } else {
                    html! {}
                }}
            </div>
        }
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal certificate-form-modal" onclick={on_modal_click}>
                <div class="modal-header">
                    <h2>{"Add Certificate"}</h2>
                    <button class="icon-btn" onclick={on_cancel.clone()}>{"✕"}</button>
                </div>

                <form class="certificate-form" onsubmit={on_submit} novalidate=true>
                    {input(Field::Title, "Certificate Title", "text", "e.g., AWS Certified Solutions Architect", true)}
                    {input(Field::Issuer, "Issuing Organization", "text", "e.g., Amazon Web Services", true)}
                    {input(Field::IssueDate, "Issue Date", "date", "", true)}
                    {input(Field::ExpiryDate, "Expiry Date", "date", "", false)}
                    {input(Field::CredentialId, "Credential ID", "text", "Certificate ID or badge number", false)}
                    {input(Field::VerificationUrl, "Verification URL", "url", "https://...", false)}

                    <div class="form-group">
                        <label for={Field::Description.name()}>{"Description"}</label>
                        <textarea
                            id={Field::Description.name()}
                            name={Field::Description.name()}
                            class="form-input"
                            rows="3"
                            placeholder="Brief description of the certificate..."
                            value={form.value(Field::Description).to_string()}
                            oninput={on_field_input(&form, Field::Description)}
                            disabled={props.submitting}
                        />
                    </div>

                    <div class="modal-buttons">
                        <button type="submit" class="btn btn-primary" disabled={props.submitting}>
                            {if props.submitting { "Adding..." } else { "Add Certificate" }}
                        </button>
                        <button type="button" class="btn btn-secondary" onclick={on_cancel}>
                            {"Cancel"}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
