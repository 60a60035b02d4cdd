use chrono::{DateTime, Utc};
use shared::dates::format_display_date;
use shared::intake::format_file_size;
use shared::{Certificate, CertificateStatus};
use yew::prelude::*;

use crate::services::download::trigger_download;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct CertificateCardProps {
    pub certificate: Certificate,
    /// Time the status badge is derived against
    pub now: DateTime<Utc>,
    #[prop_or_default]
    pub deleting: bool,
    pub on_delete: Callback<String>,
}

#[function_component(CertificateCard)]
pub fn certificate_card(props: &CertificateCardProps) -> Html {
    let show_delete_confirm = use_state(|| false);
    let certificate = &props.certificate;
    let status = CertificateStatus::of(certificate, props.now);

    let on_arm_delete = {
        let show_delete_confirm = show_delete_confirm.clone();
        Callback::from(move |_: MouseEvent| show_delete_confirm.set(true))
    };

    let on_confirm_delete = {
        let show_delete_confirm = show_delete_confirm.clone();
        let on_delete = props.on_delete.clone();
        let id = certificate.id.clone();
        Callback::from(move |_: MouseEvent| {
            on_delete.emit(id.clone());
            show_delete_confirm.set(false);
        })
    };

    let on_cancel_delete = {
        let show_delete_confirm = show_delete_confirm.clone();
        Callback::from(move |_: MouseEvent| show_delete_confirm.set(false))
    };

    let download_button = match (&certificate.file_url, certificate.has_file()) {
        (Some(url), true) => {
            let url = url.clone();
            let file_name = certificate
                .file_name
                .clone()
                .unwrap_or_else(|| certificate.title.clone());
            let onclick = Callback::from(move |_: MouseEvent| {
                if let Err(e) = trigger_download(&url, &file_name) {
                    Logger::error_with_component("certificate-card", &format!("Download failed: {}", e));
                }
            });
            html! {
                <button class="btn btn-secondary btn-small" {onclick}>
                    {"⬇ Download"}
                    {if let Some(size) = certificate.file_size {
                        html! { <span class="file-size">{format!(" ({})", format_file_size(size))}</span> }
                    } else {
                        html! {}
                    }}
                </button>
            }
        }
        _ => html! {},
    };

    html! {
        <div class={classes!("certificate-card", status.css_class())}>
            <div class="certificate-card-header">
                <h3 class="certificate-title">{certificate.title.clone()}</h3>
                {if let Some(label) = status.label() {
                    html! { <span class={classes!("status-badge", status.css_class())}>{label}</span> }
                } else {
                    html! {}
                }}
                <button
                    class="icon-btn delete-btn"
                    title="Delete certificate"
                    onclick={on_arm_delete}
                    disabled={props.deleting}
                >
                    {"🗑"}
                </button>
            </div>

            <div class="certificate-details">
                <p><span class="detail-label">{"Issuer: "}</span>{certificate.issuer.clone()}</p>
                <p>
                    <span class="detail-label">{"Issue Date: "}</span>
                    {format_display_date(certificate.issue_date)}
                </p>
                {if let Some(expiry) = certificate.expiry_date {
                    html! {
                        <p>
                            <span class="detail-label">{"Expires: "}</span>
                            {format_display_date(expiry)}
                        </p>
                    }
                } else {
                    html! {}
                }}
                {if let Some(credential_id) = certificate.credential_id.as_ref() {
                    html! {
                        <p><span class="detail-label">{"Credential ID: "}</span>{credential_id.clone()}</p>
                    }
                } else {
                    html! {}
                }}
            </div>

            {if let Some(description) = certificate.description.as_ref() {
                html! { <p class="certificate-description">{description.clone()}</p> }
            } else {
                html! {}
            }}

            <div class="certificate-actions">
                {if let Some(url) = certificate.verification_url.as_ref() {
                    html! {
                        <a class="verify-link" href={url.clone()} target="_blank" rel="noopener noreferrer">
                            {"Verify Certificate →"}
                        </a>
                    }
                } else {
                    html! {}
                }}
                {download_button}
            </div>

            {if *show_delete_confirm {
                html! {
                    <div class="modal-backdrop">
                        <div class="modal confirm-modal">
                            <h3>{"Delete Certificate"}</h3>
                            <p>
                                {format!(
                                    "Are you sure you want to delete \"{}\"? This action cannot be undone.",
                                    certificate.title
                                )}
                            </p>
                            <div class="modal-buttons">
                                <button class="btn btn-danger" onclick={on_confirm_delete}>{"Delete"}</button>
                                <button class="btn btn-secondary" onclick={on_cancel_delete}>{"Cancel"}</button>
                            </div>
                        </div>
                    </div>
                }
            } else {
                html! {}
            }}
        </div>
    }
}
