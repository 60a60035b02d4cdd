use shared::{CertificateDraft, CertificateFilter, CertificateService, LoadState, NewCertificate};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::certificate_card::CertificateCard;
use crate::components::certificate_form_modal::CertificateFormModal;
use crate::components::file_intake_modal::FileIntakeModal;
use crate::components::header::Header;
use crate::components::notification_banner::NotificationBanner;
use crate::components::template_picker_modal::TemplatePickerModal;
use crate::config::AppConfig;
use crate::hooks::use_certificates::use_certificates;
use crate::services::api::ApiClient;
use crate::services::auth::Session;
use crate::services::date_utils::current_time;

/// Which modal, if any, is open over the dashboard
#[derive(Clone, PartialEq)]
enum Overlay {
    None,
    Form(Option<CertificateDraft>),
    Upload,
    Templates,
}

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub session: Session,
    pub config: AppConfig,
    pub on_logout: Callback<()>,
}

#[function_component(Dashboard)]
pub fn dashboard(props: &DashboardProps) -> Html {
    let service = use_memo(
        (props.session.clone(), props.config.clone()),
        |(session, config)| {
            let store = ApiClient::new(config).with_access_token(session.access_token.clone());
            CertificateService::new(store, session.user.clone())
        },
    );
    let certificates = use_certificates(&service);
    let state = &certificates.state;
    let actions = certificates.actions.clone();

    let overlay = use_state(|| Overlay::None);
    let submitting = use_state(|| false);

    let now = current_time();

    let open = |target: Overlay| {
        let overlay = overlay.clone();
        Callback::from(move |_: MouseEvent| overlay.set(target.clone()))
    };

    let close = {
        let overlay = overlay.clone();
        Callback::from(move |_: ()| overlay.set(Overlay::None))
    };

    let on_submit = {
        let overlay = overlay.clone();
        let submitting = submitting.clone();
        let add = actions.add.clone();
        Callback::from(move |certificate: NewCertificate| {
            submitting.set(true);
            let overlay = overlay.clone();
            let submitting = submitting.clone();
            let done = Callback::from(move |succeeded: bool| {
                submitting.set(false);
                // A failed save keeps the form open with its values
                if succeeded {
                    overlay.set(Overlay::None);
                }
            });
            add.emit((certificate, done));
        })
    };

    let on_template = {
        let overlay = overlay.clone();
        Callback::from(move |data: CertificateDraft| overlay.set(Overlay::Form(Some(data))))
    };

    let on_search = {
        let set_search = actions.set_search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set_search.emit(input.value());
        })
    };

    let on_filter = {
        let set_filter = actions.set_filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            set_filter.emit(CertificateFilter::from_value(&select.value()));
        })
    };

    let stats = state.stats(now);
    let visible = state.visible(now);

    let body = if state.load_state == LoadState::Loading {
        html! {
            <div class="loading-state">
                <div class="spinner"></div>
                <p>{"Loading certificates..."}</p>
            </div>
        }
    } else if state.certificates.is_empty() {
        html! {
            <div class="empty-state">
                <h3>{"No certificates yet"}</h3>
                <p>{"Start building your credential portfolio by adding your first certificate."}</p>
                <button class="btn btn-primary" onclick={open(Overlay::Form(None))}>
                    {"Add Your First Certificate"}
                </button>
            </div>
        }
    } else if visible.is_empty() {
        html! {
            <div class="empty-state">
                <h3>{"No certificates match your search"}</h3>
                <p>{"Try a different search term or filter."}</p>
            </div>
        }
    } else {
        html! {
            <div class="certificate-grid">
                {for visible.into_iter().map(|certificate| html! {
                    <CertificateCard
                        key={certificate.id.clone()}
                        certificate={certificate.clone()}
                        {now}
                        deleting={state.is_deleting(&certificate.id)}
                        on_delete={actions.delete.clone()}
                    />
                })}
            </div>
        }
    };

    // Adding waits for the first fetch to land
    let toolbar_actions = if state.load_state == LoadState::Ready {
        html! {
            <div class="toolbar-actions">
                <button class="btn btn-secondary" onclick={open(Overlay::Templates)}>
                    {"Use Template"}
                </button>
                <button class="btn btn-secondary" onclick={open(Overlay::Upload)}>
                    {"Upload Files"}
                </button>
                <button class="btn btn-primary" onclick={open(Overlay::Form(None))}>
                    {"+ Add Certificate"}
                </button>
            </div>
        }
    } else {
        html! {}
    };

    let modal = match &*overlay {
        Overlay::None => html! {},
        Overlay::Form(initial) => html! {
            <CertificateFormModal
                initial={initial.clone()}
                submitting={*submitting}
                on_submit={on_submit}
                on_close={close.clone()}
            />
        },
        Overlay::Upload => html! {
            <FileIntakeModal
                service={(*service).clone()}
                on_result={actions.upload_result.clone()}
                on_close={close.clone()}
            />
        },
        Overlay::Templates => html! {
            <TemplatePickerModal on_confirm={on_template} on_close={close.clone()} />
        },
    };

    html! {
        <div class="dashboard">
            <Header email={props.session.user.email.clone()} on_logout={props.on_logout.clone()} />
            <NotificationBanner notification={state.notification().cloned()} />

            <main class="dashboard-main">
                <section class="stats-row">
                    <div class="stat-card">
                        <span class="stat-value">{stats.total}</span>
                        <span class="stat-label">{"Total Certificates"}</span>
                    </div>
                    <div class="stat-card">
                        <span class="stat-value">{stats.expiring_soon}</span>
                        <span class="stat-label">{"Expiring Soon"}</span>
                    </div>
                    <div class="stat-card">
                        <span class="stat-value">{stats.expired}</span>
                        <span class="stat-label">{"Expired"}</span>
                    </div>
                    <div class="stat-card">
                        <span class="stat-value">{stats.recent}</span>
                        <span class="stat-label">{"Added This Month"}</span>
                    </div>
                </section>

                <section class="toolbar">
                    <input
                        class="search-input"
                        type="search"
                        placeholder="Search certificates..."
                        value={state.search.clone()}
                        oninput={on_search}
                    />
                    <select class="filter-select" onchange={on_filter}>
                        {for CertificateFilter::ALL.iter().map(|filter| html! {
                            <option value={filter.as_str()} selected={*filter == state.filter}>
                                {filter.label()}
                            </option>
                        })}
                    </select>
                    {toolbar_actions}
                </section>

                {body}
            </main>

            {modal}
        </div>
    }
}
