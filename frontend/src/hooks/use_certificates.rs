use std::ops::Deref;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use shared::notification::NOTIFICATION_TIMEOUT_MS;
use shared::{
    Certificate, CertificateFilter, CertificateService, DashboardEvent, DashboardState,
    NewCertificate, StoreError,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

/// Dashboard state wrapped for `use_reducer`
#[derive(Clone, Default, PartialEq)]
pub struct DashboardModel(DashboardState);

impl Deref for DashboardModel {
    type Target = DashboardState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Reducible for DashboardModel {
    type Action = DashboardEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.0.apply(action);
        Rc::new(next)
    }
}

pub struct UseCertificatesResult {
    pub state: UseReducerHandle<DashboardModel>,
    pub actions: UseCertificatesActions,
}

#[derive(Clone)]
pub struct UseCertificatesActions {
    /// Persist a validated form submission; the callback gets whether it succeeded
    pub add: Callback<(NewCertificate, Callback<bool>)>,
    /// Report the outcome of one file upload from the intake
    pub upload_result: Callback<Result<Certificate, (String, StoreError)>>,
    pub delete: Callback<String>,
    pub set_search: Callback<String>,
    pub set_filter: Callback<CertificateFilter>,
}

#[hook]
pub fn use_certificates(service: &CertificateService<ApiClient>) -> UseCertificatesResult {
    let state = use_reducer(DashboardModel::default);

    // Load certificates on mount
    {
        let service = service.clone();
        let state = state.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let result = service.load().await;
                if let Err(e) = &result {
                    Logger::error_with_component("dashboard", &format!("Error loading certificates: {}", e));
                }
                state.dispatch(DashboardEvent::Loaded(result));
            });
            || ()
        });
    }

    // Auto-dismiss whichever notification is showing
    {
        let state = state.clone();
        use_effect_with(state.notification_token(), move |token| {
            if let Some(token) = *token {
                spawn_local(async move {
                    TimeoutFuture::new(NOTIFICATION_TIMEOUT_MS).await;
                    state.dispatch(DashboardEvent::DismissNotification(token));
                });
            }
            || ()
        });
    }

    let add = {
        let service = service.clone();
        let state = state.clone();
        Callback::from(move |(certificate, done): (NewCertificate, Callback<bool>)| {
            let service = service.clone();
            let state = state.clone();
            spawn_local(async move {
                let result = service.add(certificate).await;
                let succeeded = result.is_ok();
                state.dispatch(DashboardEvent::Added(result));
                done.emit(succeeded);
            });
        })
    };

    let upload_result = {
        let state = state.clone();
        Callback::from(move |result: Result<Certificate, (String, StoreError)>| match result {
            Ok(certificate) => state.dispatch(DashboardEvent::Added(Ok(certificate))),
            Err((file_name, error)) => {
                state.dispatch(DashboardEvent::UploadFailed { file_name, error })
            }
        })
    };

    let delete = {
        let service = service.clone();
        let state = state.clone();
        Callback::from(move |id: String| {
            let Some(target) = state.deletable(&id).cloned() else {
                Logger::debug_with_component("dashboard", &format!("Ignoring delete of {}", id));
                return;
            };
            state.dispatch(DashboardEvent::DeleteStarted(id.clone()));

            let service = service.clone();
            let state = state.clone();
            spawn_local(async move {
                let result = service.delete(&target).await;
                state.dispatch(DashboardEvent::Deleted { id, result });
            });
        })
    };

    let set_search = {
        let state = state.clone();
        Callback::from(move |search: String| state.dispatch(DashboardEvent::SearchChanged(search)))
    };

    let set_filter = {
        let state = state.clone();
        Callback::from(move |filter: CertificateFilter| {
            state.dispatch(DashboardEvent::FilterChanged(filter))
        })
    };

    UseCertificatesResult {
        state,
        actions: UseCertificatesActions {
            add,
            upload_result,
            delete,
            set_search,
            set_filter,
        },
    }
}
