use gloo::file::futures::read_as_bytes;
use gloo::file::{File, FileList};
use shared::intake::{format_file_size, FILE_PICKER_ACCEPT};
use shared::{
    Certificate, CertificateService, FileMeta, IntakeRejection, StoreError, UploadQueue,
    UploadStatus,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils::current_time;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct FileIntakeModalProps {
    pub service: CertificateService<ApiClient>,
    /// Outcome of each file, reported as soon as it finishes
    pub on_result: Callback<Result<Certificate, (String, StoreError)>>,
    pub on_close: Callback<()>,
}

fn metas(files: FileList) -> Vec<(FileMeta, File)> {
    files
        .iter()
        .map(|file| {
            let meta = FileMeta::new(file.name(), file.raw_mime_type(), file.size());
            (meta, file.clone())
        })
        .collect()
}

async fn upload_one(
    service: &CertificateService<ApiClient>,
    meta: &FileMeta,
    file: &File,
) -> Result<Certificate, StoreError> {
    let bytes = read_as_bytes(file)
        .await
        .map_err(|e| StoreError::Decode(format!("Could not read {}: {}", meta.name, e)))?;
    service.upload(meta, bytes, current_time()).await
}

fn status_view(status: &UploadStatus) -> Html {
    match status {
        UploadStatus::Pending => html! { <span class="upload-status pending">{"Ready"}</span> },
        UploadStatus::Uploading => html! { <span class="upload-status uploading">{"Uploading..."}</span> },
        UploadStatus::Succeeded => html! { <span class="upload-status succeeded">{"✓ Uploaded"}</span> },
        UploadStatus::Failed(reason) => html! {
            <span class="upload-status failed" title={reason.clone()}>{"✕ Failed"}</span>
        },
    }
}

#[function_component(FileIntakeModal)]
pub fn file_intake_modal(props: &FileIntakeModalProps) -> Html {
    let queue = use_state(UploadQueue::<File>::new);
    let rejections = use_state(Vec::<IntakeRejection>::new);
    let dragging = use_state(|| false);
    let file_input = use_node_ref();

    let uploading = queue.is_uploading();

    let add_files = {
        let queue = queue.clone();
        let rejections = rejections.clone();
        Callback::from(move |files: FileList| {
            let mut next = (*queue).clone();
            let rejected = next.accept(metas(files));
            for rejection in &rejected {
                Logger::warn_with_component("file-intake", &rejection.to_string());
            }
            rejections.set(rejected);
            queue.set(next);
        })
    };

    let on_drag_over = {
        let dragging = dragging.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dragging.set(true);
        })
    };

    let on_drag_leave = {
        let dragging = dragging.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dragging.set(false);
        })
    };

    let on_drop = {
        let dragging = dragging.clone();
        let add_files = add_files.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dragging.set(false);
            if uploading {
                Logger::debug_with_component("file-intake", "Ignoring drop during upload");
                return;
            }
            if let Some(files) = e.data_transfer().and_then(|dt| dt.files()) {
                add_files.emit(FileList::from(files));
            }
        })
    };

    let on_browse = {
        let file_input = file_input.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = file_input.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_file_change = {
        let add_files = add_files.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(files) = input.files() {
                add_files.emit(FileList::from(files));
            }
            // Allow picking the same file again
            input.set_value("");
        })
    };

    let on_upload = {
        let queue = queue.clone();
        let service = props.service.clone();
        let on_result = props.on_result.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            if queue.is_uploading() || queue.to_upload() == 0 {
                return;
            }
            let queue = queue.clone();
            let service = service.clone();
            let on_result = on_result.clone();
            let on_close = on_close.clone();

            spawn_local(async move {
                let mut batch = (*queue).clone();
                Logger::info_with_component(
                    "file-intake",
                    &format!("Uploading {} file(s)", batch.to_upload()),
                );

                let progress = queue.clone();
                batch
                    .upload_all(
                        |meta, file| {
                            let service = service.clone();
                            let on_result = on_result.clone();
                            async move {
                                match upload_one(&service, &meta, &file).await {
                                    Ok(certificate) => {
                                        on_result.emit(Ok(certificate));
                                        Ok(())
                                    }
                                    Err(e) => {
                                        let reason = e.to_string();
                                        on_result.emit(Err((meta.name.clone(), e)));
                                        Err(reason)
                                    }
                                }
                            }
                        },
                        |current| progress.set(current.clone()),
                    )
                    .await;

                if batch.all_succeeded() {
                    on_close.emit(());
                } else {
                    batch.clear_succeeded();
                    queue.set(batch);
                }
            });
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if !uploading {
                on_close.emit(());
            }
        })
    };

    let to_upload = queue.to_upload();
    let has_failures = queue.failed().next().is_some();

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal file-intake-modal" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                <div class="modal-header">
                    <h2>{"Upload Certificates"}</h2>
                    <button class="icon-btn" onclick={on_close.clone()} disabled={uploading}>{"✕"}</button>
                </div>

                <div
                    class={classes!("drop-zone", dragging.then_some("dragging"))}
                    ondragover={on_drag_over}
                    ondragleave={on_drag_leave}
                    ondrop={on_drop}
                >
                    <p>{"Drag and drop your certificate files here"}</p>
                    <p class="hint">{"PDF, JPG or PNG, up to 10 MB each"}</p>
                    <button class="btn btn-secondary" onclick={on_browse} disabled={uploading}>
                        {"Browse Files"}
                    </button>
                    <input
                        ref={file_input}
                        type="file"
                        multiple=true
                        accept={FILE_PICKER_ACCEPT}
                        style="display: none"
                        onchange={on_file_change}
                    />
                </div>

                {if rejections.is_empty() {
                    html! {}
                } else {
                    html! {
                        <ul class="intake-rejections">
                            {for rejections.iter().map(|rejection| html! {
                                <li class="form-message error">{rejection.to_string()}</li>
                            })}
                        </ul>
                    }
                }}

                {if queue.is_empty() {
                    html! {}
                } else {
                    html! {
                        <ul class="upload-queue">
                            {for queue.items().iter().enumerate().map(|(index, item)| {
                                let on_remove = {
                                    let queue = queue.clone();
                                    Callback::from(move |_: MouseEvent| {
                                        let mut next = (*queue).clone();
                                        next.remove(index);
                                        queue.set(next);
                                    })
                                };
                                html! {
                                    <li class="queued-file" key={format!("{}-{}", index, item.meta.name)}>
                                        <span class="file-name">{item.meta.name.clone()}</span>
                                        <span class="file-size">{format_file_size(item.meta.size)}</span>
                                        {status_view(&item.status)}
                                        <button class="icon-btn" onclick={on_remove} disabled={uploading}>
                                            {"✕"}
                                        </button>
                                    </li>
                                }
                            })}
                        </ul>
                    }
                }}

                <div class="modal-buttons">
                    <button
                        class="btn btn-primary"
                        onclick={on_upload}
                        disabled={uploading || to_upload == 0}
                    >
                        {if uploading {
                            "Uploading...".to_string()
                        } else if has_failures {
                            format!("Retry {} File(s)", to_upload)
                        } else {
                            format!("Upload {} File(s)", to_upload)
                        }}
                    </button>
                    <button class="btn btn-secondary" onclick={on_close} disabled={uploading}>
                        {"Cancel"}
                    </button>
                </div>
            </div>
        </div>
    }
}
