mod client;
mod host;
mod styles;

use gloo_file::File;
use leptos::html::Input;
use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use wasm_bindgen::prelude::*;

pub use client::{BrowserClient, XhrHandle};
pub use host::{current_fragment, BrowserHost, TimerGuard};
use styles::MAIN_STYLES;

use crate::config::ClientConfig;
use crate::controller::{AppState, Intent};
use crate::dialog::ConfirmDialog;
use crate::listing::{FileRow, Listing};
use crate::runtime::Runtime;
use crate::upload::UploadFlow;
use crate::view::View;

pub type AppRuntime = Runtime<BrowserClient, BrowserHost>;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let (state, set_state) = create_signal(AppState::default());
    let file_input = create_node_ref::<Input>();

    let config = ClientConfig::default();
    log::info!("using file service at {}", config.api_base);
    let runtime: AppRuntime = Runtime::new(
        BrowserClient::new(config.clone()),
        BrowserHost::new(set_state, file_input),
        config,
    );

    let dispatch = {
        let runtime = runtime.clone();
        Callback::new(move |intent: Intent| runtime.dispatch(intent))
    };
    let select_file = Callback::new(move |file: File| runtime.select_file(file));

    // Back/forward re-derives the view without pushing a new entry
    let _ = window_event_listener(ev::popstate, move |_| {
        dispatch.call(Intent::HistoryChanged(current_fragment()));
    });
    dispatch.call(Intent::HistoryChanged(current_fragment()));

    let current_view = create_memo(move |_| state.with(|s| s.view));

    view! {
        <div class="app">
            <StyleProvider />
            <Title text=move || format!("{} | filedock", current_view.get().title()) />
            <div class="main-grid">
                <div class="header-section border-container">
                    <div>
                        <h1 style="color: #cdd6f4; margin: 0; font-size: 2.2rem; font-weight: 500;">
                            "filedock"
                        </h1>
                        <p style="color: #bac2de; margin: 8px 0 0 0;">
                            "upload, download, and manage your files"
                        </p>
                    </div>
                    <Nav current_view=current_view dispatch=dispatch />
                </div>

                <div
                    class="files-section border-container"
                    class:hidden=move || current_view.get() != View::Files
                >
                    <FilesView state=state dispatch=dispatch />
                </div>

                <div
                    class="upload-section border-container"
                    class:hidden=move || current_view.get() != View::Upload
                >
                    <UploadView
                        state=state
                        dispatch=dispatch
                        select_file=select_file
                        file_input=file_input
                    />
                </div>
            </div>

            <ConfirmDialogView state=state dispatch=dispatch />
            <Toasts state=state />
            <Show when=move || state.with(AppState::loading)>
                <div class="loading-spinner">
                    <div class="spinner"></div>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn Nav(current_view: Memo<View>, dispatch: Callback<Intent>) -> impl IntoView {
    view! {
        <nav class="nav">
            {View::ALL
                .into_iter()
                .map(|view| {
                    view! {
                        <a
                            href=view.fragment()
                            class="nav-link border-container"
                            class:active=move || current_view.get() == view
                            on:click=move |ev| {
                                ev.prevent_default();
                                dispatch.call(Intent::Navigate(view));
                            }
                        >
                            {view.title()}
                        </a>
                    }
                })
                .collect_view()}
        </nav>
    }
}

#[component]
fn FilesView(state: ReadSignal<AppState>, dispatch: Callback<Intent>) -> impl IntoView {
    let listing = create_memo(move |_| state.with(AppState::listing));

    view! {
        <div class="files-toolbar">
            <label class="select-all">
                <input
                    type="checkbox"
                    prop:checked=move || listing.with(|l| l.all_checked)
                    on:change=move |ev| dispatch.call(Intent::ToggleSelectAll(event_target_checked(&ev)))
                />
                " select all"
            </label>
            <Show when=move || listing.with(Listing::bulk_delete_visible)>
                <button
                    type="button"
                    class="action-btn delete-btn border-container"
                    on:click=move |_| dispatch.call(Intent::RequestBulkDelete)
                >
                    {move || listing.with(Listing::bulk_delete_label)}
                </button>
            </Show>
            <button
                type="button"
                class="action-btn border-container"
                on:click=move |_| dispatch.call(Intent::Navigate(View::Upload))
            >
                "upload file"
            </button>
        </div>

        <Show
            when=move || !listing.with(Listing::is_empty)
            fallback=move || view! { <EmptyState dispatch=dispatch /> }
        >
            <div class="file-list">
                <div class="file-row file-header">
                    <div class="file-cell"></div>
                    <div class="file-cell">"name"</div>
                    <div class="file-cell file-type">"type"</div>
                    <div class="file-cell file-size">"size"</div>
                    <div class="file-cell file-date">"uploaded"</div>
                    <div class="file-cell">"actions"</div>
                </div>
                <For
                    each=move || listing.with(|l| l.rows.clone())
                    key=|row| row.clone()
                    let:row
                >
                    <FileRowView row=row dispatch=dispatch />
                </For>
            </div>
        </Show>
    }
}

#[component]
fn FileRowView(row: FileRow, dispatch: Callback<Intent>) -> impl IntoView {
    let FileRow {
        id,
        name,
        type_label,
        size_label,
        date_label,
        checked,
    } = row;
    let toggle_id = id.clone();
    let download_id = id.clone();
    let delete_id = id;

    view! {
        <div class="file-row">
            <div class="file-cell">
                <input
                    type="checkbox"
                    prop:checked=checked
                    on:change=move |ev| {
                        dispatch.call(Intent::ToggleSelection {
                            id: toggle_id.clone(),
                            checked: event_target_checked(&ev),
                        })
                    }
                />
            </div>
            <div class="file-cell file-name" title=name.clone()>{name}</div>
            <div class="file-cell file-type">
                <span class="file-type-badge">{type_label}</span>
            </div>
            <div class="file-cell file-size">{size_label}</div>
            <div class="file-cell file-date">{date_label}</div>
            <div class="file-cell file-actions">
                <button
                    type="button"
                    class="action-btn border-container"
                    title="Download"
                    on:click=move |_| dispatch.call(Intent::Download(download_id.clone()))
                >
                    "download"
                </button>
                <button
                    type="button"
                    class="action-btn delete-btn border-container"
                    title="Delete"
                    on:click=move |_| dispatch.call(Intent::RequestDelete(delete_id.clone()))
                >
                    "delete"
                </button>
            </div>
        </div>
    }
}

#[component]
fn EmptyState(dispatch: Callback<Intent>) -> impl IntoView {
    view! {
        <div class="empty-state">
            <div class="empty-icon">"[ ]"</div>
            <div>"no files uploaded yet"</div>
            <button
                type="button"
                class="action-btn border-container"
                style="margin-top: 20px;"
                on:click=move |_| dispatch.call(Intent::Navigate(View::Upload))
            >
                "upload your first file"
            </button>
        </div>
    }
}

#[component]
fn UploadView(
    state: ReadSignal<AppState>,
    dispatch: Callback<Intent>,
    select_file: Callback<File>,
    file_input: NodeRef<Input>,
) -> impl IntoView {
    let (drag_over, set_drag_over) = create_signal(false);
    let upload = create_memo(move |_| state.with(|s| s.upload.clone()));

    let on_drag = move |ev: ev::DragEvent, over: bool| {
        ev.prevent_default();
        ev.stop_propagation();
        set_drag_over.set(over);
    };

    let on_drop = move |ev: ev::DragEvent| {
        on_drag(ev.clone(), false);
        let dropped = ev
            .data_transfer()
            .and_then(|transfer| transfer.files())
            .and_then(|files| files.get(0));
        if let Some(file) = dropped {
            select_file.call(File::from(file));
        }
    };

    let on_file_change = move |_| {
        let picked = file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        if let Some(file) = picked {
            select_file.call(File::from(file));
        }
    };

    let on_browse_click = move |_| {
        if let Some(input) = file_input.get_untracked() {
            input.click();
        }
    };

    view! {
        <div
            class="dropzone border-container"
            class:drag-over=move || drag_over.get()
            on:dragenter=move |ev| on_drag(ev, true)
            on:dragover=move |ev| on_drag(ev, true)
            on:dragleave=move |ev| on_drag(ev, false)
            on:drop=on_drop
        >
            <div style="font-size: 18px; margin-bottom: 10px;">"drag and drop a file here"</div>
            <div style="color: #6c7086; margin-bottom: 10px;">"or"</div>
            <input
                type="file"
                id="file-input"
                ref=file_input
                on:change=on_file_change
                style="display: none;"
            />
            <button
                type="button"
                class="choose-files-btn border-container"
                on:click=on_browse_click
            >
                "browse files"
            </button>
        </div>

        <Show when=move || upload.with(|u| u.pending().is_some())>
            <div class="selected-file border-container">
                <span class="selected-name">
                    {move || upload.with(|u| u.pending().map(|p| p.name.clone()).unwrap_or_default())}
                </span>
                <span class="selected-size">
                    {move || upload.with(|u| u.pending().map(|p| p.size_label()).unwrap_or_default())}
                </span>
            </div>
        </Show>

        <Show when=move || upload.with(UploadFlow::shows_progress)>
            <div class="progress-section">
                <div class="progress-bar">
                    <div
                        class="progress-fill"
                        style=move || format!("width: {}%", upload.with(UploadFlow::progress_percent))
                    ></div>
                </div>
                <div class="progress-percentage">
                    {move || format!("{}%", upload.with(UploadFlow::progress_percent))}
                </div>
            </div>
        </Show>

        <div class="upload-actions">
            <button
                type="button"
                class="action-btn border-container"
                on:click=move |_| dispatch.call(Intent::CancelUpload)
            >
                "cancel"
            </button>
            <button
                type="button"
                class="upload-files-btn border-container"
                disabled=move || !upload.with(UploadFlow::can_submit)
                on:click=move |_| dispatch.call(Intent::StartUpload)
            >
                {move || if upload.with(UploadFlow::is_uploading) { "uploading..." } else { "upload" }}
            </button>
        </div>
    }
}

#[component]
fn ConfirmDialogView(state: ReadSignal<AppState>, dispatch: Callback<Intent>) -> impl IntoView {
    let dialog = create_memo(move |_| state.with(|s| s.dialog.clone()));
    let text = move |pick: fn(&ConfirmDialog) -> &str| {
        dialog.with(|d| d.as_ref().map(|d| pick(d).to_string()).unwrap_or_default())
    };

    view! {
        <Show when=move || dialog.with(Option::is_some)>
            <div class="dialog-backdrop" on:click=move |_| dispatch.call(Intent::DismissDialog)>
                <div class="dialog border-container" on:click=|ev| ev.stop_propagation()>
                    <h3 class="dialog-title">{move || text(|d| d.title.as_str())}</h3>
                    <p class="dialog-message">{move || text(|d| d.message.as_str())}</p>
                    <div class="dialog-actions">
                        <button
                            type="button"
                            class="action-btn border-container"
                            on:click=move |_| dispatch.call(Intent::DismissDialog)
                        >
                            "cancel"
                        </button>
                        <button
                            type="button"
                            class="action-btn delete-btn border-container"
                            on:click=move |_| dispatch.call(Intent::ConfirmDialog)
                        >
                            "delete"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[component]
fn Toasts(state: ReadSignal<AppState>) -> impl IntoView {
    let toasts = create_memo(move |_| state.with(|s| s.toasts.iter().cloned().collect::<Vec<_>>()));

    view! {
        <div class="toast-container">
            <For
                each=move || toasts.get()
                key=|toast| (toast.id, toast.removing)
                let:toast
            >
                <div class=toast.kind.class() class:removing=toast.removing>
                    {toast.message}
                </div>
            </For>
        </div>
    }
}

// CSS-in-Rust: Component that injects styles
#[component]
fn StyleProvider() -> impl IntoView {
    view! {
        <style>{MAIN_STYLES}</style>
    }
}

#[wasm_bindgen]
pub fn run() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);
    mount_to_body(|| view! { <App /> });
}
