//! Transient user-facing notices (toasts).

use contracts::shared::api_error::ApiError;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use thaw::*;

const NOTICE_TTL_MS: u32 = 6_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Clone, Copy)]
pub struct NoticeService {
    notices: RwSignal<Vec<Notice>>,
    next_id: StoredValue<u64>,
}

impl NoticeService {
    pub fn new() -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    pub fn push(&self, kind: NoticeKind, text: impl Into<String>) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.notices.update(|n| {
            n.push(Notice {
                id,
                kind,
                text: text.into(),
            })
        });
        let this = *self;
        Timeout::new(NOTICE_TTL_MS, move || this.dismiss(id)).forget();
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(NoticeKind::Success, text);
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(NoticeKind::Info, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(NoticeKind::Error, text);
    }

    /// Report a failed call. Superseded requests are not failures.
    pub fn api_error(&self, err: &ApiError) {
        if err.is_cancelled() {
            return;
        }
        self.error(err.user_message());
    }

    pub fn dismiss(&self, id: u64) {
        self.notices.try_update(|n| n.retain(|x| x.id != id));
    }
}

impl Default for NoticeService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notices() -> NoticeService {
    use_context::<NoticeService>().expect("NoticeService not provided in context")
}

#[component]
pub fn NoticeHost() -> impl IntoView {
    let service = use_notices();

    view! {
        <div class="notice-host">
            <For
                each=move || service.notices.get()
                key=|n| n.id
                children=move |n: Notice| {
                    let intent = match n.kind {
                        NoticeKind::Success => MessageBarIntent::Success,
                        NoticeKind::Info => MessageBarIntent::Info,
                        NoticeKind::Error => MessageBarIntent::Error,
                    };
                    let id = n.id;
                    view! {
                        <div class="notice-host__item" on:click=move |_| service.dismiss(id)>
                            <MessageBar intent=intent>
                                <span class="notice-host__text">{n.text}</span>
                            </MessageBar>
                        </div>
                    }
                }
            />
        </div>
    }
}
