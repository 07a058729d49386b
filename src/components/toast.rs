use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::js_sys::Date;
use yew::prelude::*;

pub const TOAST_TTL_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Info => "toast toast-info",
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
    pub expires_at: f64,
}

/// Pending toasts ordered oldest first. Times are milliseconds on any
/// monotonic clock the caller picks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u32,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub const MAX_VISIBLE: usize = 3;

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>, now: f64, ttl_ms: u32) -> u32 {
        self.next_id += 1;
        self.toasts.push(Toast {
            id: self.next_id,
            kind,
            message: message.into(),
            expires_at: now + ttl_ms as f64,
        });
        if self.toasts.len() > Self::MAX_VISIBLE {
            self.toasts.remove(0);
        }
        self.next_id
    }

    pub fn dismiss(&mut self, id: u32) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn expire(&mut self, now: f64) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

pub enum ToastAction {
    Push { kind: ToastKind, message: String, now: f64, ttl_ms: u32 },
    Dismiss(u32),
    Expire(f64),
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push { kind, message, now, ttl_ms } => {
                next.push(kind, message, now, ttl_ms);
            }
            ToastAction::Dismiss(id) => next.dismiss(id),
            ToastAction::Expire(now) => next.expire(now),
        }
        next.into()
    }
}

/// Shows a toast and schedules its removal.
pub fn notify(toasts: &UseReducerHandle<ToastQueue>, kind: ToastKind, message: impl Into<String>) {
    toasts.dispatch(ToastAction::Push {
        kind,
        message: message.into(),
        now: Date::now(),
        ttl_ms: TOAST_TTL_MS,
    });
    let toasts = toasts.clone();
    Timeout::new(TOAST_TTL_MS, move || toasts.dispatch(ToastAction::Expire(Date::now()))).forget();
}

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<u32>,
}

#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    html! {
        <div class="toast-stack" aria-live="polite">
            <style>
                {r#"
                    .toast-stack {
                        position: fixed;
                        right: 1.5rem;
                        bottom: 1.5rem;
                        display: flex;
                        flex-direction: column;
                        gap: 0.75rem;
                        z-index: 1000;
                    }
                    .toast {
                        display: flex;
                        align-items: center;
                        gap: 1rem;
                        min-width: 260px;
                        padding: 0.9rem 1.2rem;
                        border-radius: 12px;
                        color: #fff;
                        background: rgba(20, 20, 30, 0.92);
                        backdrop-filter: blur(10px);
                        box-shadow: 0 8px 24px rgba(0, 0, 0, 0.35);
                        animation: toastIn 0.3s ease-out;
                    }
                    .toast-info { border-left: 4px solid #00D4FF; }
                    .toast-success { border-left: 4px solid #4ADE80; }
                    .toast-error { border-left: 4px solid #FF5C7A; }
                    .toast button {
                        margin-left: auto;
                        background: none;
                        border: none;
                        color: rgba(255, 255, 255, 0.6);
                        cursor: pointer;
                    }
                    @keyframes toastIn {
                        from { transform: translateY(20px); opacity: 0; }
                        to { transform: translateY(0); opacity: 1; }
                    }
                "#}
            </style>
            { for props.toasts.iter().map(|toast| {
                let id = toast.id;
                let on_dismiss = props.on_dismiss.clone();
                html! {
                    <div key={id} class={toast.kind.class()} role="status">
                        <span>{ &toast.message }</span>
                        <button aria-label="Dismiss" onclick={Callback::from(move |_| on_dismiss.emit(id))}>
                            {"✕"}
                        </button>
                    </div>
                }
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_expire_after_ttl() {
        let mut queue = ToastQueue::default();
        queue.push(ToastKind::Info, "Draft restored", 0.0, 4000);
        queue.push(ToastKind::Success, "Sent", 1000.0, 4000);

        queue.expire(3999.0);
        assert_eq!(queue.toasts().len(), 2);
        queue.expire(4000.0);
        assert_eq!(queue.toasts().len(), 1);
        assert_eq!(queue.toasts()[0].message, "Sent");
    }

    #[test]
    fn test_oldest_toast_dropped_when_full() {
        let mut queue = ToastQueue::default();
        for i in 0..4 {
            queue.push(ToastKind::Error, format!("toast {}", i), 0.0, 1000);
        }
        let messages: Vec<&str> = queue.toasts().iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["toast 1", "toast 2", "toast 3"]);
    }

    #[test]
    fn test_reducer_applies_actions() {
        let queue = Rc::new(ToastQueue::default());
        let queue = queue.reduce(ToastAction::Push {
            kind: ToastKind::Success,
            message: "Sent".into(),
            now: 10.0,
            ttl_ms: 100,
        });
        assert_eq!(queue.toasts().len(), 1);
        let queue = queue.reduce(ToastAction::Expire(110.0));
        assert!(queue.toasts().is_empty());
    }

    #[test]
    fn test_dismiss_by_id() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastKind::Info, "a", 0.0, 1000);
        queue.push(ToastKind::Info, "b", 0.0, 1000);
        queue.dismiss(first);
        assert_eq!(queue.toasts().len(), 1);
        assert_eq!(queue.toasts()[0].message, "b");
    }
}
