//! 通知提示
//!
//! 进程内唯一的通知通道：突变的成功/失败都从这里冒泡，
//! 3 秒后自动消失。在 App 根部渲染一次 `ToastHost`。

use leptos::prelude::*;
use std::time::Duration;

#[derive(Clone, PartialEq)]
struct Aviso {
    mensaje: String,
    es_error: bool,
}

/// 通知上下文，通过 Context 在组件间共享
#[derive(Clone, Copy)]
pub struct ToastContext {
    aviso: ReadSignal<Option<Aviso>>,
    set_aviso: WriteSignal<Option<Aviso>>,
}

impl ToastContext {
    pub fn new() -> Self {
        let (aviso, set_aviso) = signal(Option::<Aviso>::None);
        Self { aviso, set_aviso }
    }

    /// 成功通知
    pub fn exito(&self, mensaje: impl Into<String>) {
        self.set_aviso.set(Some(Aviso {
            mensaje: mensaje.into(),
            es_error: false,
        }));
    }

    /// 错误通知
    pub fn error(&self, mensaje: impl Into<String>) {
        self.set_aviso.set(Some(Aviso {
            mensaje: mensaje.into(),
            es_error: true,
        }));
    }
}

/// 从 Context 获取通知上下文
pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}

/// 通知渲染宿主
#[component]
pub fn ToastHost() -> impl IntoView {
    let toast = use_toast();
    let aviso = toast.aviso;
    let set_aviso = toast.set_aviso;

    // 3秒后清除通知
    Effect::new(move |_| {
        if aviso.get().is_some() {
            set_timeout(move || set_aviso.set(None), Duration::from_secs(3));
        }
    });

    view! {
        <Show when=move || aviso.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    if aviso.get().map(|a| a.es_error).unwrap_or(false) {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    }
                }>
                    <span>{move || aviso.get().map(|a| a.mensaje).unwrap_or_default()}</span>
                </div>
            </div>
        </Show>
    }
}
