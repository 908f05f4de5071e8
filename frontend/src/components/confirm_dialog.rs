//! 删除确认对话框
//!
//! 破坏性操作从不在点击时立即执行：必须经过这一步，
//! 且消息里点名目标实体。被策略否决的操作（ADMIN 档案）
//! 确认按钮禁用，即使回调被触发也会拒绝。

use crate::components::icons::AlertTriangle;
use leptos::prelude::*;

#[component]
pub fn ConfirmDialog(
    /// 对话框可见性（父组件持有）
    abierto: RwSignal<bool>,
    /// 确认消息，点名要删除的实体
    #[prop(into)] mensaje: Signal<String>,
    /// 策略否决：true 时禁用确认且拒绝回调
    #[prop(into)] vetado: Signal<bool>,
    /// 否决时显示的警告文案
    #[prop(into)] aviso_veto: Signal<String>,
    /// 删除请求进行中
    #[prop(into)] ocupado: Signal<bool>,
    /// 确认回调
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if abierto.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let confirmar = move |_| {
        // 二次防线：按钮被禁用，但仍拒绝任何到达这里的触发
        if vetado.get() || ocupado.get() {
            return;
        }
        on_confirm.run(());
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| abierto.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Confirmar Eliminación"</h3>
                <p class="py-4">{move || mensaje.get()}</p>

                <Show when=move || vetado.get()>
                    <div role="alert" class="alert alert-warning text-sm py-2">
                        <AlertTriangle attr:class="h-5 w-5" />
                        <span>{move || aviso_veto.get()}</span>
                    </div>
                </Show>

                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| abierto.set(false)>
                        "Cancelar"
                    </button>
                    <button
                        type="button"
                        class="btn btn-error"
                        disabled=move || vetado.get() || ocupado.get()
                        on:click=confirmar
                    >
                        {move || if ocupado.get() {
                            view! { <span class="loading loading-spinner"></span> "Eliminando..." }.into_any()
                        } else {
                            "Eliminar".into_any()
                        }}
                    </button>
                </div>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
