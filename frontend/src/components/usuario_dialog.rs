//! 用户表单对话框
//!
//! 创建与编辑共用：编辑时用选中用户预填且 username 禁用，
//! 创建时为空白默认值。校验失败就地显示，不发请求。

use gestion_shared::{Perfil, Usuario};
use leptos::prelude::*;
use std::collections::HashMap;

pub mod form_state;

use form_state::{FormState, SolicitudUsuario, a_payload, validar_usuario};

#[component]
pub fn UsuarioDialog(
    /// 对话框可见性（父组件持有；成功后父组件关闭）
    abierto: RwSignal<bool>,
    /// None => 创建，Some => 编辑
    #[prop(into)]
    seleccionado: Signal<Option<Usuario>>,
    /// 可分配的档案目录
    #[prop(into)]
    catalogo: Signal<Vec<Perfil>>,
    /// 提交进行中
    #[prop(into)]
    ocupado: Signal<bool>,
    /// 校验通过后的提交回调
    #[prop(into)]
    on_submit: Callback<SolicitudUsuario>,
) -> impl IntoView {
    let form = FormState::new();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let es_edicion = move || seleccionado.get().is_some();

    // 打开时预填/重置；失败后保持打开，字段原样保留
    Effect::new(move |_| {
        if !abierto.get() {
            return;
        }
        match seleccionado.get_untracked() {
            Some(usuario) => form.cargar(&usuario, &catalogo.get_untracked()),
            None => form.reset(),
        }
    });

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

    let on_submit_form = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let edicion = seleccionado.get_untracked().is_some();
        let datos = form.instantanea();

        let errores = validar_usuario(&datos, edicion);
        if !errores.is_empty() {
            form.errores.set(errores);
            return;
        }
        form.errores.set(HashMap::new());

        on_submit.run(SolicitudUsuario {
            id: seleccionado.get_untracked().map(|usuario| usuario.id),
            payload: a_payload(&datos, edicion),
            perfiles_deseados: form.perfiles.get_untracked(),
            perfiles_actuales: form.perfiles_iniciales.get_untracked(),
        });
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| abierto.set(false)>
            <div class="modal-box max-w-2xl">
                <h3 class="font-bold text-lg">
                    {move || if es_edicion() { "Editar Usuario" } else { "Nuevo Usuario" }}
                </h3>

                <form on:submit=on_submit_form class="space-y-4 mt-4">
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="usuario-username" class="label">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="usuario-username"
                                type="text"
                                class="input input-bordered w-full"
                                disabled=es_edicion
                                on:input=move |ev| form.username.set(event_target_value(&ev))
                                prop:value=move || form.username.get()
                            />
                            {move || form.error_de("username").map(|error| view! {
                                <span class="label-text-alt text-error mt-1">{error}</span>
                            })}
                        </div>
                        <div class="form-control">
                            <label for="usuario-email" class="label">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="usuario-email"
                                type="text"
                                class="input input-bordered w-full"
                                on:input=move |ev| form.email.set(event_target_value(&ev))
                                prop:value=move || form.email.get()
                            />
                            {move || form.error_de("email").map(|error| view! {
                                <span class="label-text-alt text-error mt-1">{error}</span>
                            })}
                        </div>
                    </div>

                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="usuario-nombre" class="label">
                                <span class="label-text">"Nombre"</span>
                            </label>
                            <input
                                id="usuario-nombre"
                                type="text"
                                class="input input-bordered w-full"
                                on:input=move |ev| form.nombre.set(event_target_value(&ev))
                                prop:value=move || form.nombre.get()
                            />
                            {move || form.error_de("nombre").map(|error| view! {
                                <span class="label-text-alt text-error mt-1">{error}</span>
                            })}
                        </div>
                        <div class="form-control">
                            <label for="usuario-apellidos" class="label">
                                <span class="label-text">"Apellidos"</span>
                            </label>
                            <input
                                id="usuario-apellidos"
                                type="text"
                                class="input input-bordered w-full"
                                on:input=move |ev| form.apellidos.set(event_target_value(&ev))
                                prop:value=move || form.apellidos.get()
                            />
                            {move || form.error_de("apellidos").map(|error| view! {
                                <span class="label-text-alt text-error mt-1">{error}</span>
                            })}
                        </div>
                    </div>

                    <Show when=move || !es_edicion()>
                        <div class="form-control">
                            <label for="usuario-password" class="label">
                                <span class="label-text">"Contraseña"</span>
                            </label>
                            <input
                                id="usuario-password"
                                type="password"
                                class="input input-bordered w-full"
                                on:input=move |ev| form.password.set(event_target_value(&ev))
                                prop:value=move || form.password.get()
                            />
                            {move || form.error_de("password").map(|error| view! {
                                <span class="label-text-alt text-error mt-1">{error}</span>
                            })}
                        </div>
                    </Show>

                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"Perfiles"</span>
                        </label>
                        <div class="flex flex-wrap gap-3 p-3 bg-base-200 rounded-lg">
                            <For
                                each=move || catalogo.get()
                                key=|perfil| perfil.id
                                children=move |perfil| {
                                    let id = perfil.id;
                                    view! {
                                        <label class="label cursor-pointer gap-2">
                                            <input
                                                type="checkbox"
                                                class="checkbox checkbox-sm checkbox-primary"
                                                prop:checked=move || form.perfiles.with(|s| s.contains(&id))
                                                on:change=move |_| form.alternar_perfil(id)
                                            />
                                            <span class="label-text">{perfil.nombre.clone()}</span>
                                        </label>
                                    }
                                }
                            />
                        </div>
                    </div>

                    <div class="form-control">
                        <label class="label cursor-pointer justify-start gap-3">
                            <input
                                type="checkbox"
                                class="toggle toggle-success"
                                prop:checked=move || form.activo.get()
                                on:change=move |ev| form.activo.set(event_target_checked(&ev))
                            />
                            <span class="label-text">"Usuario activo"</span>
                        </label>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| abierto.set(false)>
                            "Cancelar"
                        </button>
                        <button type="submit" disabled=move || ocupado.get() class="btn btn-primary">
                            {move || if ocupado.get() {
                                view! { <span class="loading loading-spinner"></span> "Guardando..." }.into_any()
                            } else if es_edicion() {
                                "Actualizar".into_any()
                            } else {
                                "Crear".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
