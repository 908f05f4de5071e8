//! 档案表单对话框
//!
//! 名为 ADMIN 的档案名称不可编辑：输入框禁用，而且载荷
//! 始终采用原名称，UI 层无论如何都发不出改名请求。

use crate::validacion;
use gestion_shared::{Perfil, PerfilPayload};
use leptos::prelude::*;
use std::collections::HashMap;

/// 表单字段快照
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatosPerfil {
    pub nombre: String,
    pub descripcion: String,
}

/// 页面收到的提交请求
#[derive(Debug, Clone, PartialEq)]
pub struct SolicitudPerfil {
    /// None => 创建，Some => 更新
    pub id: Option<i64>,
    pub payload: PerfilPayload,
}

/// 字段校验；受保护档案的名称是固定值，不参与校验
pub fn validar_perfil(datos: &DatosPerfil, protegido: bool) -> HashMap<&'static str, String> {
    let mut errores = HashMap::new();

    if !protegido {
        if let Some(error) = validacion::requerido(&datos.nombre, "Nombre es requerido")
            .or_else(|| validacion::longitud_entre(&datos.nombre, 3, 50))
        {
            errores.insert("nombre", error);
        }
    }
    if let Some(error) = validacion::longitud_maxima(&datos.descripcion, 255) {
        errores.insert("descripcion", error);
    }

    errores
}

/// 载荷里最终使用的名称：受保护档案永远保留原名
pub fn nombre_definitivo(original: Option<&Perfil>, ingresado: &str) -> String {
    match original {
        Some(perfil) if perfil.es_protegido() => perfil.nombre.clone(),
        _ => ingresado.trim().to_string(),
    }
}

pub fn a_payload(original: Option<&Perfil>, datos: &DatosPerfil) -> PerfilPayload {
    let descripcion = datos.descripcion.trim();
    PerfilPayload {
        nombre: nombre_definitivo(original, &datos.nombre),
        descripcion: if descripcion.is_empty() {
            None
        } else {
            Some(descripcion.to_string())
        },
    }
}

#[component]
pub fn PerfilDialog(
    /// 对话框可见性（父组件持有；成功后父组件关闭）
    abierto: RwSignal<bool>,
    /// None => 创建，Some => 编辑
    #[prop(into)]
    seleccionado: Signal<Option<Perfil>>,
    /// 提交进行中
    #[prop(into)]
    ocupado: Signal<bool>,
    /// 校验通过后的提交回调
    #[prop(into)]
    on_submit: Callback<SolicitudPerfil>,
) -> impl IntoView {
    let nombre = RwSignal::new(String::new());
    let descripcion = RwSignal::new(String::new());
    let errores = RwSignal::new(HashMap::<&'static str, String>::new());
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let es_edicion = move || seleccionado.get().is_some();
    let protegido = move || {
        seleccionado
            .get()
            .map(|perfil| perfil.es_protegido())
            .unwrap_or(false)
    };

    // 打开时预填/重置
    Effect::new(move |_| {
        if !abierto.get() {
            return;
        }
        match seleccionado.get_untracked() {
            Some(perfil) => {
                nombre.set(perfil.nombre.clone());
                descripcion.set(perfil.descripcion.clone().unwrap_or_default());
            }
            None => {
                nombre.set(String::new());
                descripcion.set(String::new());
            }
        }
        errores.set(HashMap::new());
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
        let original = seleccionado.get_untracked();
        let datos = DatosPerfil {
            nombre: nombre.get(),
            descripcion: descripcion.get(),
        };

        let encontrados = validar_perfil(&datos, protegido());
        if !encontrados.is_empty() {
            errores.set(encontrados);
            return;
        }
        errores.set(HashMap::new());

        on_submit.run(SolicitudPerfil {
            id: original.as_ref().map(|perfil| perfil.id),
            payload: a_payload(original.as_ref(), &datos),
        });
    };

    let error_de = move |campo: &'static str| errores.with(|e| e.get(campo).cloned());

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| abierto.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">
                    {move || if es_edicion() { "Editar Perfil" } else { "Nuevo Perfil" }}
                </h3>

                <form on:submit=on_submit_form class="space-y-4 mt-4">
                    <div class="form-control">
                        <label for="perfil-nombre" class="label">
                            <span class="label-text">"Nombre del Perfil"</span>
                        </label>
                        <input
                            id="perfil-nombre"
                            type="text"
                            class="input input-bordered w-full"
                            disabled=protegido
                            on:input=move |ev| nombre.set(event_target_value(&ev))
                            prop:value=move || nombre.get()
                        />
                        <Show when=protegido>
                            <span class="label-text-alt text-warning mt-1">
                                "El nombre del perfil ADMIN no se puede modificar."
                            </span>
                        </Show>
                        {move || error_de("nombre").map(|error| view! {
                            <span class="label-text-alt text-error mt-1">{error}</span>
                        })}
                    </div>

                    <div class="form-control">
                        <label for="perfil-descripcion" class="label">
                            <span class="label-text">"Descripción"</span>
                        </label>
                        <textarea
                            id="perfil-descripcion"
                            class="textarea textarea-bordered w-full"
                            rows="3"
                            on:input=move |ev| descripcion.set(event_target_value(&ev))
                            prop:value=move || descripcion.get()
                        ></textarea>
                        {move || error_de("descripcion").map(|error| view! {
                            <span class="label-text-alt text-error mt-1">{error}</span>
                        })}
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

#[cfg(test)]
mod tests {
    use super::*;

    fn perfil(id: i64, nombre: &str) -> Perfil {
        Perfil {
            id,
            nombre: nombre.into(),
            descripcion: None,
            fecha_creacion: None,
            fecha_modificacion: None,
        }
    }

    #[test]
    fn nombre_corto_es_rechazado() {
        let datos = DatosPerfil {
            nombre: "AB".into(),
            descripcion: String::new(),
        };
        let errores = validar_perfil(&datos, false);
        assert_eq!(errores.get("nombre").unwrap(), "Mínimo 3 caracteres");
    }

    #[test]
    fn descripcion_larga_es_rechazada() {
        let datos = DatosPerfil {
            nombre: "SOPORTE".into(),
            descripcion: "x".repeat(256),
        };
        let errores = validar_perfil(&datos, false);
        assert_eq!(errores.get("descripcion").unwrap(), "Máximo 255 caracteres");
    }

    #[test]
    fn perfil_protegido_no_valida_nombre() {
        // the name field is disabled and pinned, so it must not block submission
        let datos = DatosPerfil {
            nombre: String::new(),
            descripcion: "Perfil de administración".into(),
        };
        assert!(validar_perfil(&datos, true).is_empty());
    }

    #[test]
    fn editar_admin_conserva_el_nombre_original() {
        let admin = perfil(1, "ADMIN");
        // even if the UI somehow sent another name, the payload keeps ADMIN
        assert_eq!(nombre_definitivo(Some(&admin), "OTRO"), "ADMIN");

        let payload = a_payload(
            Some(&admin),
            &DatosPerfil {
                nombre: "OTRO".into(),
                descripcion: String::new(),
            },
        );
        assert_eq!(payload.nombre, "ADMIN");
        assert_eq!(payload.descripcion, None);
    }

    #[test]
    fn perfil_comun_usa_el_nombre_ingresado() {
        let soporte = perfil(2, "SOPORTE");
        assert_eq!(nombre_definitivo(Some(&soporte), " VENTAS "), "VENTAS");
        assert_eq!(nombre_definitivo(None, "VENTAS"), "VENTAS");
    }
}
