//! 档案管理页面
//!
//! 与 Usuarios 相同的列表资源模式。额外规则：名为 ADMIN 的
//! 档案不可删除（按钮禁用 + 确认对话框否决）。

use crate::api::ApiClient;
use crate::auth::use_auth;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::icons::{Pencil, Plus, RefreshCw, Search, ShieldCheck, Trash2};
use crate::components::paginacion::Paginacion;
use crate::components::perfil_dialog::{PerfilDialog, SolicitudPerfil};
use crate::components::toast::use_toast;
use crate::error::ApiError;
use crate::listing::use_listing;
use gestion_shared::Perfil;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 搜索防抖（毫秒）
const RETARDO_BUSQUEDA_MS: u32 = 300;

#[component]
pub fn PerfilesPage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let api = auth.api_signal();

    let listado = use_listing(
        api,
        move |error: ApiError| toast.error(error.mensaje_o("Error al cargar perfiles")),
        |cliente: ApiClient, consulta| async move {
            if consulta.usa_busqueda() {
                cliente
                    .buscar_perfiles(consulta.termino.trim(), consulta.page, consulta.size)
                    .await
            } else {
                cliente.listar_perfiles(consulta.page, consulta.size).await
            }
        },
    );

    let (busqueda, set_busqueda) = signal(String::new());
    let debounce = StoredValue::new_local(None::<Timeout>);
    let al_escribir = move |ev| {
        let valor = event_target_value(&ev);
        set_busqueda.set(valor.clone());
        let temporizador = Timeout::new(RETARDO_BUSQUEDA_MS, move || {
            listado.estado.cambiar_termino(valor);
        });
        debounce.set_value(Some(temporizador));
    };

    let abierto_form = RwSignal::new(false);
    let seleccionado = RwSignal::new(Option::<Perfil>::None);
    let (guardando, set_guardando) = signal(false);

    let confirmar_abierto = RwSignal::new(false);
    let objetivo_eliminar = RwSignal::new(Option::<Perfil>::None);
    let (eliminando, set_eliminando) = signal(false);

    let manejar_guardado = Callback::new(move |solicitud: SolicitudPerfil| {
        let Some(cliente) = api.get_untracked() else {
            return;
        };
        let fallback = if solicitud.id.is_some() {
            "Error al actualizar perfil"
        } else {
            "Error al crear perfil"
        };
        set_guardando.set(true);
        spawn_local(async move {
            let resultado = match solicitud.id {
                None => cliente.crear_perfil(&solicitud.payload).await.map(|_| ()),
                Some(id) => cliente
                    .actualizar_perfil(id, &solicitud.payload)
                    .await
                    .map(|_| ()),
            };
            set_guardando.set(false);
            match resultado {
                Ok(()) => {
                    let mensaje = if solicitud.id.is_some() {
                        "Perfil actualizado exitosamente"
                    } else {
                        "Perfil creado exitosamente"
                    };
                    toast.exito(mensaje);
                    listado.estado.refrescar();
                    abierto_form.set(false);
                    seleccionado.set(None);
                }
                Err(error) => toast.error(error.mensaje_o(fallback)),
            }
        });
    });

    let manejar_eliminar = Callback::new(move |_: ()| {
        let Some(cliente) = api.get_untracked() else {
            return;
        };
        let Some(perfil) = objetivo_eliminar.get_untracked() else {
            return;
        };
        // 策略否决：即使回调被触发也拒绝
        if perfil.es_protegido() {
            return;
        }
        set_eliminando.set(true);
        spawn_local(async move {
            match cliente.eliminar_perfil(perfil.id).await {
                Ok(()) => {
                    toast.exito("Perfil eliminado exitosamente");
                    listado.estado.refrescar();
                    confirmar_abierto.set(false);
                    objetivo_eliminar.set(None);
                }
                Err(error) => toast.error(error.mensaje_o("Error al eliminar perfil")),
            }
            set_eliminando.set(false);
        });
    });

    let filas = move || {
        listado
            .datos
            .get()
            .map(|pagina| pagina.content)
            .unwrap_or_default()
    };
    let total = move || {
        listado
            .datos
            .get()
            .map(|pagina| pagina.total_elements)
            .unwrap_or(0)
    };
    let sin_filas = move || filas().is_empty();

    let objetivo_protegido = Signal::derive(move || {
        objetivo_eliminar
            .get()
            .map(|perfil| perfil.es_protegido())
            .unwrap_or(false)
    });

    let mensaje_confirmacion = Signal::derive(move || {
        let nombre = objetivo_eliminar
            .get()
            .map(|perfil| perfil.nombre)
            .unwrap_or_default();
        format!(
            "¿Está seguro de que desea eliminar el perfil \"{}\"? Esta acción no se puede deshacer.",
            nombre
        )
    });

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Gestión de Perfiles"</h1>
                <p class="text-base-content/70 mt-1">
                    "Administra los perfiles del sistema y sus permisos."
                </p>
            </div>

            // 工具栏
            <div class="flex flex-wrap items-center gap-2">
                <label class="input input-bordered flex items-center gap-2 flex-1 min-w-64">
                    <Search attr:class="h-4 w-4 opacity-50" />
                    <input
                        type="text"
                        class="grow"
                        placeholder="Buscar perfiles..."
                        on:input=al_escribir
                        prop:value=busqueda
                    />
                </label>
                <button
                    class="btn btn-primary gap-2"
                    on:click=move |_| {
                        seleccionado.set(None);
                        abierto_form.set(true);
                    }
                >
                    <Plus attr:class="h-4 w-4" /> "Nuevo Perfil"
                </button>
                <button
                    class="btn btn-ghost gap-2"
                    on:click=move |_| listado.estado.refrescar()
                    disabled=move || listado.cargando.get()
                >
                    <RefreshCw attr:class=move || {
                        if listado.cargando.get() { "h-4 w-4 animate-spin" } else { "h-4 w-4" }
                    } />
                    "Actualizar"
                </button>
            </div>

            // 档案表格
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Perfil"</th>
                                    <th>"Descripción"</th>
                                    <th class="hidden md:table-cell">"Fecha de Creación"</th>
                                    <th>"Acciones"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || sin_filas() && !listado.cargando.get()>
                                    <tr>
                                        <td colspan="4" class="text-center py-8 text-base-content/50">
                                            "No se encontraron perfiles."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || sin_filas() && listado.cargando.get()>
                                    <tr>
                                        <td colspan="4" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span>
                                            " Cargando..."
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=filas
                                    key=|perfil| perfil.id
                                    children=move |perfil| {
                                        let protegido = perfil.es_protegido();
                                        let perfil_editar = perfil.clone();
                                        let perfil_eliminar = perfil.clone();
                                        let fecha = perfil
                                            .fecha_creacion
                                            .map(|fecha| fecha.format("%d/%m/%Y").to_string())
                                            .unwrap_or_else(|| "—".to_string());
                                        view! {
                                            <tr>
                                                <td>
                                                    <div class="flex items-center gap-2 font-bold">
                                                        <ShieldCheck attr:class="h-4 w-4 text-primary" />
                                                        {perfil.nombre.clone()}
                                                        <Show when=move || protegido>
                                                            <span class="badge badge-warning badge-sm">"Sistema"</span>
                                                        </Show>
                                                    </div>
                                                </td>
                                                <td class="opacity-70">
                                                    {perfil.descripcion.clone().unwrap_or_default()}
                                                </td>
                                                <td class="hidden md:table-cell">{fecha}</td>
                                                <td>
                                                    <div class="flex gap-1">
                                                        <button
                                                            class="btn btn-ghost btn-sm btn-square text-primary"
                                                            on:click=move |_| {
                                                                seleccionado.set(Some(perfil_editar.clone()));
                                                                abierto_form.set(true);
                                                            }
                                                        >
                                                            <Pencil attr:class="h-4 w-4" />
                                                        </button>
                                                        <button
                                                            class="btn btn-ghost btn-sm btn-square text-error"
                                                            disabled=protegido
                                                            on:click=move |_| {
                                                                objetivo_eliminar.set(Some(perfil_eliminar.clone()));
                                                                confirmar_abierto.set(true);
                                                            }
                                                        >
                                                            <Trash2 attr:class="h-4 w-4" />
                                                        </button>
                                                    </div>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>

                    <Paginacion estado=listado.estado total=Signal::derive(total) />
                </div>
            </div>

            <PerfilDialog
                abierto=abierto_form
                seleccionado=Signal::derive(move || seleccionado.get())
                ocupado=Signal::derive(move || guardando.get())
                on_submit=manejar_guardado
            />

            <ConfirmDialog
                abierto=confirmar_abierto
                mensaje=mensaje_confirmacion
                vetado=objetivo_protegido
                aviso_veto=Signal::derive(|| {
                    "No se puede eliminar el perfil ADMIN del sistema.".to_string()
                })
                ocupado=Signal::derive(move || eliminando.get())
                on_confirm=manejar_eliminar
            />
        </div>
    }
}
