//! 用户管理页面
//!
//! 列表资源模式的完整实例：防抖搜索 + 分页获取、
//! 创建/编辑对话框、删除确认、激活状态开关。
//! 突变契约：成功 = 一次刷新 + 一次成功通知 + 关闭对话框；
//! 失败 = 不刷新 + 一次错误通知 + 对话框保持打开。

use crate::api::ApiClient;
use crate::auth::use_auth;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::icons::{Mail, Pencil, Plus, RefreshCw, Search, Trash2, User};
use crate::components::paginacion::Paginacion;
use crate::components::toast::use_toast;
use crate::components::usuario_dialog::UsuarioDialog;
use crate::components::usuario_dialog::form_state::{SolicitudUsuario, diff_perfiles};
use crate::error::ApiError;
use crate::listing::use_listing;
use gestion_shared::{Perfil, Usuario};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 搜索防抖（毫秒）
const RETARDO_BUSQUEDA_MS: u32 = 300;

/// 表单中档案目录的取样上限
const LIMITE_CATALOGO: u32 = 50;

/// 执行创建或更新，连同成员关系的边操作
///
/// 更新 = PUT 用户字段 + 按差集逐条分配/移除档案。
/// 任何一步失败都使整个操作按失败上报（不刷新、对话框保持打开）。
async fn guardar_usuario(
    api: &ApiClient,
    solicitud: &SolicitudUsuario,
) -> Result<&'static str, ApiError> {
    match solicitud.id {
        None => {
            let creado = api.crear_usuario(&solicitud.payload).await?;
            for perfil_id in &solicitud.perfiles_deseados {
                api.asignar_perfil(creado.id, *perfil_id).await?;
            }
            Ok("Usuario creado exitosamente")
        }
        Some(id) => {
            api.actualizar_usuario(id, &solicitud.payload).await?;
            let (altas, bajas) =
                diff_perfiles(&solicitud.perfiles_actuales, &solicitud.perfiles_deseados);
            for perfil_id in altas {
                api.asignar_perfil(id, perfil_id).await?;
            }
            for perfil_id in bajas {
                api.remover_perfil(id, perfil_id).await?;
            }
            Ok("Usuario actualizado exitosamente")
        }
    }
}

#[component]
pub fn UsuariosPage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let api = auth.api_signal();

    // 列表获取：搜索词非空时走搜索端点
    let listado = use_listing(
        api,
        move |error: ApiError| toast.error(error.mensaje_o("Error al cargar usuarios")),
        |cliente: ApiClient, consulta| async move {
            if consulta.usa_busqueda() {
                cliente
                    .buscar_usuarios(consulta.termino.trim(), consulta.page, consulta.size)
                    .await
            } else {
                cliente.listar_usuarios(consulta.page, consulta.size).await
            }
        },
    );

    // 表单用的档案目录
    let (catalogo, set_catalogo) = signal(Vec::<Perfil>::new());
    Effect::new(move |_| {
        let Some(cliente) = api.get() else {
            return;
        };
        spawn_local(async move {
            // 目录取不到时表单仍可用，只是成员关系不可编辑
            if let Ok(pagina) = cliente.listar_perfiles(0, LIMITE_CATALOGO).await {
                set_catalogo.set(pagina.content);
            }
        });
    });

    // 搜索框：立即回显，防抖后提交查询（页码随之归零）
    let (busqueda, set_busqueda) = signal(String::new());
    let debounce = StoredValue::new_local(None::<Timeout>);
    let al_escribir = move |ev| {
        let valor = event_target_value(&ev);
        set_busqueda.set(valor.clone());
        let temporizador = Timeout::new(RETARDO_BUSQUEDA_MS, move || {
            listado.estado.cambiar_termino(valor);
        });
        // 替换旧的定时器即取消它（Timeout 在 drop 时清除）
        debounce.set_value(Some(temporizador));
    };

    // 表单对话框状态
    let abierto_form = RwSignal::new(false);
    let seleccionado = RwSignal::new(Option::<Usuario>::None);
    let (guardando, set_guardando) = signal(false);

    // 删除确认状态
    let confirmar_abierto = RwSignal::new(false);
    let objetivo_eliminar = RwSignal::new(Option::<Usuario>::None);
    let (eliminando, set_eliminando) = signal(false);

    let manejar_guardado = Callback::new(move |solicitud: SolicitudUsuario| {
        let Some(cliente) = api.get_untracked() else {
            return;
        };
        let fallback = if solicitud.id.is_some() {
            "Error al actualizar usuario"
        } else {
            "Error al crear usuario"
        };
        set_guardando.set(true);
        spawn_local(async move {
            let resultado = guardar_usuario(&cliente, &solicitud).await;
            set_guardando.set(false);
            match resultado {
                Ok(mensaje) => {
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
        let Some(usuario) = objetivo_eliminar.get_untracked() else {
            return;
        };
        set_eliminando.set(true);
        spawn_local(async move {
            match cliente.eliminar_usuario(usuario.id).await {
                Ok(()) => {
                    toast.exito("Usuario eliminado exitosamente");
                    listado.estado.refrescar();
                    confirmar_abierto.set(false);
                    objetivo_eliminar.set(None);
                }
                Err(error) => toast.error(error.mensaje_o("Error al eliminar usuario")),
            }
            set_eliminando.set(false);
        });
    });

    let manejar_estado = move |id: i64, nuevo: bool| {
        let Some(cliente) = api.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match cliente.cambiar_estado_usuario(id, nuevo).await {
                Ok(()) => {
                    toast.exito("Estado del usuario actualizado");
                    listado.estado.refrescar();
                }
                Err(error) => toast.error(error.mensaje_o("Error al cambiar estado")),
            }
        });
    };

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

    let mensaje_confirmacion = Signal::derive(move || {
        let username = objetivo_eliminar
            .get()
            .map(|usuario| usuario.username)
            .unwrap_or_default();
        format!(
            "¿Está seguro de que desea eliminar el usuario \"{}\"? Esta acción no se puede deshacer.",
            username
        )
    });

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Gestión de Usuarios"</h1>
                <p class="text-base-content/70 mt-1">
                    "Administra los usuarios del sistema, sus perfiles y estados."
                </p>
            </div>

            // 工具栏
            <div class="flex flex-wrap items-center gap-2">
                <label class="input input-bordered flex items-center gap-2 flex-1 min-w-64">
                    <Search attr:class="h-4 w-4 opacity-50" />
                    <input
                        type="text"
                        class="grow"
                        placeholder="Buscar usuarios..."
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
                    <Plus attr:class="h-4 w-4" /> "Nuevo Usuario"
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

            // 用户表格
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Usuario"</th>
                                    <th>"Email"</th>
                                    <th class="hidden md:table-cell">"Nombre"</th>
                                    <th>"Perfiles"</th>
                                    <th>"Estado"</th>
                                    <th>"Acciones"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || sin_filas() && !listado.cargando.get()>
                                    <tr>
                                        <td colspan="6" class="text-center py-8 text-base-content/50">
                                            "No se encontraron usuarios."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || sin_filas() && listado.cargando.get()>
                                    <tr>
                                        <td colspan="6" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span>
                                            " Cargando..."
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=filas
                                    key=|usuario| (usuario.id, usuario.activo, usuario.perfiles.len())
                                    children=move |usuario| {
                                        let id = usuario.id;
                                        let usuario_editar = usuario.clone();
                                        let usuario_eliminar = usuario.clone();
                                        view! {
                                            <tr>
                                                <td>
                                                    <div class="flex items-center gap-2 font-bold">
                                                        <User attr:class="h-4 w-4 text-primary" />
                                                        {usuario.username.clone()}
                                                    </div>
                                                </td>
                                                <td>
                                                    <div class="flex items-center gap-2 opacity-70">
                                                        <Mail attr:class="h-4 w-4 opacity-50" />
                                                        {usuario.email.clone()}
                                                    </div>
                                                </td>
                                                <td class="hidden md:table-cell">
                                                    {usuario.nombre_completo()}
                                                </td>
                                                <td>
                                                    <div class="flex flex-wrap gap-1">
                                                        {usuario
                                                            .perfiles
                                                            .iter()
                                                            .map(|nombre| view! {
                                                                <span class="badge badge-primary badge-outline">
                                                                    {nombre.clone()}
                                                                </span>
                                                            })
                                                            .collect_view()}
                                                    </div>
                                                </td>
                                                <td>
                                                    <input
                                                        type="checkbox"
                                                        class="toggle toggle-success toggle-sm"
                                                        prop:checked=usuario.activo
                                                        on:change=move |ev| {
                                                            manejar_estado(id, event_target_checked(&ev))
                                                        }
                                                    />
                                                </td>
                                                <td>
                                                    <div class="flex gap-1">
                                                        <button
                                                            class="btn btn-ghost btn-sm btn-square text-primary"
                                                            on:click=move |_| {
                                                                seleccionado.set(Some(usuario_editar.clone()));
                                                                abierto_form.set(true);
                                                            }
                                                        >
                                                            <Pencil attr:class="h-4 w-4" />
                                                        </button>
                                                        <button
                                                            class="btn btn-ghost btn-sm btn-square text-error"
                                                            on:click=move |_| {
                                                                objetivo_eliminar.set(Some(usuario_eliminar.clone()));
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

            <UsuarioDialog
                abierto=abierto_form
                seleccionado=Signal::derive(move || seleccionado.get())
                catalogo=Signal::derive(move || catalogo.get())
                ocupado=Signal::derive(move || guardando.get())
                on_submit=manejar_guardado
            />

            <ConfirmDialog
                abierto=confirmar_abierto
                mensaje=mensaje_confirmacion
                vetado=Signal::derive(|| false)
                aviso_veto=Signal::derive(String::new)
                ocupado=Signal::derive(move || eliminando.get())
                on_confirm=manejar_eliminar
            />
        </div>
    }
}
