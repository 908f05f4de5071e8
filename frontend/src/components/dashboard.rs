//! 统计面板
//!
//! 纯派生，无突变：各取一页用户与档案（上限 100），
//! 计算总数、激活/停用数与占比，并展示最近的用户预览。

use crate::auth::use_auth;
use crate::components::icons::{CheckCircle, ShieldCheck, Users, XCircle};
use crate::components::toast::use_toast;
use gestion_shared::{Pagina, Perfil, Usuario};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 统计取样上限
const LIMITE_RESUMEN: u32 = 100;

/// 预览表行数
const MAX_RECIENTES: usize = 5;

// =========================================================
// 派生计算
// =========================================================

#[derive(Debug, Clone, PartialEq)]
struct Resumen {
    total_usuarios: u64,
    total_perfiles: u64,
    activos: u64,
    inactivos: u64,
    pct_activos: f64,
    pct_inactivos: f64,
}

/// 占比；总数为 0 时定义为 0.0 而不是 NaN
fn porcentaje(parte: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        parte as f64 * 100.0 / total as f64
    }
}

fn calcular_resumen(usuarios: &Pagina<Usuario>, perfiles: &Pagina<Perfil>) -> Resumen {
    let total_usuarios = usuarios.total_elements;
    let activos = usuarios.content.iter().filter(|u| u.activo).count() as u64;
    let inactivos = total_usuarios.saturating_sub(activos);

    Resumen {
        total_usuarios,
        total_perfiles: perfiles.total_elements,
        activos,
        inactivos,
        pct_activos: porcentaje(activos, total_usuarios),
        pct_inactivos: porcentaje(inactivos, total_usuarios),
    }
}

// =========================================================
// UI
// =========================================================

#[component]
fn StatCard(
    titulo: &'static str,
    #[prop(into)] valor: Signal<String>,
    #[prop(into)] subtitulo: Signal<String>,
    color: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="stat">
            <div class=format!("stat-figure {}", color)>{children()}</div>
            <div class="stat-title">{titulo}</div>
            <div class=format!("stat-value {}", color)>{valor}</div>
            <div class="stat-desc">{subtitulo}</div>
        </div>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let api = auth.api_signal();

    let (usuarios, set_usuarios) = signal(Option::<Pagina<Usuario>>::None);
    let (perfiles, set_perfiles) = signal(Option::<Pagina<Perfil>>::None);
    let (cargando, set_cargando) = signal(true);

    let cargar = move || {
        let Some(cliente) = api.get_untracked() else {
            return;
        };
        set_cargando.set(true);
        spawn_local(async move {
            let res_usuarios = cliente.listar_usuarios(0, LIMITE_RESUMEN).await;
            let res_perfiles = cliente.listar_perfiles(0, LIMITE_RESUMEN).await;
            match (res_usuarios, res_perfiles) {
                (Ok(pagina_usuarios), Ok(pagina_perfiles)) => {
                    set_usuarios.set(Some(pagina_usuarios));
                    set_perfiles.set(Some(pagina_perfiles));
                }
                (Err(error), _) | (_, Err(error)) => {
                    toast.error(error.mensaje_o("Error al cargar estadísticas"));
                }
            }
            set_cargando.set(false);
        });
    };

    // 初始加载（认证完成、客户端可用时）
    Effect::new(move |_| {
        if api.get().is_some() {
            cargar();
        }
    });

    let resumen = Memo::new(move |_| match (usuarios.get(), perfiles.get()) {
        (Some(pagina_usuarios), Some(pagina_perfiles)) => {
            Some(calcular_resumen(&pagina_usuarios, &pagina_perfiles))
        }
        _ => None,
    });

    let recientes = move || {
        usuarios
            .get()
            .map(|pagina| pagina.content.into_iter().take(MAX_RECIENTES).collect::<Vec<_>>())
            .unwrap_or_default()
    };

    // 档案数条形图的归一化宽度
    let barras_perfiles = move || {
        let filas = recientes();
        let maximo = filas
            .iter()
            .map(|u| u.perfiles.len())
            .max()
            .unwrap_or(0)
            .max(1);
        filas
            .into_iter()
            .map(|u| {
                let cuenta = u.perfiles.len();
                (u.username, cuenta, cuenta * 100 / maximo)
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Dashboard"</h1>
                <p class="text-base-content/70 mt-1">
                    "Bienvenido al Sistema de Gestión de Usuarios. Aquí puedes ver las estadísticas generales del sistema."
                </p>
            </div>

            <Show
                when=move || resumen.get().is_some()
                fallback=move || view! {
                    <div class="flex justify-center py-16">
                        {move || if cargando.get() {
                            view! { <span class="loading loading-spinner loading-lg text-primary"></span> }.into_any()
                        } else {
                            view! { <p class="text-base-content/50">"Sin datos disponibles."</p> }.into_any()
                        }}
                    </div>
                }
            >
                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <StatCard
                        titulo="Total Usuarios"
                        valor=Signal::derive(move || {
                            resumen.get().map(|r| r.total_usuarios.to_string()).unwrap_or_default()
                        })
                        subtitulo=Signal::derive(move || {
                            resumen
                                .get()
                                .map(|r| format!("{} activos, {} inactivos", r.activos, r.inactivos))
                                .unwrap_or_default()
                        })
                        color="text-primary"
                    >
                        <Users attr:class="h-8 w-8" />
                    </StatCard>
                    <StatCard
                        titulo="Total Perfiles"
                        valor=Signal::derive(move || {
                            resumen.get().map(|r| r.total_perfiles.to_string()).unwrap_or_default()
                        })
                        subtitulo=Signal::derive(move || "Perfiles de sistema".to_string())
                        color="text-secondary"
                    >
                        <ShieldCheck attr:class="h-8 w-8" />
                    </StatCard>
                    <StatCard
                        titulo="Usuarios Activos"
                        valor=Signal::derive(move || {
                            resumen.get().map(|r| r.activos.to_string()).unwrap_or_default()
                        })
                        subtitulo=Signal::derive(move || {
                            resumen
                                .get()
                                .map(|r| format!("{:.1}% del total", r.pct_activos))
                                .unwrap_or_default()
                        })
                        color="text-success"
                    >
                        <CheckCircle attr:class="h-8 w-8" />
                    </StatCard>
                    <StatCard
                        titulo="Usuarios Inactivos"
                        valor=Signal::derive(move || {
                            resumen.get().map(|r| r.inactivos.to_string()).unwrap_or_default()
                        })
                        subtitulo=Signal::derive(move || {
                            resumen
                                .get()
                                .map(|r| format!("{:.1}% del total", r.pct_inactivos))
                                .unwrap_or_default()
                        })
                        color="text-error"
                    >
                        <XCircle attr:class="h-8 w-8" />
                    </StatCard>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-2 gap-6 mt-6">
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h3 class="card-title">"Distribución de Usuarios por Estado"</h3>
                            <div class="space-y-4 mt-2">
                                <div>
                                    <div class="flex justify-between text-sm mb-1">
                                        <span>"Activos"</span>
                                        <span>{move || {
                                            resumen.get().map(|r| format!("{} ({:.1}%)", r.activos, r.pct_activos)).unwrap_or_default()
                                        }}</span>
                                    </div>
                                    <progress
                                        class="progress progress-success w-full"
                                        prop:value=move || resumen.get().map(|r| r.pct_activos).unwrap_or(0.0)
                                        max="100"
                                    ></progress>
                                </div>
                                <div>
                                    <div class="flex justify-between text-sm mb-1">
                                        <span>"Inactivos"</span>
                                        <span>{move || {
                                            resumen.get().map(|r| format!("{} ({:.1}%)", r.inactivos, r.pct_inactivos)).unwrap_or_default()
                                        }}</span>
                                    </div>
                                    <progress
                                        class="progress progress-error w-full"
                                        prop:value=move || resumen.get().map(|r| r.pct_inactivos).unwrap_or(0.0)
                                        max="100"
                                    ></progress>
                                </div>
                            </div>
                        </div>
                    </div>

                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h3 class="card-title">"Usuarios y sus Perfiles"</h3>
                            <div class="space-y-3 mt-2">
                                <For
                                    each=barras_perfiles
                                    key=|(username, _, _)| username.clone()
                                    children=move |(username, cuenta, ancho)| {
                                        view! {
                                            <div>
                                                <div class="flex justify-between text-sm mb-1">
                                                    <span class="font-mono">{username}</span>
                                                    <span>{cuenta}</span>
                                                </div>
                                                <div class="h-2 bg-base-300 rounded">
                                                    <div
                                                        class="h-2 bg-primary rounded"
                                                        style=format!("width: {}%", ancho)
                                                    ></div>
                                                </div>
                                            </div>
                                        }
                                    }
                                />
                            </div>
                        </div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl mt-6">
                    <div class="card-body p-0">
                        <div class="p-6 pb-2">
                            <h3 class="card-title">"Usuarios Recientes"</h3>
                        </div>
                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"Usuario"</th>
                                        <th>"Email"</th>
                                        <th>"Estado"</th>
                                        <th>"Perfiles"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=recientes
                                        key=|usuario| usuario.id
                                        children=move |usuario| {
                                            let perfiles = if usuario.perfiles.is_empty() {
                                                "Sin perfiles".to_string()
                                            } else {
                                                usuario.perfiles.join(", ")
                                            };
                                            view! {
                                                <tr>
                                                    <td class="font-mono font-bold">{usuario.username}</td>
                                                    <td class="opacity-70">{usuario.email}</td>
                                                    <td>
                                                        {if usuario.activo {
                                                            view! { <span class="badge badge-success">"Activo"</span> }.into_any()
                                                        } else {
                                                            view! { <span class="badge badge-error">"Inactivo"</span> }.into_any()
                                                        }}
                                                    </td>
                                                    <td class="opacity-70">{perfiles}</td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usuario(id: i64, activo: bool) -> Usuario {
        Usuario {
            id,
            username: format!("user{}", id),
            email: format!("user{}@example.com", id),
            nombre: "Nombre".into(),
            apellidos: None,
            activo,
            perfiles: Vec::new(),
            fecha_creacion: None,
        }
    }

    fn pagina_usuarios(contenido: Vec<Usuario>, total: u64) -> Pagina<Usuario> {
        Pagina {
            content: contenido,
            total_elements: total,
            page: 0,
            size: LIMITE_RESUMEN,
        }
    }

    fn pagina_perfiles(total: u64) -> Pagina<Perfil> {
        Pagina {
            content: Vec::new(),
            total_elements: total,
            page: 0,
            size: LIMITE_RESUMEN,
        }
    }

    #[test]
    fn resumen_cuenta_activos_e_inactivos() {
        let usuarios = pagina_usuarios(
            vec![usuario(1, true), usuario(2, true), usuario(3, false)],
            3,
        );
        let resumen = calcular_resumen(&usuarios, &pagina_perfiles(2));

        assert_eq!(resumen.total_usuarios, 3);
        assert_eq!(resumen.total_perfiles, 2);
        assert_eq!(resumen.activos, 2);
        assert_eq!(resumen.inactivos, 1);
        assert!((resumen.pct_activos - 66.666).abs() < 0.01);
        assert!((resumen.pct_inactivos - 33.333).abs() < 0.01);
    }

    #[test]
    fn resumen_con_cero_usuarios_no_divide_por_cero() {
        let resumen = calcular_resumen(&pagina_usuarios(Vec::new(), 0), &pagina_perfiles(0));
        assert_eq!(resumen.pct_activos, 0.0);
        assert_eq!(resumen.pct_inactivos, 0.0);
    }

    #[test]
    fn porcentaje_normal() {
        assert_eq!(porcentaje(1, 4), 25.0);
        assert_eq!(porcentaje(0, 10), 0.0);
        assert_eq!(porcentaje(10, 10), 100.0);
    }
}
